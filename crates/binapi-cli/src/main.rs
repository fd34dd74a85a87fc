//! binapi-generator CLI - Go bindings for VPP binary API modules
//!
//! Commands:
//! - `binapi-generator generate` - Generate Go packages from `*.api.json` files
//! - `binapi-generator check` - Validate a settings file and parse input modules

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod generate;
mod logging;
mod settings;

#[derive(Parser)]
#[command(name = "binapi-generator")]
#[command(author, version, about = "Go bindings generator for VPP binary API", long_about = None)]
struct Cli {
    /// Enable debug messages
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go packages from VPP binary API definitions
    Generate(GenerateArgs),

    /// Validate the settings file and parse every input module
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Path to the settings file (default: ./binapi-generator.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Where `*.api.json` files are read from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input JSON file
    #[arg(long, conflicts_with = "input_dir")]
    pub input_file: Option<PathBuf>,

    /// Directory with input JSON files (default: /usr/share/vpp/api)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory where package folders will be generated (default: .)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Include APIVersion constant for each module
    #[arg(long = "include-apiver")]
    pub include_api_version: bool,

    /// Include JSON API source in comments for each object
    #[arg(long)]
    pub include_comments: bool,

    /// Include binary API names in struct tag
    #[arg(long)]
    pub include_binapi_names: bool,

    /// Include service interface with client implementation
    #[arg(long)]
    pub include_services: bool,

    /// Continue with processing of next input file on error
    #[arg(long)]
    pub continue_on_error: bool,

    /// Run gofmt on every generated file
    #[arg(long)]
    pub gofmt: bool,

    /// Path to the settings file (default: ./binapi-generator.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug);

    match cli.command {
        Commands::Generate(args) => {
            generate::run(args)?;
        }
        Commands::Check { input, config } => {
            settings::check(&input, config)?;
        }
    }

    Ok(())
}
