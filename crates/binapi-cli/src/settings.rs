//! Settings file parsing and validation

use crate::InputArgs;
use crate::generate::Input;
use anyhow::{Context, Result};
use binapi_codegen::emit::census_lines;
use binapi_codegen::{GenerateOptions, ModuleTarget};
use binapi_core::Package;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "binapi-generator.toml";

/// binapi-generator.toml structure
///
/// ```toml
/// input_dir = "/usr/share/vpp/api"
/// output_dir = "bin_api"
/// continue_on_error = true
///
/// [generate]
/// include_api_version = true
/// include_services = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input_dir: Option<PathBuf>,

    pub output_dir: Option<PathBuf>,

    pub continue_on_error: bool,

    pub generate: GenerateOptions,
}

impl Settings {
    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings: {:?}", path.as_ref()))?;

        content.parse()
    }

    /// Load the explicit settings file, else the default one if present.
    ///
    /// Returns the file that was read, if any.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !default.is_file() {
                    return Ok((Self::default(), None));
                }
                default
            }
        };

        let settings = Self::from_file(&path)?;
        Ok((settings, Some(path)))
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.input_dir {
            if dir.as_os_str().is_empty() {
                anyhow::bail!("input_dir cannot be empty");
            }
            if !dir.is_dir() {
                anyhow::bail!("input_dir {:?} is not a directory", dir);
            }
        }

        if let Some(dir) = &self.output_dir
            && dir.as_os_str().is_empty()
        {
            anyhow::bail!("output_dir cannot be empty");
        }

        Ok(())
    }
}

impl FromStr for Settings {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings")
    }
}

/// Check command implementation
pub fn check(input: &InputArgs, config: Option<PathBuf>) -> Result<()> {
    let (settings, path) = Settings::load(config.as_deref())?;
    match &path {
        Some(path) => println!("Checking settings: {}", path.display()),
        None => println!("No settings file, using defaults"),
    }
    settings.validate()?;

    println!("✓ Options: {}", describe_options(&settings.generate));

    let input = Input::select(input, &settings);
    let files = input.files()?;
    println!("✓ Input: {} ({} modules)", input, files.len());

    for file in &files {
        let target = ModuleTarget::resolve(file, Path::new("."))?;
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let package = Package::from_json(&target.module_name, &source)
            .with_context(|| format!("Failed to parse {}", file.display()))?;

        println!("✓ {} -> package {}", target.module_name, target.package_name);
        print!("{}", census_lines(&package.census()));
    }

    println!("\nAll modules are valid!");

    Ok(())
}

fn describe_options(options: &GenerateOptions) -> String {
    let enabled: Vec<&str> = [
        ("api-version", options.include_api_version),
        ("comments", options.include_comments),
        ("binapi-names", options.include_binapi_names),
        ("services", options.include_services),
    ]
    .into_iter()
    .filter_map(|(name, on)| on.then_some(name))
    .collect();

    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    }
}
