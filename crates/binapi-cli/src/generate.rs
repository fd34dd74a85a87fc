//! Generate command implementation
//!
//! Resolves the input modules, generates each Go package in memory and
//! writes it to `<output_dir>/<package>/<package>.ba.go`.

use crate::settings::Settings;
use crate::{GenerateArgs, InputArgs};
use anyhow::{Context, Result};
use binapi_codegen::{GenerateOptions, INPUT_FILE_EXT, ModuleTarget, generate_module};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, info, warn};

/// Directory VPP installs its API definitions into.
pub const DEFAULT_INPUT_DIR: &str = "/usr/share/vpp/api";

/// Output directory when neither a flag nor the settings name one.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Source of the `*.api.json` files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Dir(PathBuf),
}

impl Input {
    /// Pick the input from flags, then settings, then the VPP install directory.
    pub fn select(args: &InputArgs, settings: &Settings) -> Self {
        if let Some(file) = &args.input_file {
            return Input::File(file.clone());
        }

        let dir = args
            .input_dir
            .clone()
            .or_else(|| settings.input_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
        Input::Dir(dir)
    }

    /// Input files, directory entries sorted by name.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        match self {
            Input::File(file) => Ok(vec![file.clone()]),
            Input::Dir(dir) => {
                let entries = fs::read_dir(dir)
                    .with_context(|| format!("Failed to read input directory {:?}", dir))?;

                let mut files = Vec::new();
                for entry in entries {
                    let path = entry
                        .with_context(|| format!("Failed to read input directory {:?}", dir))?
                        .path();
                    let is_api_file = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with(INPUT_FILE_EXT));
                    if is_api_file && path.is_file() {
                        files.push(path);
                    }
                }
                files.sort();
                Ok(files)
            }
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::File(file) => write!(f, "file {}", file.display()),
            Input::Dir(dir) => write!(f, "directory {}", dir.display()),
        }
    }
}

/// Everything one generator run needs, after merging settings and flags
#[derive(Debug, Clone)]
pub struct GenerateJob {
    pub input: Input,
    pub output_dir: PathBuf,
    pub options: GenerateOptions,
    pub continue_on_error: bool,
    pub gofmt: bool,
}

impl GenerateJob {
    /// Merge command-line flags over the settings file.
    pub fn new(args: &GenerateArgs, settings: &Settings) -> Self {
        let flags = GenerateOptions {
            include_api_version: args.include_api_version,
            include_comments: args.include_comments,
            include_binapi_names: args.include_binapi_names,
            include_services: args.include_services,
        };

        Self {
            input: Input::select(&args.input, settings),
            output_dir: args
                .output_dir
                .clone()
                .or_else(|| settings.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            options: settings.generate.merge(flags),
            continue_on_error: args.continue_on_error || settings.continue_on_error,
            gofmt: args.gofmt,
        }
    }

    /// Generate every input module.
    ///
    /// Returns the written files. With `continue_on_error` a failing module
    /// is logged and skipped, and the run fails after the last module.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let files = self.input.files()?;
        if files.is_empty() {
            warn!(input = %self.input, "no {} files found", INPUT_FILE_EXT);
        }
        debug!(input = %self.input, modules = files.len(), options = ?self.options, "generating");

        let mut written = Vec::with_capacity(files.len());
        let mut failed = 0;
        for file in &files {
            match self.generate_file(file) {
                Ok(output) => written.push(output),
                Err(err) if self.continue_on_error => {
                    error!(file = %file.display(), "{err:#}");
                    failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} modules failed to generate", failed, files.len());
        }

        Ok(written)
    }

    /// Generate one module and write its Go file.
    pub fn generate_file(&self, input_file: &Path) -> Result<PathBuf> {
        let target = ModuleTarget::resolve(input_file, &self.output_dir)?;

        let source = fs::read_to_string(input_file)
            .with_context(|| format!("Failed to read {}", input_file.display()))?;
        let code = generate_module(&target, &source, &self.options)
            .with_context(|| format!("Failed to generate module {:?}", target.module_name))?;

        if let Some(dir) = target.output_file.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        fs::write(&target.output_file, &code)
            .with_context(|| format!("Failed to write {}", target.output_file.display()))?;

        if self.gofmt {
            gofmt(&target.output_file)?;
        }

        let lines = code.iter().filter(|&&b| b == b'\n').count();
        info!(
            module = %target.module_name,
            output = %target.output_file.display(),
            lines,
            "generated Go package"
        );

        Ok(target.output_file)
    }
}

/// Format a Go file in place.
fn gofmt(path: &Path) -> Result<()> {
    let output = Command::new("gofmt")
        .arg("-w")
        .arg(path)
        .output()
        .context("Failed to run gofmt. Is Go installed?")?;

    if !output.status.success() {
        anyhow::bail!(
            "gofmt failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Generate command implementation
pub fn run(args: GenerateArgs) -> Result<()> {
    let (settings, path) = Settings::load(args.config.as_deref())?;
    if let Some(path) = &path {
        debug!(settings = %path.display(), "loaded settings");
    }
    settings.validate()?;

    let job = GenerateJob::new(&args, &settings);
    let written = job.execute()?;

    info!(
        packages = written.len(),
        output_dir = %job.output_dir.display(),
        "generation finished"
    );

    Ok(())
}
