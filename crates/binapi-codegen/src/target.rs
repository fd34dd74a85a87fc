//! Input/output naming of one generated module.

use crate::error::{CodegenError, CodegenResult};
use crate::naming::package_name;
use std::path::{Path, PathBuf};

/// File extension of VPP binary API definitions.
pub const INPUT_FILE_EXT: &str = ".api.json";

/// File extension of generated Go files.
pub const OUTPUT_FILE_EXT: &str = ".ba.go";

/// Where a module comes from and where its bindings go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTarget {
    /// Path of the `*.api.json` file, as given.
    pub input_file: PathBuf,

    /// `<output_dir>/<package>/<package>.ba.go`
    pub output_file: PathBuf,

    /// Name of the VPP module (file name up to the first `.`).
    pub module_name: String,

    /// Name of the generated Go package.
    pub package_name: String,
}

impl ModuleTarget {
    /// Derive module and package names from an input file path.
    ///
    /// Fails when the file name does not end with [`INPUT_FILE_EXT`].
    pub fn resolve(input_file: &Path, output_dir: &Path) -> CodegenResult<Self> {
        let file_name = input_file
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| name.ends_with(INPUT_FILE_EXT))
            .ok_or_else(|| CodegenError::InvalidInputFile(input_file.display().to_string()))?;

        let module_name = file_name
            .split_once('.')
            .map_or(file_name, |(module, _)| module)
            .to_string();
        let package_name = package_name(&module_name);
        let output_file = output_dir
            .join(&package_name)
            .join(format!("{package_name}{OUTPUT_FILE_EXT}"));

        Ok(Self {
            input_file: input_file.to_path_buf(),
            output_file,
            module_name,
            package_name,
        })
    }
}
