//! binapi-codegen - Go bindings for VPP binary API modules
//!
//! This crate turns a parsed [`binapi_core::Package`] into one Go source file
//! for the GoVPP `api` package:
//! - [`naming`] converts schema names into Go identifiers
//! - [`fields`] decides the `struc` tag of every struct member
//! - [`union`] lays out unions over one shared byte array
//! - [`role`] classifies messages as request, reply, event or other
//! - [`docs`] recovers object definitions from the schema text
//! - [`services`] synthesizes the RPC client
//! - [`emit`] writes everything in declaration order
//!
//! # Usage
//!
//! ```rust,no_run
//! use binapi_codegen::{GenerateOptions, ModuleTarget, generate_module};
//! use std::path::Path;
//!
//! let target = ModuleTarget::resolve(Path::new("acl.api.json"), Path::new("bin_api")).unwrap();
//! let source = std::fs::read_to_string(&target.input_file).unwrap();
//! let code = generate_module(&target, &source, &GenerateOptions::default()).unwrap();
//! std::fs::write(&target.output_file, code).unwrap();
//! ```

pub mod config;
pub mod docs;
pub mod emit;
pub mod error;
pub mod fields;
pub mod naming;
pub mod role;
pub mod services;
pub mod target;
pub mod types;
pub mod union;

pub use config::GenerateOptions;
pub use docs::{DocSource, IndentScan, ObjectKind};
pub use emit::generate_package;
pub use error::{CodegenError, CodegenResult};
pub use role::MessageRole;
pub use target::{INPUT_FILE_EXT, ModuleTarget, OUTPUT_FILE_EXT};

use binapi_core::Package;

/// Parse the schema text of one module and generate its Go file in memory.
///
/// The schema text doubles as the documentation source.
pub fn generate_module(
    target: &ModuleTarget,
    source: &str,
    options: &GenerateOptions,
) -> CodegenResult<Vec<u8>> {
    let package = Package::from_json(&target.module_name, source)?;
    let docs = IndentScan::new(source);

    let mut out = Vec::with_capacity(source.len());
    generate_package(target, &package, &docs, options, &mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
