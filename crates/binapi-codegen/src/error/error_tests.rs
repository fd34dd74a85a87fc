#![allow(non_snake_case)]

use super::*;

#[test]
fn CodegenError___invalid_input_file___quotes_the_name() {
    let err = CodegenError::InvalidInputFile("vpe.json".to_string());

    assert_eq!(err.to_string(), "invalid input file name: \"vpe.json\"");
}

#[test]
fn CodegenError___from_io_error___converts_to_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");

    let err: CodegenError = io_err.into();

    assert!(matches!(err, CodegenError::Io(_)));
    assert_eq!(err.to_string(), "I/O error: pipe closed");
}

#[test]
fn CodegenError___from_schema_error___converts_to_schema() {
    let schema_err = binapi_core::Package::from_json("m", "[]").unwrap_err();

    let err: CodegenError = schema_err.into();

    assert!(matches!(err, CodegenError::Schema(_)));
    assert!(err.to_string().starts_with("schema error: invalid JSON for module"));
}
