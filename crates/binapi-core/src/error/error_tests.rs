#![allow(non_snake_case)]

use super::*;

#[test]
fn SchemaError___invalid_json___displays_section_and_reason() {
    let err = SchemaError::invalid("messages", "field name must be a string");

    let display = err.to_string();

    assert_eq!(
        display,
        "invalid JSON for messages: field name must be a string"
    );
}

#[test]
fn SchemaError___from_serde_error___converts_to_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let schema_err: SchemaError = json_err.into();

    assert!(matches!(schema_err, SchemaError::Json(_)));
    assert!(schema_err.to_string().starts_with("JSON error: "));
}
