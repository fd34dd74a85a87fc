#![allow(non_snake_case)]

use super::*;
use std::path::Path;

const SOURCE: &str = r#"{
    "messages": [
        [
            "show_version",
            [
                "u16",
                "_vl_msg_id"
            ],
            [
                "u32",
                "client_index"
            ],
            [
                "u32",
                "context"
            ],
            {
                "crc": "0x51077d14"
            }
        ]
    ],
    "vl_api_version": "0x1db2ece9"
}
"#;

fn target() -> ModuleTarget {
    ModuleTarget::resolve(Path::new("vpe.api.json"), Path::new("out")).unwrap()
}

#[test]
fn generate_module___valid_source___produces_go_file() {
    let code = generate_module(&target(), SOURCE, &GenerateOptions::default()).unwrap();
    let code = String::from_utf8(code).unwrap();

    assert!(code.starts_with("// Code generated by GoVPP binapi-generator. DO NOT EDIT.\n"));
    assert!(code.contains("package vpe\n"));
    assert!(code.contains("type ShowVersion struct {}\n"));
    assert!(code.contains("\treturn api.RequestMessage\n"));
}

#[test]
fn generate_module___comments_enabled___reads_source_text() {
    let options = GenerateOptions {
        include_comments: true,
        ..Default::default()
    };

    let code = generate_module(&target(), SOURCE, &options).unwrap();
    let code = String::from_utf8(code).unwrap();

    assert!(code.contains("//\t\"show_version\",\n"));
}

#[test]
fn generate_module___invalid_json___returns_schema_error() {
    let result = generate_module(&target(), "{", &GenerateOptions::default());

    assert!(matches!(result, Err(CodegenError::Schema(_))));
}

#[test]
fn generate_module___oversized_union_member___still_generates() {
    let source = r#"{"aliases":{"big":{"type":"u64","length":4611686018427387904}},"unions":[["u",["vl_api_big_t","a"],["u8","b"]]]}"#;

    let code = generate_module(&target(), source, &GenerateOptions::default()).unwrap();
    let code = String::from_utf8(code).unwrap();

    assert!(code.contains("type U struct {\n\tXXX_UnionData [1]byte\n}\n"));
    assert!(code.contains("func (u *U) SetA(a Big) {\n"));
}
