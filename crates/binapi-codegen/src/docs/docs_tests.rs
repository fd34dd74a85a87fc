#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const SOURCE: &str = r#"{
    "messages": [
        [
            "sw_interface_dump",
            [
                "u16",
                "_vl_msg_id"
            ],
            [
                "u32",
                "name_filter_valid"
            ],
            {
                "crc": "0x51077d14"
            }
        ],
        [
            "sw_interface_details",
            [
                "u16",
                "_vl_msg_id"
            ]
        ]
    ],
    "aliases": {
        "ip4_address": {
            "type": "u8",
            "length": 4
        },
        "interface_index": {
            "type": "u32"
        }
    },
    "services": {
        "sw_interface_dump": {
            "reply": "sw_interface_details",
            "stream": true
        }
    }
}
"#;

fn scan(kind: ObjectKind, name: &str) -> Vec<String> {
    IndentScan::new(SOURCE).definition(kind, name)
}

#[test_case(ObjectKind::Message, "sw_interface_dump", "\"sw_interface_dump\",")]
#[test_case(ObjectKind::Type, "address", "\"address\",")]
#[test_case(ObjectKind::Alias, "ip4_address", "\"ip4_address\": {")]
#[test_case(ObjectKind::Service, "services", "\"services\": {")]
fn ObjectKind___title___depends_on_layout(kind: ObjectKind, name: &str, expected: &str) {
    assert_eq!(kind.title(name), expected);
}

#[test]
fn IndentScan___array_object___echoes_until_dedent() {
    let lines = scan(ObjectKind::Message, "sw_interface_dump");

    assert_eq!(lines.first().unwrap(), "\"sw_interface_dump\",");
    assert_eq!(lines.last().unwrap(), "}");
    assert_eq!(lines.len(), 12);
    assert!(lines.contains(&"    \"name_filter_valid\"".to_string()));
    assert!(!lines.iter().any(|l| l.contains("sw_interface_details")));
}

#[test]
fn IndentScan___map_object___echoes_closing_line() {
    let lines = scan(ObjectKind::Alias, "ip4_address");

    assert_eq!(
        lines,
        vec![
            "\"ip4_address\": {".to_string(),
            "    \"type\": \"u8\",".to_string(),
            "    \"length\": 4".to_string(),
            "},".to_string(),
        ]
    );
}

#[test]
fn IndentScan___services_section___is_a_map_object() {
    let lines = scan(ObjectKind::Service, "services");

    assert_eq!(lines.first().unwrap(), "\"services\": {");
    assert_eq!(lines.last().unwrap(), "}");
    assert_eq!(lines.len(), 6);
}

#[test]
fn IndentScan___title_inside_other_line___is_not_a_match() {
    // "sw_interface_details" only appears as a service reply value here
    let source = "{\n    \"reply\": \"sw_interface_details\",\n}\n";

    let lines = IndentScan::new(source).definition(ObjectKind::Message, "sw_interface_details");

    assert!(lines.is_empty());
}

#[test]
fn IndentScan___unknown_object___yields_nothing() {
    assert!(scan(ObjectKind::Type, "missing").is_empty());
}

#[test]
fn IndentScan___blank_line___ends_definition() {
    let source = "    \"x\",\n        1\n\n        2\n";

    let lines = IndentScan::new(source).definition(ObjectKind::Enum, "x");

    assert_eq!(lines, vec!["\"x\",".to_string(), "    1".to_string()]);
}

#[test]
fn IndentScan___unterminated_last_line___is_ignored() {
    let source = "\"x\",\n    1";

    let lines = IndentScan::new(source).definition(ObjectKind::Enum, "x");

    assert_eq!(lines, vec!["\"x\",".to_string()]);
}

#[test]
fn render_comment___without_definition___writes_header_only() {
    let code = render_comment("Foo represents VPP binary API type 'foo':", &[]);

    assert_eq!(code, "// Foo represents VPP binary API type 'foo':\n");
}

#[test]
fn render_comment___with_definition___frames_lines() {
    let lines = vec!["\"foo\",".to_string(), "    [".to_string()];

    let code = render_comment("Foo represents VPP binary API type 'foo':", &lines);

    assert_eq!(
        code,
        "// Foo represents VPP binary API type 'foo':\n//\n//\t\"foo\",\n//\t    [\n//\n"
    );
}
