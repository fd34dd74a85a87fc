//! Property-based tests for binding generation
//!
//! Checks that encoding decisions, message roles and union sizes follow
//! their rules for arbitrary field shapes.

use binapi_codegen::fields::{Encoding, FieldPlanner};
use binapi_codegen::naming::camel_case_name;
use binapi_codegen::types::{TypeMapper, scalar_size};
use binapi_codegen::union::UnionLayout;
use binapi_codegen::{GenerateOptions, IndentScan, MessageRole, ModuleTarget, generate_package};
use binapi_core::{Enum, EnumEntry, Field, Package, Union};
use proptest::prelude::*;
use std::path::Path;

const SCALARS: &[&str] = &["u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64", "f64", "bool"];

const ROLE_FIELDS: &[&str] = &["client_index", "context", "sw_if_index", "retval"];

fn arb_scalar() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SCALARS)
}

fn arb_schema_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(_[a-z0-9]{1,8}){0,4}"
}

fn arb_role_field() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ROLE_FIELDS)
}

proptest! {
    /// Property: normalized names start upper-case and never keep a double underscore
    #[test]
    fn proptest_camel_case_name_is_exported(name in arb_schema_name()) {
        let go = camel_case_name(&name);

        prop_assert!(go.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert!(!go.contains("__"));
        prop_assert_eq!(camel_case_name(&name), go);
    }

    /// Property: a fixed array tag records exactly the length and element type
    #[test]
    fn proptest_fixed_array_tag_records_length(typ in arb_scalar(), length in 1usize..4096) {
        let pkg = Package::new("m");
        let mapper = TypeMapper::new(&pkg);
        let fields = vec![Field::new("data", typ).with_length(length)];

        let plan = FieldPlanner::new(mapper, false).plan(&fields, 0);

        let element = mapper.go_element_type(typ);
        prop_assert_eq!(&plan[0].encoding, &Encoding::FixedArray { length });
        prop_assert_eq!(&plan[0].tags["struc"], &format!("[{length}]{element}"));
    }

    /// Property: the size giver names its sibling and is not fixed-size
    #[test]
    fn proptest_size_giver_names_target(target in arb_schema_name()) {
        prop_assume!(target != "count");
        let pkg = Package::new("m");
        let fields = vec![
            Field::new("count", "u32"),
            Field::new(target.clone(), "u16").with_size_from("count"),
        ];

        let plan = FieldPlanner::new(TypeMapper::new(&pkg), false).plan(&fields, 0);

        let go_target = camel_case_name(&target);
        prop_assert_eq!(&plan[0].encoding, &Encoding::SizeOf { target: go_target.clone() });
        prop_assert_eq!(&plan[0].tags["struc"], &format!("sizeof={go_target}"));
    }

    /// Property: every string is preceded by its uint32 length member
    #[test]
    fn proptest_string_has_length_companion(name in arb_schema_name()) {
        let pkg = Package::new("m");
        let fields = vec![Field::new(name.clone(), "string")];

        let plan = FieldPlanner::new(TypeMapper::new(&pkg), false).plan(&fields, 0);

        prop_assert_eq!(plan.len(), 2);
        prop_assert_eq!(plan[0].go_type.as_str(), "uint32");
        prop_assert_eq!(&plan[0].tags["struc"], &format!("sizeof={}", plan[1].go_name));
    }

    /// Property: the role depends only on fields [1] and [2]
    #[test]
    fn proptest_role_follows_classification_table(
        first in arb_role_field(),
        second in arb_role_field(),
        tail in prop::collection::vec(arb_role_field(), 0..4),
    ) {
        let mut fields = vec![
            Field::new("_vl_msg_id", "u16"),
            Field::new(first, "u32"),
            Field::new(second, "u32"),
        ];
        fields.extend(tail.iter().map(|name| Field::new(*name, "u32")));

        let expected = match (first, second) {
            ("client_index", "context") => MessageRole::Request,
            ("client_index", _) => MessageRole::Event,
            ("context", _) => MessageRole::Reply,
            _ => MessageRole::Other,
        };
        prop_assert_eq!(MessageRole::classify(&fields), expected);
    }

    /// Property: union buffer size is the largest member size
    #[test]
    fn proptest_union_size_is_max_member(
        members in prop::collection::vec((arb_scalar(), 0usize..32), 1..8),
    ) {
        let pkg = Package::new("m");
        let union = Union {
            name: "u".to_string(),
            crc: String::new(),
            fields: members
                .iter()
                .enumerate()
                .map(|(i, (typ, length))| Field::new(format!("f{i}"), *typ).with_length(*length))
                .collect(),
        };

        let layout = UnionLayout::compute(&union, &pkg);

        let expected = members
            .iter()
            .filter_map(|(typ, length)| scalar_size(typ).map(|size| size * (*length).max(1)))
            .max()
            .unwrap_or(0);
        prop_assert_eq!(layout.size, expected);
        prop_assert_eq!(layout.accessors.len(), members.len());
    }

    /// Property: enum name map lists every declared value once
    #[test]
    fn proptest_enum_name_map_covers_values(values in prop::collection::vec(0i64..16, 1..10)) {
        let mut pkg = Package::new("m");
        pkg.enums.push(Enum {
            name: "e".to_string(),
            type_name: "u32".to_string(),
            entries: values
                .iter()
                .enumerate()
                .map(|(i, value)| EnumEntry { name: format!("E_{i}"), value: *value })
                .collect(),
        });
        let code = render(&pkg);

        let start = code.find("var E_name = map[uint32]string{\n").unwrap();
        let end = start + code[start..].find("\n}\n").unwrap();
        let map = &code[start..end];
        for value in &values {
            prop_assert_eq!(map.matches(&format!("\t{value}: ")).count(), 1);
        }
    }

    /// Property: generation is deterministic
    #[test]
    fn proptest_generation_is_deterministic(
        names in prop::collection::btree_set(arb_schema_name(), 1..6),
    ) {
        let mut pkg = Package::new("m");
        for name in &names {
            pkg.messages.push(binapi_core::Message {
                name: name.clone(),
                crc: "0x01020304".to_string(),
                fields: vec![Field::new("_vl_msg_id", "u16"), Field::new("context", "u32")],
            });
        }

        prop_assert_eq!(render(&pkg), render(&pkg));
    }
}

fn render(pkg: &Package) -> String {
    let target = ModuleTarget::resolve(Path::new("m.api.json"), Path::new("out")).unwrap();
    let mut out = Vec::new();
    generate_package(
        &target,
        pkg,
        &IndentScan::new(""),
        &GenerateOptions::all(),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}
