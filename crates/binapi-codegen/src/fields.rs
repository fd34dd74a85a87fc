//! Field encoding planner.
//!
//! Every schema field becomes one Go struct member (two for strings) whose
//! `struc` tag tells the runtime how to encode it:
//!
//! | Field shape | Go member | Tag |
//! |-------------|-----------|-----|
//! | `["u8", "mac", 6]` | `Mac []byte` | `struc:"[6]byte"` |
//! | `["u32", "count"]` referenced by a sibling's size-from | `Count uint32` | `struc:"sizeof=Rules"` |
//! | `["vl_api_rule_t", "rules", 0, "count"]` | `Rules []Rule` | none |
//! | `["string", "tag"]` | `XXX_TagLen uint32` + `Tag string` | `struc:"sizeof=Tag"` on the length |
//! | `["u32", "sw_if_index"]` | `SwIfIndex uint32` | none |

use crate::naming::field_name;
use crate::types::TypeMapper;
use binapi_core::Field;
use std::collections::BTreeMap;

const TAG_STRUC: &str = "struc";
const TAG_BINAPI: &str = "binapi";

/// How a struct member is laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Single value of the element type.
    Scalar,

    /// Array of exactly `length` elements.
    FixedArray { length: usize },

    /// Value carrying the element count of sibling `target` (Go name).
    SizeOf { target: String },

    /// Array whose element count is carried by sibling `size_source` (schema name).
    VariableArray { size_source: String },

    /// Generated byte length of the string member `target` (Go name).
    StringLength { target: String },
}

/// Encoding decision for one emitted struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    /// Name in the schema, empty for generated members.
    pub wire_name: String,
    pub go_name: String,
    pub go_type: String,
    pub encoding: Encoding,
    /// Struct tags keyed by tag name; rendered in key order.
    pub tags: BTreeMap<String, String>,
}

impl FieldPlan {
    /// Render as one line of a Go struct body.
    pub fn render(&self) -> String {
        let mut line = format!("\t{} {}", self.go_name, self.go_type);

        if !self.tags.is_empty() {
            let tags: Vec<String> = self
                .tags
                .iter()
                .map(|(key, value)| format!("{key}:\"{value}\""))
                .collect();
            line.push_str(&format!("\t`{}`", tags.join(" ")));
        }

        line.push('\n');
        line
    }
}

/// Plans struct members for the fields of one record, union or message.
#[derive(Debug, Clone, Copy)]
pub struct FieldPlanner<'a> {
    mapper: TypeMapper<'a>,
    include_binapi_names: bool,
}

impl<'a> FieldPlanner<'a> {
    pub fn new(mapper: TypeMapper<'a>, include_binapi_names: bool) -> Self {
        Self {
            mapper,
            include_binapi_names,
        }
    }

    /// Plan the members emitted for `siblings[index]`.
    ///
    /// Strings yield their generated length member first.
    pub fn plan(&self, siblings: &[Field], index: usize) -> Vec<FieldPlan> {
        let Some(field) = siblings.get(index) else {
            return Vec::new();
        };
        let go_name = field_name(&field.name);
        let mut members = Vec::with_capacity(2);

        if field.is_string() {
            members.push(string_length_member(&go_name));
        }

        let encoding = if field.length > 0 {
            Encoding::FixedArray {
                length: field.length,
            }
        } else if let Some(target) = size_target(siblings, &field.name) {
            Encoding::SizeOf {
                target: field_name(&target.name),
            }
        } else if !field.size_from.is_empty() {
            Encoding::VariableArray {
                size_source: field.size_from.clone(),
            }
        } else {
            Encoding::Scalar
        };

        let go_type = if field.is_array() {
            format!("[]{}", self.mapper.go_element_type(&field.type_name))
        } else {
            self.mapper.go_type(&field.type_name)
        };

        let mut tags = BTreeMap::new();
        match &encoding {
            Encoding::FixedArray { length } => {
                let element = self.mapper.go_element_type(&field.type_name);
                tags.insert(TAG_STRUC.to_string(), format!("[{length}]{element}"));
            }
            Encoding::SizeOf { target } => {
                tags.insert(TAG_STRUC.to_string(), format!("sizeof={target}"));
            }
            _ => {}
        }
        if let Some(binapi) = self.binapi_tag(field) {
            tags.insert(TAG_BINAPI.to_string(), binapi);
        }

        members.push(FieldPlan {
            wire_name: field.name.clone(),
            go_name,
            go_type,
            encoding,
            tags,
        });
        members
    }

    fn binapi_tag(&self, field: &Field) -> Option<String> {
        let name = if self.include_binapi_names {
            field.name.as_str()
        } else {
            ""
        };
        match field.meta.limit {
            0 if name.is_empty() => None,
            0 => Some(name.to_string()),
            limit => Some(format!("{name},limit={limit}")),
        }
    }
}

/// The last sibling whose size-from names `name`.
fn size_target<'f>(siblings: &'f [Field], name: &str) -> Option<&'f Field> {
    siblings.iter().rev().find(|f| f.size_from == name)
}

fn string_length_member(go_name: &str) -> FieldPlan {
    let mut tags = BTreeMap::new();
    tags.insert(TAG_STRUC.to_string(), format!("sizeof={go_name}"));

    FieldPlan {
        wire_name: String::new(),
        go_name: format!("XXX_{go_name}Len"),
        go_type: "uint32".to_string(),
        encoding: Encoding::StringLength {
            target: go_name.to_string(),
        },
        tags,
    }
}
