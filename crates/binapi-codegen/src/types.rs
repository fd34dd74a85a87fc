//! Go type mappings and encoded sizes for binary API types.
//!
//! # Type Mappings
//!
//! | Binary API | Go | Size (bytes) |
//! |------------|----|--------------|
//! | `u8` / `i8` | `uint8` / `int8` | 1 |
//! | `u16` / `i16` | `uint16` / `int16` | 2 |
//! | `u32` / `i32` | `uint32` / `int32` | 4 |
//! | `u64` / `i64` | `uint64` / `int64` | 8 |
//! | `f64` | `float64` | 8 |
//! | `bool` | `bool` | 1 |
//! | `string` | `string` | variable |
//! | `vl_api_<name>_t` | `<Name>` | size of the referenced object |

use crate::naming::camel_case_name;
use binapi_core::{Field, Package};

/// Nesting depth after which a size is treated as indeterminate.
const MAX_SIZE_DEPTH: usize = 32;

/// Go name of a binary API scalar type.
pub fn go_scalar(binapi_type: &str) -> Option<&'static str> {
    let go = match binapi_type {
        "u8" => "uint8",
        "i8" => "int8",
        "u16" => "uint16",
        "i16" => "int16",
        "u32" => "uint32",
        "i32" => "int32",
        "u64" => "uint64",
        "i64" => "int64",
        "f64" => "float64",
        _ => return None,
    };
    Some(go)
}

/// Encoded size of a binary API scalar type.
pub fn scalar_size(binapi_type: &str) -> Option<usize> {
    match binapi_type {
        "u8" | "i8" | "bool" => Some(1),
        "u16" | "i16" => Some(2),
        "u32" | "i32" => Some(4),
        "u64" | "i64" | "f64" => Some(8),
        _ => None,
    }
}

/// Resolves binary API type names to Go type names within one package.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    package: &'a Package,
}

impl<'a> TypeMapper<'a> {
    pub fn new(package: &'a Package) -> Self {
        Self { package }
    }

    /// Go type for a binary API type name.
    ///
    /// Unknown types fall back to `byte`.
    pub fn go_type(&self, binapi_type: &str) -> String {
        if let Some(scalar) = go_scalar(binapi_type) {
            return scalar.to_string();
        }
        if let Some(name) = self.package.resolve_ref(binapi_type) {
            return camel_case_name(name);
        }
        match binapi_type {
            "bool" | "string" => binapi_type.to_string(),
            other => {
                tracing::warn!(type_name = other, "unknown binary API type, using byte");
                "byte".to_string()
            }
        }
    }

    /// Go element type of an array; 8-bit unsigned becomes `byte`.
    pub fn go_element_type(&self, binapi_type: &str) -> String {
        let go = self.go_type(binapi_type);
        if go == "uint8" { "byte".to_string() } else { go }
    }
}

/// Computes encoded byte widths of binary API types.
///
/// A size is indeterminate (`None`) when the type contains a string or a
/// variable-length array, cannot be resolved, or overflows `usize`.
#[derive(Debug, Clone, Copy)]
pub struct SizeOracle<'a> {
    package: &'a Package,
}

impl<'a> SizeOracle<'a> {
    pub fn new(package: &'a Package) -> Self {
        Self { package }
    }

    /// Encoded size of a type referenced by name or wire reference.
    pub fn size_of_type(&self, type_name: &str) -> Option<usize> {
        self.type_size(type_name, 0)
    }

    /// Encoded size of a field, including its fixed array length.
    pub fn size_of_field(&self, field: &Field) -> Option<usize> {
        self.field_size(field, 0)
    }

    fn type_size(&self, type_name: &str, depth: usize) -> Option<usize> {
        if depth > MAX_SIZE_DEPTH {
            return None;
        }
        if let Some(size) = scalar_size(type_name) {
            return Some(size);
        }

        let name = self.package.resolve_ref(type_name).unwrap_or(type_name);

        if let Some(enum_) = self.package.enum_by_name(name) {
            return scalar_size(&enum_.type_name);
        }
        if let Some(alias) = self.package.alias_by_name(name) {
            let size = self.type_size(&alias.type_name, depth + 1)?;
            return size.checked_mul(alias.length.max(1));
        }
        if let Some(typ) = self.package.type_by_name(name) {
            return typ
                .fields
                .iter()
                .map(|f| self.field_size(f, depth + 1))
                .try_fold(0usize, |total, size| total.checked_add(size?));
        }
        if let Some(union) = self.package.union_by_name(name) {
            return union
                .fields
                .iter()
                .map(|f| self.field_size(f, depth + 1))
                .try_fold(0, |max, size| size.map(|s| max.max(s)));
        }

        None
    }

    fn field_size(&self, field: &Field, depth: usize) -> Option<usize> {
        if field.is_string() || !field.size_from.is_empty() {
            return None;
        }
        let size = self.type_size(&field.type_name, depth)?;
        size.checked_mul(field.length.max(1))
    }
}
