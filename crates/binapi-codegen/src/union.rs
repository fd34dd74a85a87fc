//! Union layout synthesis.
//!
//! A union is one byte array large enough for its largest alternative.
//! Every alternative gets a constructor plus `Set`/`Get` accessors that
//! pack into and unpack from that array with `struc`.

use crate::naming::{camel_case_name, field_name};
use crate::types::{SizeOracle, TypeMapper};
use binapi_core::{Package, Union};

/// Name of the byte array backing every generated union.
pub const UNION_DATA_FIELD: &str = "XXX_UnionData";

/// Typed alternative of a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionAccessor {
    /// Go name of the alternative, e.g. `IP4`.
    pub name: String,
    /// Go type packed into the union buffer.
    pub go_type: String,
}

/// Buffer size and accessors of one union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionLayout {
    /// Go name of the union type.
    pub name: String,
    /// Size of the backing array in bytes.
    pub size: usize,
    pub accessors: Vec<UnionAccessor>,
}

impl UnionLayout {
    /// Compute the layout of `union` within `package`.
    ///
    /// Alternatives of indeterminate size are left out of the buffer size.
    pub fn compute(union: &Union, package: &Package) -> Self {
        let oracle = SizeOracle::new(package);
        let mapper = TypeMapper::new(package);

        let mut size = 0;
        let mut accessors = Vec::with_capacity(union.fields.len());

        for field in &union.fields {
            match oracle.size_of_field(field) {
                Some(field_size) => size = size.max(field_size),
                None => tracing::warn!(
                    union = %union.name,
                    field = %field.name,
                    "size of union member cannot be determined, excluded from buffer size"
                ),
            }

            let go_type = if field.length > 0 {
                let element = mapper.go_element_type(&field.type_name);
                format!("[{}]{element}", field.length)
            } else if field.is_array() {
                format!("[]{}", mapper.go_element_type(&field.type_name))
            } else {
                mapper.go_type(&field.type_name)
            };

            accessors.push(UnionAccessor {
                name: field_name(&field.name),
                go_type,
            });
        }

        Self {
            name: camel_case_name(&union.name),
            size,
            accessors,
        }
    }

    /// Go struct declaration holding the union buffer.
    pub fn render_struct(&self) -> String {
        format!(
            "type {} struct {{\n\t{UNION_DATA_FIELD} [{}]byte\n}}\n",
            self.name, self.size
        )
    }

    /// Constructor and accessor pair of one alternative.
    pub fn render_accessor(&self, accessor: &UnionAccessor) -> String {
        let union = &self.name;
        let field = &accessor.name;
        let typ = &accessor.go_type;

        let mut code = String::new();
        code.push('\n');
        code.push_str(&format!("func {union}{field}(a {typ}) (u {union}) {{\n"));
        code.push_str(&format!("\tu.Set{field}(a)\n"));
        code.push_str("\treturn\n");
        code.push_str("}\n");

        code.push_str(&format!("func (u *{union}) Set{field}(a {typ}) {{\n"));
        code.push_str("\tvar b = new(bytes.Buffer)\n");
        code.push_str("\tif err := struc.Pack(b, &a); err != nil {\n");
        code.push_str("\t\treturn\n");
        code.push_str("\t}\n");
        code.push_str(&format!(
            "\tu.{UNION_DATA_FIELD} = [{}]byte{{}}\n",
            self.size
        ));
        code.push_str(&format!("\tcopy(u.{UNION_DATA_FIELD}[:], b.Bytes())\n"));
        code.push_str("}\n");

        code.push_str(&format!("func (u *{union}) Get{field}() (a {typ}) {{\n"));
        code.push_str(&format!(
            "\tvar b = bytes.NewReader(u.{UNION_DATA_FIELD}[:])\n"
        ));
        code.push_str("\tstruc.Unpack(b, &a)\n");
        code.push_str("\treturn\n");
        code.push_str("}\n");
        code
    }

    /// All accessors in declaration order.
    pub fn render_accessors(&self) -> String {
        self.accessors
            .iter()
            .map(|accessor| self.render_accessor(accessor))
            .collect()
    }
}
