//! Emission of one Go file per binary API module.
//!
//! Output order:
//!
//! ```text
//! header (source, package doc, census)
//! imports + reference vars
//! compatibility assertion
//! const ( ModuleName, APIVersion, VersionCrc )
//! /* Enums */  /* Aliases */  /* Types */  /* Unions */  /* Messages */
//! func init() { api.RegisterMessage(...) }
//! func AllMessages() []api.Message
//! Service interface + client (optional)
//! ```
//!
//! Later sections reference identifiers declared by earlier ones, so the
//! order is fixed.

use crate::config::GenerateOptions;
use crate::docs::{DocSource, ObjectKind, render_comment};
use crate::error::CodegenResult;
use crate::fields::FieldPlanner;
use crate::naming::camel_case_name;
use crate::role::{MessageRole, is_skipped_member};
use crate::services::{SERVICE_API_NAME, render_services};
use crate::target::ModuleTarget;
use crate::types::TypeMapper;
use crate::union::UnionLayout;
use binapi_core::{Alias, Census, Enum, Field, Message, Package, Type, Union};
use std::collections::BTreeSet;
use std::io::Write;

/// Version of the contract between generated code and the GoVPP api package.
///
/// Generated files assert `api.GoVppAPIPackageIsVersion<N>`.
pub const GENERATED_CODE_VERSION: u32 = 1;

/// Import path of the GoVPP api package.
pub const GOVPP_API_IMPORT_PATH: &str = "git.fd.io/govpp.git/api";

/// Import path of the pack/unpack library.
pub const STRUC_IMPORT_PATH: &str = "github.com/lunixbochs/struc";

const CONST_MODULE_NAME: &str = "ModuleName";
const CONST_API_VERSION: &str = "APIVersion";
const CONST_VERSION_CRC: &str = "VersionCrc";

/// Write the Go bindings of `package` into `w`.
///
/// A write failure aborts generation; output written so far stays in `w`.
pub fn generate_package<W: Write>(
    target: &ModuleTarget,
    package: &Package,
    docs: &dyn DocSource,
    options: &GenerateOptions,
    w: &mut W,
) -> CodegenResult<()> {
    tracing::debug!(package = %target.package_name, "generating package");

    let mut emitter = Emitter {
        target,
        package,
        docs,
        options,
        planner: FieldPlanner::new(TypeMapper::new(package), options.include_binapi_names),
        mapper: TypeMapper::new(package),
        w,
    };
    emitter.emit()
}

struct Emitter<'a, W> {
    target: &'a ModuleTarget,
    package: &'a Package,
    docs: &'a dyn DocSource,
    options: &'a GenerateOptions,
    planner: FieldPlanner<'a>,
    mapper: TypeMapper<'a>,
    w: &'a mut W,
}

impl<W: Write> Emitter<'_, W> {
    fn emit(&mut self) -> CodegenResult<()> {
        self.header()?;
        self.imports()?;
        self.constants()?;

        let package = self.package;

        if !package.enums.is_empty() {
            writeln!(self.w, "/* Enums */")?;
            writeln!(self.w)?;
            for enum_ in &package.enums {
                self.enum_(enum_)?;
            }
        }

        if !package.aliases.is_empty() {
            writeln!(self.w, "/* Aliases */")?;
            writeln!(self.w)?;
            for alias in &package.aliases {
                self.alias(alias)?;
            }
        }

        if !package.types.is_empty() {
            writeln!(self.w, "/* Types */")?;
            writeln!(self.w)?;
            for typ in &package.types {
                self.type_(typ)?;
            }
        }

        if !package.unions.is_empty() {
            writeln!(self.w, "/* Unions */")?;
            writeln!(self.w)?;
            for union in &package.unions {
                self.union(union)?;
            }
        }

        if !package.messages.is_empty() {
            writeln!(self.w, "/* Messages */")?;
            writeln!(self.w)?;
            for message in &package.messages {
                self.message(message)?;
            }
            self.registrations()?;
        }

        if self.options.include_services && !package.services.is_empty() {
            self.services()?;
        }

        Ok(())
    }

    fn header(&mut self) -> CodegenResult<()> {
        let module = &self.target.module_name;
        let package = &self.target.package_name;

        writeln!(
            self.w,
            "// Code generated by GoVPP binapi-generator. DO NOT EDIT."
        )?;
        writeln!(self.w, "// source: {}", self.target.input_file.display())?;
        writeln!(self.w)?;

        writeln!(self.w, "/*")?;
        writeln!(
            self.w,
            "Package {package} is a generated from VPP binary API module '{module}'."
        )?;
        writeln!(self.w)?;
        writeln!(self.w, " The {module} module consists of:")?;
        write!(self.w, "{}", census_lines(&self.package.census()))?;
        writeln!(self.w, "*/")?;
        writeln!(self.w, "package {package}")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn imports(&mut self) -> CodegenResult<()> {
        writeln!(self.w, "import api \"{GOVPP_API_IMPORT_PATH}\"")?;
        writeln!(self.w, "import bytes \"bytes\"")?;
        writeln!(self.w, "import context \"context\"")?;
        writeln!(self.w, "import strconv \"strconv\"")?;
        writeln!(self.w, "import struc \"{STRUC_IMPORT_PATH}\"")?;
        writeln!(self.w)?;

        writeln!(
            self.w,
            "// Reference imports to suppress errors if they are not otherwise used."
        )?;
        writeln!(self.w, "var _ = api.RegisterMessage")?;
        writeln!(self.w, "var _ = bytes.NewBuffer")?;
        writeln!(self.w, "var _ = context.Background")?;
        writeln!(self.w, "var _ = strconv.Itoa")?;
        writeln!(self.w, "var _ = struc.Pack")?;
        writeln!(self.w)?;

        writeln!(
            self.w,
            "// This is a compile-time assertion to ensure that this generated file"
        )?;
        writeln!(
            self.w,
            "// is compatible with the GoVPP api package it is being compiled against."
        )?;
        writeln!(
            self.w,
            "// A compilation error at this line likely means your copy of the"
        )?;
        writeln!(self.w, "// GoVPP api package needs to be updated.")?;
        writeln!(
            self.w,
            "const _ = api.GoVppAPIPackageIsVersion{GENERATED_CODE_VERSION} // please upgrade the GoVPP api package"
        )?;
        writeln!(self.w)?;
        Ok(())
    }

    fn constants(&mut self) -> CodegenResult<()> {
        writeln!(self.w, "const (")?;
        writeln!(self.w, "\t// {CONST_MODULE_NAME} is the name of this module.")?;
        writeln!(
            self.w,
            "\t{CONST_MODULE_NAME} = {}",
            go_quote(&self.target.module_name)
        )?;

        if self.options.include_api_version {
            if !self.package.version.is_empty() {
                writeln!(
                    self.w,
                    "\t// {CONST_API_VERSION} is the API version of this module."
                )?;
                writeln!(
                    self.w,
                    "\t{CONST_API_VERSION} = {}",
                    go_quote(&self.package.version)
                )?;
            }
            if !self.package.crc.is_empty() {
                writeln!(self.w, "\t// {CONST_VERSION_CRC} is the CRC of this module.")?;
                writeln!(self.w, "\t{CONST_VERSION_CRC} = {}", self.package.crc)?;
            }
        }

        writeln!(self.w, ")")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn comment(&mut self, kind: ObjectKind, go_name: &str, name: &str) -> CodegenResult<()> {
        let header = match kind {
            ObjectKind::Service => format!(
                "{go_name} represents VPP binary API services in {} module.",
                self.target.module_name
            ),
            _ => format!("{go_name} represents VPP binary API {kind} '{name}':"),
        };
        let definition = if self.options.include_comments {
            self.docs.definition(kind, name)
        } else {
            Vec::new()
        };
        write!(self.w, "{}", render_comment(&header, &definition))?;
        Ok(())
    }

    fn enum_(&mut self, enum_: &Enum) -> CodegenResult<()> {
        let name = camel_case_name(&enum_.name);
        let typ = self.mapper.go_type(&enum_.type_name);

        tracing::debug!(
            name = %enum_.name,
            go_name = %name,
            entries = enum_.entries.len(),
            "writing enum"
        );

        self.comment(ObjectKind::Enum, &name, &enum_.name)?;
        writeln!(self.w, "type {name} {typ}")?;
        writeln!(self.w)?;

        writeln!(self.w, "const (")?;
        for entry in &enum_.entries {
            writeln!(self.w, "\t{} {name} = {}", entry.name, entry.value)?;
        }
        writeln!(self.w, ")")?;
        writeln!(self.w)?;

        // Go rejects duplicate map keys, aliased values keep their first name
        let mut seen = BTreeSet::new();
        writeln!(self.w, "var {name}_name = map[{typ}]string{{")?;
        for entry in &enum_.entries {
            if seen.insert(entry.value) {
                writeln!(self.w, "\t{}: {},", entry.value, go_quote(&entry.name))?;
            }
        }
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;

        writeln!(self.w, "var {name}_value = map[string]{typ}{{")?;
        for entry in &enum_.entries {
            writeln!(self.w, "\t{}: {},", go_quote(&entry.name), entry.value)?;
        }
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;

        writeln!(self.w, "func (x {name}) String() string {{")?;
        writeln!(self.w, "\ts, ok := {name}_name[{typ}(x)]")?;
        writeln!(self.w, "\tif ok {{")?;
        writeln!(self.w, "\t\treturn s")?;
        writeln!(self.w, "\t}}")?;
        writeln!(self.w, "\treturn strconv.Itoa(int(x))")?;
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn alias(&mut self, alias: &Alias) -> CodegenResult<()> {
        let name = camel_case_name(&alias.name);

        tracing::debug!(
            name = %alias.name,
            go_name = %name,
            length = alias.length,
            "writing alias"
        );

        self.comment(ObjectKind::Alias, &name, &alias.name)?;
        let typ = if alias.length > 0 {
            format!(
                "[{}]{}",
                alias.length,
                self.mapper.go_element_type(&alias.type_name)
            )
        } else {
            self.mapper.go_type(&alias.type_name)
        };
        writeln!(self.w, "type {name} {typ}")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn type_(&mut self, typ: &Type) -> CodegenResult<()> {
        let name = camel_case_name(&typ.name);

        tracing::debug!(
            name = %typ.name,
            go_name = %name,
            fields = typ.fields.len(),
            "writing type"
        );

        self.comment(ObjectKind::Type, &name, &typ.name)?;
        writeln!(self.w, "type {name} struct {{")?;
        for (index, field) in typ.fields.iter().enumerate() {
            if field.is_wire_metadata() {
                continue;
            }
            self.members(&typ.fields, index)?;
        }
        writeln!(self.w, "}}")?;

        self.type_name_getter(&name, &typ.name)?;
        if !typ.crc.is_empty() {
            self.crc_getter(&name, &typ.crc)?;
        }
        writeln!(self.w)?;
        Ok(())
    }

    fn union(&mut self, union: &Union) -> CodegenResult<()> {
        let layout = UnionLayout::compute(union, self.package);

        tracing::debug!(
            name = %union.name,
            go_name = %layout.name,
            fields = union.fields.len(),
            size = layout.size,
            "writing union"
        );

        self.comment(ObjectKind::Union, &layout.name, &union.name)?;
        write!(self.w, "{}", layout.render_struct())?;

        self.type_name_getter(&layout.name, &union.name)?;
        if !union.crc.is_empty() {
            self.crc_getter(&layout.name, &union.crc)?;
        }
        write!(self.w, "{}", layout.render_accessors())?;
        writeln!(self.w)?;
        Ok(())
    }

    fn message(&mut self, message: &Message) -> CodegenResult<()> {
        let name = camel_case_name(&message.name);
        let role = MessageRole::of(message);

        tracing::debug!(
            name = %message.name,
            go_name = %name,
            fields = message.fields.len(),
            role = ?role,
            "writing message"
        );

        self.comment(ObjectKind::Message, &name, &message.name)?;
        write!(self.w, "type {name} struct {{")?;

        let mut emitted = 0;
        for (index, field) in message.fields.iter().enumerate() {
            if is_skipped_member(field, emitted) {
                continue;
            }
            if emitted == 0 {
                writeln!(self.w)?;
            }
            emitted += 1;
            self.members(&message.fields, index)?;
        }
        writeln!(self.w, "}}")?;

        writeln!(self.w, "func (*{name}) GetMessageName() string {{")?;
        writeln!(self.w, "\treturn {}", go_quote(&message.name))?;
        writeln!(self.w, "}}")?;
        self.crc_getter(&name, &message.crc)?;
        writeln!(self.w, "func (*{name}) GetMessageType() api.MessageType {{")?;
        writeln!(self.w, "\treturn {}", role.api_constant())?;
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn members(&mut self, siblings: &[Field], index: usize) -> CodegenResult<()> {
        for member in self.planner.plan(siblings, index) {
            write!(self.w, "{}", member.render())?;
        }
        Ok(())
    }

    fn registrations(&mut self) -> CodegenResult<()> {
        let module = &self.target.module_name;
        let names: Vec<String> = self
            .package
            .messages
            .iter()
            .map(|m| camel_case_name(&m.name))
            .collect();

        writeln!(self.w, "func init() {{")?;
        for name in &names {
            writeln!(
                self.w,
                "\tapi.RegisterMessage((*{name})(nil), \"{module}.{name}\")"
            )?;
        }
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;

        writeln!(
            self.w,
            "// Messages returns list of all messages in this module."
        )?;
        writeln!(self.w, "func AllMessages() []api.Message {{")?;
        writeln!(self.w, "\treturn []api.Message{{")?;
        for name in &names {
            writeln!(self.w, "\t\t(*{name})(nil),")?;
        }
        writeln!(self.w, "\t}}")?;
        writeln!(self.w, "}}")?;
        writeln!(self.w)?;
        Ok(())
    }

    fn services(&mut self) -> CodegenResult<()> {
        tracing::debug!(services = self.package.services.len(), "writing services");

        self.comment(ObjectKind::Service, SERVICE_API_NAME, "services")?;
        write!(self.w, "{}", render_services(&self.package.services))?;
        writeln!(self.w)?;
        Ok(())
    }

    fn type_name_getter(&mut self, go_name: &str, name: &str) -> CodegenResult<()> {
        writeln!(self.w, "func (*{go_name}) GetTypeName() string {{")?;
        writeln!(self.w, "\treturn {}", go_quote(name))?;
        writeln!(self.w, "}}")?;
        Ok(())
    }

    fn crc_getter(&mut self, go_name: &str, crc: &str) -> CodegenResult<()> {
        let crc = crc.strip_prefix("0x").unwrap_or(crc);
        writeln!(self.w, "func (*{go_name}) GetCrcString() string {{")?;
        writeln!(self.w, "\treturn {}", go_quote(crc))?;
        writeln!(self.w, "}}")?;
        Ok(())
    }
}

/// Census lines of the file header, e.g. `\t  2 enums`.
pub fn census_lines(census: &Census) -> String {
    let mut lines = String::new();
    for (kind, count) in census.entries() {
        match count {
            0 => {}
            1 => lines.push_str(&format!("\t{count:3} {kind}\n")),
            _ if kind.ends_with('s') => lines.push_str(&format!("\t{count:3} {kind}es\n")),
            _ => lines.push_str(&format!("\t{count:3} {kind}s\n")),
        }
    }
    lines
}

/// Go interpreted string literal of `s`, quotes included.
pub fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
