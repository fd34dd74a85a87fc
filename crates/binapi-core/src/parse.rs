//! Parser for the VPP binary API JSON layout.
//!
//! ```text
//! {
//!     "types":    [ [name, field..., {"crc": "0x.."}], ... ],
//!     "messages": [ [name, field..., {"crc": "0x.."}], ... ],
//!     "unions":   [ [name, field..., {"crc": "0x.."}], ... ],
//!     "enums":    [ [name, [entry, value]..., {"enumtype": "u32"}], ... ],
//!     "aliases":  { name: {"type": t, "length": n}, ... },
//!     "services": { request: {"reply": r, "stream": b, "events": [..]}, ... },
//!     "options":  { "version": "1.2.3" },
//!     "vl_api_version": "0x.."
//! }
//! ```
//!
//! Fields are `[type, name]`, `[type, name, length]`,
//! `[type, name, length, size_from]` or `[type, name, {"limit": n}]`.

use crate::error::{SchemaError, SchemaResult};
use crate::model::{Alias, Enum, EnumEntry, Field, Message, Package, Service, Type, Union};
use serde::Deserialize;
use serde_json::{Map, Value};

const SECTION_TYPES: &str = "types";
const SECTION_MESSAGES: &str = "messages";
const SECTION_UNIONS: &str = "unions";
const SECTION_ENUMS: &str = "enums";
const SECTION_ALIASES: &str = "aliases";
const SECTION_SERVICES: &str = "services";

const KEY_CRC: &str = "crc";
const KEY_ENUM_TYPE: &str = "enumtype";
const KEY_LIMIT: &str = "limit";
const KEY_API_VERSION: &str = "vl_api_version";

/// Reply value marking a service without reply.
const NO_REPLY: &str = "null";

/// Default scalar type of enums without `enumtype`.
const DEFAULT_ENUM_TYPE: &str = "u32";

#[derive(Debug, Deserialize)]
struct AliasDef {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    length: usize,
}

#[derive(Debug, Deserialize)]
struct ServiceDef {
    reply: String,
    #[serde(default)]
    stream: bool,
    #[serde(default)]
    events: Vec<String>,
}

impl Package {
    /// Parse a module from the text of its `*.api.json` file.
    pub fn from_json(module_name: &str, text: &str) -> SchemaResult<Package> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(module_name, &root)
    }

    /// Parse a module from an already decoded JSON document.
    pub fn from_value(module_name: &str, root: &Value) -> SchemaResult<Package> {
        let root = root
            .as_object()
            .ok_or_else(|| SchemaError::invalid("module", "root must be an object"))?;

        let mut pkg = Package::new(module_name);

        if let Some(crc) = root.get(KEY_API_VERSION).and_then(Value::as_str) {
            pkg.crc = crc.to_string();
        }
        if let Some(version) = root
            .get("options")
            .and_then(|options| options.get("version"))
            .and_then(Value::as_str)
        {
            pkg.version = version.to_string();
        }

        for node in array_section(root, SECTION_ENUMS)? {
            let enum_ = parse_enum(node)?;
            pkg.register_ref(&enum_.name);
            pkg.enums.push(enum_);
        }

        for (name, node) in map_section(root, SECTION_ALIASES)? {
            let alias = parse_alias(name, node)?;
            pkg.register_ref(&alias.name);
            pkg.aliases.push(alias);
        }

        for node in array_section(root, SECTION_TYPES)? {
            let (name, fields, crc) = parse_object(SECTION_TYPES, node)?;
            pkg.register_ref(&name);
            pkg.types.push(Type { name, crc, fields });
        }

        for node in array_section(root, SECTION_UNIONS)? {
            let (name, fields, crc) = parse_object(SECTION_UNIONS, node)?;
            pkg.register_ref(&name);
            pkg.unions.push(Union { name, crc, fields });
        }

        for node in array_section(root, SECTION_MESSAGES)? {
            let (name, fields, crc) = parse_object(SECTION_MESSAGES, node)?;
            pkg.messages.push(Message { name, crc, fields });
        }

        for (name, node) in map_section(root, SECTION_SERVICES)? {
            let service = parse_service(module_name, name, node)?;
            check_service(&service);
            pkg.services.push(service);
        }

        // JSON object key order is not significant, keep output stable
        pkg.enums.sort_by(|a, b| a.name.cmp(&b.name));
        pkg.aliases.sort_by(|a, b| a.name.cmp(&b.name));
        pkg.types.sort_by(|a, b| a.name.cmp(&b.name));
        pkg.unions.sort_by(|a, b| a.name.cmp(&b.name));
        pkg.messages.sort_by(|a, b| a.name.cmp(&b.name));
        pkg.services
            .sort_by(|a, b| a.request_type.cmp(&b.request_type));

        tracing::debug!(
            module = module_name,
            enums = pkg.enums.len(),
            aliases = pkg.aliases.len(),
            types = pkg.types.len(),
            unions = pkg.unions.len(),
            messages = pkg.messages.len(),
            services = pkg.services.len(),
            "parsed package"
        );

        Ok(pkg)
    }
}

fn array_section<'a>(root: &'a Map<String, Value>, section: &str) -> SchemaResult<&'a [Value]> {
    match root.get(section) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(SchemaError::invalid(section, "section must be an array")),
    }
}

fn map_section<'a>(
    root: &'a Map<String, Value>,
    section: &str,
) -> SchemaResult<Vec<(&'a String, &'a Value)>> {
    match root.get(section) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.iter().collect()),
        Some(_) => Err(SchemaError::invalid(section, "section must be an object")),
    }
}

/// Parse `[name, field..., {"crc": ".."}]` shared by types, unions and messages.
fn parse_object(section: &str, node: &Value) -> SchemaResult<(String, Vec<Field>, String)> {
    let items = node
        .as_array()
        .ok_or_else(|| SchemaError::invalid(section, "definition must be an array"))?;
    let (name, members) = items
        .split_first()
        .ok_or_else(|| SchemaError::invalid(section, "empty definition"))?;
    let name = name
        .as_str()
        .ok_or_else(|| SchemaError::invalid(section, "name must be a string"))?
        .to_string();

    let mut fields = Vec::new();
    let mut crc = String::new();

    for member in members {
        match member {
            Value::Array(_) => fields.push(parse_field(section, member)?),
            Value::Object(meta) => {
                if let Some(value) = meta.get(KEY_CRC).and_then(Value::as_str) {
                    crc = value.to_string();
                }
            }
            _ => {
                return Err(SchemaError::invalid(
                    section,
                    format!("unexpected member in '{name}'"),
                ));
            }
        }
    }

    Ok((name, fields, crc))
}

fn parse_field(section: &str, node: &Value) -> SchemaResult<Field> {
    let items = node
        .as_array()
        .ok_or_else(|| SchemaError::invalid(section, "field must be an array"))?;
    if items.len() < 2 {
        return Err(SchemaError::invalid(
            section,
            "field must have a type and a name",
        ));
    }

    let type_name = items[0]
        .as_str()
        .ok_or_else(|| SchemaError::invalid(section, "field type must be a string"))?;
    let name = items[1]
        .as_str()
        .ok_or_else(|| SchemaError::invalid(section, "field name must be a string"))?;

    let mut field = Field::new(name, type_name);

    for (index, item) in items.iter().enumerate().skip(2) {
        match (index, item) {
            (2, Value::Number(length)) => {
                field.length = length.as_u64().ok_or_else(|| {
                    SchemaError::invalid(section, format!("invalid length of field '{name}'"))
                })? as usize;
            }
            (3, Value::String(size_from)) => field.size_from = size_from.clone(),
            (_, Value::Object(meta)) => parse_field_meta(section, &mut field, meta)?,
            _ => {
                return Err(SchemaError::invalid(
                    section,
                    format!("unexpected attribute of field '{name}'"),
                ));
            }
        }
    }

    Ok(field)
}

fn parse_field_meta(
    section: &str,
    field: &mut Field,
    meta: &Map<String, Value>,
) -> SchemaResult<()> {
    for (key, value) in meta {
        match key.as_str() {
            KEY_LIMIT => {
                field.meta.limit = value.as_u64().ok_or_else(|| {
                    SchemaError::invalid(
                        section,
                        format!("invalid limit of field '{}'", field.name),
                    )
                })? as usize;
            }
            other => {
                tracing::warn!(field = %field.name, meta = other, "unknown field meta info");
            }
        }
    }
    Ok(())
}

fn parse_enum(node: &Value) -> SchemaResult<Enum> {
    let items = node
        .as_array()
        .ok_or_else(|| SchemaError::invalid(SECTION_ENUMS, "definition must be an array"))?;
    let (name, members) = items
        .split_first()
        .ok_or_else(|| SchemaError::invalid(SECTION_ENUMS, "empty definition"))?;
    let name = name
        .as_str()
        .ok_or_else(|| SchemaError::invalid(SECTION_ENUMS, "name must be a string"))?;

    let mut enum_ = Enum {
        name: name.to_string(),
        type_name: DEFAULT_ENUM_TYPE.to_string(),
        entries: Vec::new(),
    };

    for member in members {
        match member {
            Value::Array(entry) => enum_.entries.push(parse_enum_entry(name, entry)?),
            Value::Object(meta) => {
                if let Some(type_name) = meta.get(KEY_ENUM_TYPE).and_then(Value::as_str) {
                    enum_.type_name = type_name.to_string();
                }
            }
            _ => {
                return Err(SchemaError::invalid(
                    SECTION_ENUMS,
                    format!("unexpected member in '{name}'"),
                ));
            }
        }
    }

    Ok(enum_)
}

fn parse_enum_entry(enum_name: &str, entry: &[Value]) -> SchemaResult<EnumEntry> {
    match entry {
        [Value::String(name), Value::Number(value)] => {
            let value = value.as_i64().ok_or_else(|| {
                SchemaError::invalid(
                    SECTION_ENUMS,
                    format!("value of '{enum_name}.{name}' is not an integer"),
                )
            })?;
            Ok(EnumEntry {
                name: name.clone(),
                value,
            })
        }
        _ => Err(SchemaError::invalid(
            SECTION_ENUMS,
            format!("entry of '{enum_name}' must be [name, value]"),
        )),
    }
}

fn parse_alias(name: &str, node: &Value) -> SchemaResult<Alias> {
    let def = AliasDef::deserialize(node).map_err(|err| {
        SchemaError::invalid(SECTION_ALIASES, format!("alias '{name}': {err}"))
    })?;

    Ok(Alias {
        name: name.to_string(),
        type_name: def.type_name,
        length: def.length,
    })
}

fn parse_service(module_name: &str, request: &str, node: &Value) -> SchemaResult<Service> {
    let def = ServiceDef::deserialize(node).map_err(|err| {
        SchemaError::invalid(SECTION_SERVICES, format!("service '{request}': {err}"))
    })?;

    let reply_type = if def.reply == NO_REPLY {
        String::new()
    } else {
        def.reply
    };

    Ok(Service {
        name: format!("{module_name}.{request}"),
        request_type: request.to_string(),
        reply_type,
        stream: def.stream,
        events: def.events,
    })
}

/// Warn about service shapes that break the usual naming conventions.
fn check_service(svc: &Service) {
    if svc.is_event_service() {
        if !svc.request_type.starts_with("want_") {
            tracing::warn!(service = %svc.name, "unusual event service: request is not want_*");
        }
    } else if svc.is_dump_service() {
        if !svc.request_type.ends_with("_dump") || !svc.reply_type.ends_with("_details") {
            tracing::warn!(service = %svc.name, "unusual stream service: expected *_dump/*_details");
        }
    } else if svc.is_request_service() && !svc.reply_type.ends_with("_reply") {
        tracing::warn!(service = %svc.name, "unusual request service: reply is not *_reply");
    }
}
