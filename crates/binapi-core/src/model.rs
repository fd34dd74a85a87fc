//! Schema model of a VPP binary API module.
//!
//! Object layout:
//! ```text
//! Package
//!  ├── Enum     (name, scalar type, entries)
//!  ├── Alias    (name, target type, optional fixed length)
//!  ├── Type     (name, crc, fields)
//!  ├── Union    (name, crc, fields sharing one buffer)
//!  ├── Message  (name, crc, fields; field 0 is the message id)
//!  └── Service  (request, reply, stream, events)
//! ```

use std::collections::BTreeMap;

/// Message id field present at index 0 of every message.
pub const MSG_ID_FIELD: &str = "_vl_msg_id";

/// Checksum field carried on the wire for some objects.
pub const CRC_FIELD: &str = "crc";

/// Client index field of requests and events.
pub const CLIENT_INDEX_FIELD: &str = "client_index";

/// Context field correlating requests with replies.
pub const CONTEXT_FIELD: &str = "context";

/// Returns the wire reference used by fields to point at a declared object.
///
/// ```
/// assert_eq!(binapi_core::api_type_ref("address"), "vl_api_address_t");
/// ```
pub fn api_type_ref(name: &str) -> String {
    format!("vl_api_{name}_t")
}

/// One parsed `*.api.json` module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    /// Module name (file name up to the first `.`).
    pub name: String,

    /// Semantic version from `options.version`, empty if absent.
    pub version: String,

    /// Checksum of the whole module (`vl_api_version`), empty if absent.
    pub crc: String,

    pub enums: Vec<Enum>,
    pub aliases: Vec<Alias>,
    pub types: Vec<Type>,
    pub unions: Vec<Union>,
    pub messages: Vec<Message>,
    pub services: Vec<Service>,

    /// Wire reference (`vl_api_<name>_t`) to declared object name.
    pub ref_map: BTreeMap<String, String>,
}

/// Object counts of a package, in emission order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub enums: usize,
    pub aliases: usize,
    pub types: usize,
    pub unions: usize,
    pub messages: usize,
    pub services: usize,
}

/// A member of a type, union or message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// Field name as written in the schema.
    pub name: String,

    /// Element type name (scalar, `string`, or a wire reference).
    pub type_name: String,

    /// Fixed array length, 0 when the field is not a fixed array.
    pub length: usize,

    /// Name of the sibling carrying this field's runtime length, empty if none.
    pub size_from: String,

    pub meta: FieldMeta,
}

/// Auxiliary field metadata that never changes the wire encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Maximum length hint, 0 when not set.
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    /// Underlying scalar type, e.g. `u32`.
    pub type_name: String,
    pub entries: Vec<EnumEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub type_name: String,
    /// Fixed array length, 0 for a plain alias.
    pub length: usize,
}

/// Composite record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    pub crc: String,
    pub fields: Vec<Field>,
}

/// Alternatives overlaid on one fixed-size buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Union {
    pub name: String,
    pub crc: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub crc: String,
    pub fields: Vec<Field>,
}

/// RPC-style exchange between a request message and its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    /// Qualified name `<module>.<request>`.
    pub name: String,
    pub request_type: String,
    /// Reply message name, empty for fire-and-forget requests.
    pub reply_type: String,
    /// Multiple replies are streamed back (dump/details).
    pub stream: bool,
    /// Event messages delivered after subscribing.
    pub events: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_size_from(mut self, size_from: impl Into<String>) -> Self {
        self.size_from = size_from.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.meta.limit = limit;
        self
    }

    /// Whether the element type is the variable-length text type.
    pub fn is_string(&self) -> bool {
        self.type_name == "string"
    }

    /// Whether the field is emitted as an array (fixed or sized by a sibling).
    pub fn is_array(&self) -> bool {
        self.length > 0 || !self.size_from.is_empty()
    }

    /// Whether the field is wire metadata that bindings never carry.
    pub fn is_wire_metadata(&self) -> bool {
        let lower = self.name.to_lowercase();
        lower == CRC_FIELD || lower == MSG_ID_FIELD
    }
}

impl Service {
    pub fn is_event_service(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn is_dump_service(&self) -> bool {
        self.stream
    }

    pub fn is_request_service(&self) -> bool {
        !self.reply_type.is_empty() && !self.stream && self.events.is_empty()
    }
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn alias_by_name(&self, name: &str) -> Option<&Alias> {
        self.aliases.iter().find(|a| a.name == name)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn union_by_name(&self, name: &str) -> Option<&Union> {
        self.unions.iter().find(|u| u.name == name)
    }

    /// Resolves a wire reference such as `vl_api_address_t` to the object name.
    pub fn resolve_ref(&self, type_ref: &str) -> Option<&str> {
        self.ref_map.get(type_ref).map(String::as_str)
    }

    /// Registers an object under its wire reference.
    pub fn register_ref(&mut self, name: &str) {
        self.ref_map.insert(api_type_ref(name), name.to_string());
    }

    pub fn census(&self) -> Census {
        Census {
            enums: self.enums.len(),
            aliases: self.aliases.len(),
            types: self.types.len(),
            unions: self.unions.len(),
            messages: self.messages.len(),
            services: self.services.len(),
        }
    }
}

impl Census {
    /// Kind/count pairs in emission order.
    pub fn entries(&self) -> [(&'static str, usize); 6] {
        [
            ("enum", self.enums),
            ("alias", self.aliases),
            ("type", self.types),
            ("union", self.unions),
            ("message", self.messages),
            ("service", self.services),
        ]
    }
}
