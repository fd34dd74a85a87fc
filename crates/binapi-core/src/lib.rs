//! binapi-core - Schema model for VPP binary API modules
//!
//! This crate provides the in-memory view of one `*.api.json` module:
//! - [`Package`] holding enums, aliases, types, unions, messages and services
//! - [`Field`] with its wire layout attributes (fixed length, size-from, limit)
//! - [`Package::from_json`] parser for the VPP API JSON layout
//! - [`SchemaError`] for malformed definitions
//!
//! The model is immutable once parsed; code generators only borrow it.

mod error;
mod model;
mod parse;

pub use error::{SchemaError, SchemaResult};
pub use model::{
    Alias, CLIENT_INDEX_FIELD, CONTEXT_FIELD, CRC_FIELD, Census, Enum, EnumEntry, Field,
    FieldMeta, MSG_ID_FIELD, Message, Package, Service, Type, Union, api_type_ref,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Alias, Enum, EnumEntry, Field, Message, Package, SchemaError, SchemaResult, Service, Type,
        Union,
    };
}
