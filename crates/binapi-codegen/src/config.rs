//! Generation options

use serde::{Deserialize, Serialize};

/// Switches controlling optional parts of the generated bindings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
    /// Emit `APIVersion` and `VersionCrc` constants
    pub include_api_version: bool,

    /// Reproduce each object's JSON definition as a comment
    pub include_comments: bool,

    /// Add `binapi:"<name>"` tags with the original field names
    pub include_binapi_names: bool,

    /// Emit the `Service` interface with its client implementation
    pub include_services: bool,
}

impl GenerateOptions {
    /// Options with every optional part enabled
    pub fn all() -> Self {
        Self {
            include_api_version: true,
            include_comments: true,
            include_binapi_names: true,
            include_services: true,
        }
    }

    /// Overlay switches that are turned on in `other`.
    ///
    /// A flag can enable an option but never disable one set elsewhere.
    pub fn merge(self, other: GenerateOptions) -> Self {
        Self {
            include_api_version: self.include_api_version || other.include_api_version,
            include_comments: self.include_comments || other.include_comments,
            include_binapi_names: self.include_binapi_names || other.include_binapi_names,
            include_services: self.include_services || other.include_services,
        }
    }
}
