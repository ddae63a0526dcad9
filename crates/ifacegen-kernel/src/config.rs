//! Generator settings.
//!
//! Defaults reproduce the stock output; hosts override individual keys
//! (see the host crate's TOML loader).

use serde::{Deserialize, Serialize};

/// How user types outside the well-known roots are referenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationPolicy {
    /// Always `global::Namespace.Type`.
    #[default]
    RootAnchored,
    /// The simple name when it is provably unambiguous in the pass,
    /// `global::` otherwise.
    Shortest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Prepended to the type name to form the interface name.
    pub interface_prefix: String,
    pub qualification: QualificationPolicy,
    /// Root namespaces whose types keep their dotted display form.
    pub well_known_roots: Vec<String>,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Emit `#nullable enable` so annotations in signatures are honored.
    pub nullable_directive: bool,
    pub header_comment: Option<String>,
    /// Copy member documentation onto contract members.
    pub include_documentation: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interface_prefix: "I".to_string(),
            qualification: QualificationPolicy::RootAnchored,
            well_known_roots: vec!["System".to_string(), "Microsoft".to_string()],
            indent: 4,
            nullable_directive: true,
            header_comment: Some("// <auto-generated/>".to_string()),
            include_documentation: true,
        }
    }
}

impl GeneratorConfig {
    pub fn is_well_known_root(&self, root: &str) -> bool {
        self.well_known_roots.iter().any(|r| r == root)
    }
}
