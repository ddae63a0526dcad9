use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared accessibility of a type, member or accessor.
///
/// Top-level types without a modifier are internal, hence the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    #[default]
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {
    pub fn is_public(self) -> bool {
        matches!(self, Accessibility::Public)
    }

    /// Source keyword(s) for this accessibility.
    pub fn keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
