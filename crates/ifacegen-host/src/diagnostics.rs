//! Coded diagnostics for per-declaration failures.

use ifacegen_model::{ErrorKind, GenerationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMapping {
    pub code: &'static str,
    pub severity: Severity,
    pub title: &'static str,
}

pub mod code {
    pub const CONFLICTING_PARTIAL_CONSTRAINTS: &str = "IFG0001";
    pub const MISMATCHED_GENERIC_PARAMETERS: &str = "IFG0002";
    pub const FRAGMENT_IDENTITY_MISMATCH: &str = "IFG0003";
    pub const UNREPRODUCIBLE_MEMBER_SHAPE: &str = "IFG0004";
    pub const EMPTY_DECLARATION: &str = "IFG0005";
}

pub fn map_error_kind(kind: ErrorKind) -> DiagnosticMapping {
    match kind {
        ErrorKind::ConflictingPartialConstraints => DiagnosticMapping {
            code: code::CONFLICTING_PARTIAL_CONSTRAINTS,
            severity: Severity::Error,
            title: "Conflicting generic constraints across partial declarations",
        },
        ErrorKind::MismatchedGenericParameters => DiagnosticMapping {
            code: code::MISMATCHED_GENERIC_PARAMETERS,
            severity: Severity::Error,
            title: "Partial declarations disagree on generic parameters",
        },
        ErrorKind::FragmentIdentityMismatch => DiagnosticMapping {
            code: code::FRAGMENT_IDENTITY_MISMATCH,
            severity: Severity::Error,
            title: "Partial declaration does not match its type",
        },
        ErrorKind::UnreproducibleMemberShape => DiagnosticMapping {
            code: code::UNREPRODUCIBLE_MEMBER_SHAPE,
            severity: Severity::Error,
            title: "Member cannot be expressed in the interface",
        },
        ErrorKind::EmptyDeclaration => DiagnosticMapping {
            code: code::EMPTY_DECLARATION,
            severity: Severity::Warning,
            title: "Declaration has no partial fragments",
        },
    }
}

/// One failed declaration of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub kind: ErrorKind,
    /// Metadata name of the declaration the failure belongs to.
    pub type_name: String,
    pub message: String,
    /// Origins of the fragments involved, in ingestion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<String>,
}

impl Diagnostic {
    pub fn from_error(
        type_name: impl Into<String>,
        error: &GenerationError,
        origins: Vec<String>,
    ) -> Self {
        let kind = error.kind();
        let mapping = map_error_kind(kind);
        Self {
            code: mapping.code.to_string(),
            severity: mapping.severity,
            kind,
            type_name: type_name.into(),
            message: error.to_string(),
            origins,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
