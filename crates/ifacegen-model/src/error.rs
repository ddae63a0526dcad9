//! Error types for contract generation.
//!
//! Only genuine failures live here. Omitting a member with no public side,
//! skipping a type without the opt-in marker and falling back to a
//! root-anchored type name are normal outcomes and never produce an error.

use serde::{Deserialize, Serialize};

/// Errors that stop generation for one declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Two fragments declare different constraint sets for the same
    /// generic parameter.
    #[error(
        "conflicting constraints on `{parameter}` of {type_name}: `{first}` vs `{second}`"
    )]
    ConflictingPartialConstraints {
        type_name: String,
        parameter: String,
        first: String,
        second: String,
    },

    /// Fragments disagree on the generic parameter list itself.
    #[error("partial declarations of {type_name} disagree on generic parameters: <{expected}> vs <{found}>")]
    MismatchedGenericParameters {
        type_name: String,
        expected: String,
        found: String,
    },

    /// A fragment was routed to a declaration it does not belong to.
    #[error("fragment does not belong to {type_name}: {detail}")]
    FragmentIdentityMismatch { type_name: String, detail: String },

    /// A member has no mapping to any contract construct.
    #[error("member `{member}` of {type_name} cannot be reproduced: {reason}")]
    UnreproducibleMemberShape {
        type_name: String,
        member: String,
        reason: String,
    },

    /// No fragments were supplied for a declaration.
    #[error("no partial fragments were supplied")]
    EmptyDeclaration,
}

/// Discriminant of a [`GenerationError`], for diagnostic mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConflictingPartialConstraints,
    MismatchedGenericParameters,
    FragmentIdentityMismatch,
    UnreproducibleMemberShape,
    EmptyDeclaration,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::ConflictingPartialConstraints { .. } => {
                ErrorKind::ConflictingPartialConstraints
            }
            GenerationError::MismatchedGenericParameters { .. } => {
                ErrorKind::MismatchedGenericParameters
            }
            GenerationError::FragmentIdentityMismatch { .. } => ErrorKind::FragmentIdentityMismatch,
            GenerationError::UnreproducibleMemberShape { .. } => {
                ErrorKind::UnreproducibleMemberShape
            }
            GenerationError::EmptyDeclaration => ErrorKind::EmptyDeclaration,
        }
    }

    pub fn unreproducible(
        type_name: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GenerationError::UnreproducibleMemberShape {
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }
}
