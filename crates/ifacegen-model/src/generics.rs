use crate::types::TypeRef;
use serde::{Deserialize, Serialize};

/// The at-most-one primary constraint of a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryConstraint {
    /// `class`
    ReferenceType,
    /// `class?`
    NullableReferenceType,
    /// `struct`
    ValueType,
    /// `unmanaged`
    Unmanaged,
    /// `notnull`
    NotNull,
}

impl PrimaryConstraint {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimaryConstraint::ReferenceType => "class",
            PrimaryConstraint::NullableReferenceType => "class?",
            PrimaryConstraint::ValueType => "struct",
            PrimaryConstraint::Unmanaged => "unmanaged",
            PrimaryConstraint::NotNull => "notnull",
        }
    }
}

/// Constraint set of one generic parameter, in declaration order:
/// primary constraint, then base type / interface constraints, then the
/// parameterless-constructor requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PrimaryConstraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub constructor: bool,
}

impl GenericConstraints {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.types.is_empty() && !self.constructor
    }

    pub fn reference_type(mut self) -> Self {
        self.primary = Some(PrimaryConstraint::ReferenceType);
        self
    }

    pub fn value_type(mut self) -> Self {
        self.primary = Some(PrimaryConstraint::ValueType);
        self
    }

    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    /// Human-readable listing used in diagnostics, e.g.
    /// `class, System.IEquatable<TX>, new()`.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "(none)".to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        if let Some(primary) = self.primary {
            parts.push(primary.keyword().to_string());
        }
        parts.extend(self.types.iter().map(TypeRef::display));
        if self.constructor {
            parts.push("new()".to_string());
        }
        parts.join(", ")
    }
}

/// A type- or method-level generic parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    #[serde(default)]
    pub constraints: GenericConstraints,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: GenericConstraints::default(),
        }
    }

    pub fn constrained(name: impl Into<String>, constraints: GenericConstraints) -> Self {
        Self {
            name: name.into(),
            constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_constraints_in_declaration_order() {
        let constraints = GenericConstraints::default()
            .reference_type()
            .with_type(
                TypeRef::named("System", "IEquatable")
                    .with_arguments(vec![TypeRef::type_parameter("TX")]),
            )
            .with_constructor();
        assert_eq!(
            constraints.describe(),
            "class, System.IEquatable<TX>, new()"
        );
        assert_eq!(GenericConstraints::default().describe(), "(none)");
    }
}
