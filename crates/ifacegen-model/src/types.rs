//! Type references as they appear in signatures.
//!
//! A `TypeRef` carries its own nullability annotation. The annotation is a
//! declared fact copied from the source member; nothing downstream derives
//! it from the referenced type.

use serde::{Deserialize, Serialize};

/// Built-in types that have a keyword form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialType {
    Void,
    Object,
    Bool,
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    NInt,
    NUInt,
    Float,
    Double,
    Decimal,
    String,
    Dynamic,
}

impl SpecialType {
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialType::Void => "void",
            SpecialType::Object => "object",
            SpecialType::Bool => "bool",
            SpecialType::Char => "char",
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Short => "short",
            SpecialType::UShort => "ushort",
            SpecialType::Int => "int",
            SpecialType::UInt => "uint",
            SpecialType::Long => "long",
            SpecialType::ULong => "ulong",
            SpecialType::NInt => "nint",
            SpecialType::NUInt => "nuint",
            SpecialType::Float => "float",
            SpecialType::Double => "double",
            SpecialType::Decimal => "decimal",
            SpecialType::String => "string",
            SpecialType::Dynamic => "dynamic",
        }
    }
}

/// A user or library type identified by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    /// Dotted namespace path; empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    /// Enclosing types, outermost first, for nested types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containing_types: Vec<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,
}

impl NamedType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            containing_types: Vec::new(),
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    /// First namespace segment, if the type is not in the global namespace.
    pub fn root_namespace(&self) -> Option<&str> {
        self.namespace.split('.').next().filter(|s| !s.is_empty())
    }

    /// The name a top-level lookup sees: the outermost containing type, or
    /// the type itself.
    pub fn top_level_name(&self) -> &str {
        self.containing_types
            .first()
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    /// Containing types and name joined with `.`, without namespace or
    /// type arguments.
    pub fn nested_path(&self) -> String {
        let mut out = String::new();
        for outer in &self.containing_types {
            out.push_str(outer);
            out.push('.');
        }
        out.push_str(&self.name);
        out
    }
}

/// Shape of a referenced type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Special { name: SpecialType },
    Named(NamedType),
    TypeParameter { name: String },
    Array { element: Box<TypeRef>, rank: u8 },
}

/// A reference to a type from a signature, with its nullability annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeRef {
    pub fn special(name: SpecialType) -> Self {
        Self {
            kind: TypeKind::Special { name },
            nullable: false,
        }
    }

    pub fn void() -> Self {
        Self::special(SpecialType::Void)
    }

    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Named(NamedType::new(namespace, name)),
            nullable: false,
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::TypeParameter { name: name.into() },
            nullable: false,
        }
    }

    /// Single-dimensional array of `element`.
    pub fn array_of(element: TypeRef) -> Self {
        Self {
            kind: TypeKind::Array {
                element: Box::new(element),
                rank: 1,
            },
            nullable: false,
        }
    }

    /// Attach type arguments. No effect on non-named types.
    pub fn with_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        if let TypeKind::Named(named) = &mut self.kind {
            named.type_arguments = arguments;
        }
        self
    }

    /// Nest inside the given containing types (outermost first).
    pub fn nested_in(mut self, containing: &[&str]) -> Self {
        if let TypeKind::Named(named) = &mut self.kind {
            named.containing_types = containing.iter().map(|s| (*s).to_string()).collect();
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Special {
                name: SpecialType::Void
            }
        )
    }

    /// The reference's own display form: keywords for special types,
    /// dotted namespace paths for named types (no root anchor), and a
    /// trailing `?` when annotated nullable.
    pub fn display(&self) -> String {
        let mut out = String::new();
        self.write_display(&mut out);
        out
    }

    fn write_display(&self, out: &mut String) {
        match &self.kind {
            TypeKind::Special { name } => out.push_str(name.keyword()),
            TypeKind::TypeParameter { name } => out.push_str(name),
            TypeKind::Named(named) => {
                if !named.namespace.is_empty() {
                    out.push_str(&named.namespace);
                    out.push('.');
                }
                out.push_str(&named.nested_path());
                if !named.type_arguments.is_empty() {
                    out.push('<');
                    for (idx, arg) in named.type_arguments.iter().enumerate() {
                        if idx > 0 {
                            out.push_str(", ");
                        }
                        arg.write_display(out);
                    }
                    out.push('>');
                }
            }
            TypeKind::Array { element, rank } => {
                element.write_display(out);
                write_rank(out, *rank);
            }
        }
        if self.nullable {
            out.push('?');
        }
    }
}

/// Append `[]`, `[,]`, ... for an array of the given rank.
pub fn write_rank(out: &mut String, rank: u8) {
    out.push('[');
    for _ in 1..rank.max(1) {
        out.push(',');
    }
    out.push(']');
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_types_display_as_keywords() {
        assert_eq!(TypeRef::special(SpecialType::String).display(), "string");
        assert_eq!(
            TypeRef::special(SpecialType::Bool).nullable().display(),
            "bool?"
        );
        assert_eq!(TypeRef::void().display(), "void");
    }

    #[test]
    fn named_types_display_dotted_with_arguments() {
        let list = TypeRef::named("System.Collections.Generic", "List").with_arguments(vec![
            TypeRef::named("InterfaceGenerator.Tests.SameName_1", "SameNameClass"),
        ]);
        assert_eq!(
            list.display(),
            "System.Collections.Generic.List<InterfaceGenerator.Tests.SameName_1.SameNameClass>"
        );
    }

    #[test]
    fn nested_and_global_types_display_without_leading_dot() {
        let inner = TypeRef::named("", "Inner").nested_in(&["Outer"]);
        assert_eq!(inner.display(), "Outer.Inner");
    }

    #[test]
    fn arrays_display_rank_and_nullability() {
        let strings = TypeRef::array_of(TypeRef::special(SpecialType::String));
        assert_eq!(strings.display(), "string[]");

        let mut grid = TypeRef::array_of(TypeRef::special(SpecialType::Int));
        if let TypeKind::Array { rank, .. } = &mut grid.kind {
            *rank = 2;
        }
        assert_eq!(grid.nullable().display(), "int[,]?");
    }

    #[test]
    fn type_ref_json_shape_is_flat() {
        let value = serde_json::to_value(TypeRef::named("A.B", "C").nullable()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "named", "namespace": "A.B", "name": "C", "nullable": true})
        );

        let parsed: TypeRef =
            serde_json::from_value(serde_json::json!({"kind": "special", "name": "string"}))
                .unwrap();
        assert_eq!(parsed, TypeRef::special(SpecialType::String));
    }
}
