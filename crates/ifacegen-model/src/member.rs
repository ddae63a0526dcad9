//! Member descriptors: the raw member surface of a declaration.

use crate::accessibility::Accessibility;
use crate::constant::DefaultValue;
use crate::generics::GenericParameter;
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};

/// How an argument is conveyed to a parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PassingMode {
    #[default]
    Value,
    Ref,
    In,
    Out,
    /// Variadic expansion (`params`).
    Params,
}

impl PassingMode {
    /// Modifier keyword, if the mode has one.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            PassingMode::Value => None,
            PassingMode::Ref => Some("ref"),
            PassingMode::In => Some("in"),
            PassingMode::Out => Some("out"),
            PassingMode::Params => Some("params"),
        }
    }
}

/// How a method returns its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnMode {
    #[default]
    Value,
    Ref,
    RefReadonly,
}

impl ReturnMode {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            ReturnMode::Value => None,
            ReturnMode::Ref => Some("ref"),
            ReturnMode::RefReadonly => Some("ref readonly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub mode: PassingMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            mode: PassingMode::Value,
            default: None,
        }
    }

    pub fn with_mode(mut self, mode: PassingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_variadic(&self) -> bool {
        self.mode == PassingMode::Params
    }

    pub fn is_nullable(&self) -> bool {
        self.ty.nullable
    }
}

/// A getter as declared in source. `accessibility` is `None` when the
/// accessor carries no modifier of its own and inherits the member's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

/// A setter as declared in source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub init_only: bool,
}

/// Declared accessors of a property or indexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<Accessor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<Setter>,
}

impl AccessorPair {
    /// `{ get; set; }` with both sides inheriting the member accessibility.
    pub fn get_set() -> Self {
        Self {
            getter: Some(Accessor::default()),
            setter: Some(Setter::default()),
        }
    }

    pub fn get_only() -> Self {
        Self {
            getter: Some(Accessor::default()),
            setter: None,
        }
    }

    pub fn get_init() -> Self {
        Self {
            getter: Some(Accessor::default()),
            setter: Some(Setter {
                accessibility: None,
                init_only: true,
            }),
        }
    }

    pub fn with_getter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.getter = Some(Accessor {
            accessibility: Some(accessibility),
        });
        self
    }

    pub fn with_setter_accessibility(mut self, accessibility: Accessibility) -> Self {
        let init_only = self.setter.is_some_and(|s| s.init_only);
        self.setter = Some(Setter {
            accessibility: Some(accessibility),
            init_only,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.getter.is_none() && self.setter.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub return_type: TypeRef,
    #[serde(default)]
    pub return_mode: ReturnMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl MethodSignature {
    pub fn new(return_type: TypeRef) -> Self {
        Self {
            return_type,
            return_mode: ReturnMode::Value,
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_generic(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySignature {
    pub ty: TypeRef,
    #[serde(default)]
    pub accessors: AccessorPair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerSignature {
    pub ty: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub accessors: AccessorPair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSignature {
    pub ty: TypeRef,
}

/// The shape-specific part of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberKind {
    Method(MethodSignature),
    Property(PropertySignature),
    Indexer(IndexerSignature),
    Event(EventSignature),
}

impl MemberKind {
    pub fn tag(&self) -> &'static str {
        match self {
            MemberKind::Method(_) => "method",
            MemberKind::Property(_) => "property",
            MemberKind::Indexer(_) => "indexer",
            MemberKind::Event(_) => "event",
        }
    }
}

/// One member contribution of a declaration fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDescriptor {
    pub name: String,
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    /// Explicit opt-out marker on the member.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_excluded: bool,
    /// Compiler-synthesized storage or accessor methods.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_synthesized: bool,
    /// Documentation lines without comment markers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<String>,
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, accessibility: Accessibility, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            accessibility,
            is_static: false,
            is_excluded: false,
            is_synthesized: false,
            documentation: Vec::new(),
            kind,
        }
    }

    pub fn method(name: impl Into<String>, signature: MethodSignature) -> Self {
        Self::new(name, Accessibility::Public, MemberKind::Method(signature))
    }

    pub fn property(name: impl Into<String>, ty: TypeRef, accessors: AccessorPair) -> Self {
        Self::new(
            name,
            Accessibility::Public,
            MemberKind::Property(PropertySignature { ty, accessors }),
        )
    }

    pub fn indexer(
        ty: TypeRef,
        parameters: Vec<ParameterDescriptor>,
        accessors: AccessorPair,
    ) -> Self {
        Self::new(
            "this",
            Accessibility::Public,
            MemberKind::Indexer(IndexerSignature {
                ty,
                parameters,
                accessors,
            }),
        )
    }

    pub fn event(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(
            name,
            Accessibility::Public,
            MemberKind::Event(EventSignature { ty }),
        )
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn excluded(mut self) -> Self {
        self.is_excluded = true;
        self
    }

    pub fn synthesized(mut self) -> Self {
        self.is_synthesized = true;
        self
    }

    pub fn with_documentation(mut self, lines: &[&str]) -> Self {
        self.documentation = lines.iter().map(|l| (*l).to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpecialType;

    #[test]
    fn setter_accessibility_keeps_init_flag() {
        let pair = AccessorPair::get_init().with_setter_accessibility(Accessibility::Private);
        let setter = pair.setter.unwrap();
        assert!(setter.init_only);
        assert_eq!(setter.accessibility, Some(Accessibility::Private));
    }

    #[test]
    fn member_json_uses_member_tag() {
        let json = serde_json::json!({
            "name": "PublicProperty",
            "accessibility": "public",
            "member": "property",
            "ty": {"kind": "special", "name": "string"},
            "accessors": {"getter": {}, "setter": {"accessibility": "private"}}
        });
        let member: MemberDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(
            member,
            MemberDescriptor::property(
                "PublicProperty",
                TypeRef::special(SpecialType::String),
                AccessorPair::get_set().with_setter_accessibility(Accessibility::Private),
            )
        );
    }

    #[test]
    fn variadic_is_queryable() {
        let param = ParameterDescriptor::new(
            "strings",
            TypeRef::array_of(TypeRef::special(SpecialType::String)),
        )
        .with_mode(PassingMode::Params);
        assert!(param.is_variadic());
        assert!(!param.is_nullable());
    }
}
