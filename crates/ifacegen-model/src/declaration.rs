//! Partial fragments and the frozen declaration they merge into.

use crate::accessibility::Accessibility;
use crate::generics::GenericParameter;
use crate::member::MemberDescriptor;
use serde::{Deserialize, Serialize};

/// One declaration site of a (possibly partial) type, as the host saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFragment {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    /// `None` when this fragment carries no accessibility modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    /// Opt-in marker present on this fragment.
    #[serde(default)]
    pub generate: bool,
    /// Explicit interface name supplied with the opt-in marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
    /// Location label for diagnostics (file path, span, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl PartialFragment {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            accessibility: None,
            generate: false,
            interface_name: None,
            generic_parameters: Vec::new(),
            members: Vec::new(),
            origin: None,
        }
    }

    pub fn opted_in(mut self) -> Self {
        self.generate = true;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    pub fn with_generic(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Dotted fully qualified source name of the type this fragment belongs to.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Metadata name of the type this fragment belongs to; fragments of one
    /// type share it.
    pub fn metadata_name(&self) -> String {
        with_arity(self.qualified_name(), self.generic_parameters.len())
    }
}

/// Everything a frozen declaration holds, assembled by the walker.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationParts {
    pub namespace: String,
    pub name: String,
    pub accessibility: Accessibility,
    pub include_in_contract: bool,
    pub interface_name: Option<String>,
    pub generic_parameters: Vec<GenericParameter>,
    pub members: Vec<MemberDescriptor>,
}

/// The merged, frozen description of a type. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    namespace: String,
    name: String,
    accessibility: Accessibility,
    include_in_contract: bool,
    interface_name: Option<String>,
    generic_parameters: Vec<GenericParameter>,
    members: Vec<MemberDescriptor>,
}

impl TypeDeclaration {
    pub fn freeze(parts: DeclarationParts) -> Self {
        Self {
            namespace: parts.namespace,
            name: parts.name,
            accessibility: parts.accessibility,
            include_in_contract: parts.include_in_contract,
            interface_name: parts.interface_name,
            generic_parameters: parts.generic_parameters,
            members: parts.members,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn include_in_contract(&self) -> bool {
        self.include_in_contract
    }

    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    pub fn generic_parameters(&self) -> &[GenericParameter] {
        &self.generic_parameters
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Dotted fully qualified name, e.g. `Ns.Inner.Type`.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Fully qualified metadata name: the qualified name plus a backtick
    /// arity suffix for generic types (`Ns.Type`2`), so `Type` and
    /// `Type<T>` never share a name.
    pub fn metadata_name(&self) -> String {
        with_arity(self.qualified_name(), self.generic_parameters.len())
    }
}

fn with_arity(qualified: String, arity: usize) -> String {
    match arity {
        0 => qualified,
        arity => format!("{qualified}`{arity}"),
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
