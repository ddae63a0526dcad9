//! Collision-proof type references.
//!
//! Qualification is a pure function of the referenced type, the namespace
//! being generated into, the generic parameters in scope and the set of
//! top-level types visible in the current pass. Nothing is cached across
//! passes.
//!
//! - special types render as keywords, type parameters by name
//! - a nullable-annotated reference renders as its own display form
//! - well-known roots (`System`, `Microsoft` by default) keep dotted names
//! - every other named type is `global::`-anchored, unless the `Shortest`
//!   policy can prove the simple name unambiguous

use crate::config::{GeneratorConfig, QualificationPolicy};
use ifacegen_model::types::write_rank;
use ifacegen_model::{GenericParameter, NamedType, TypeDeclaration, TypeKind, TypeRef};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Top-level type names visible in one generation pass, by simple name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibleTypes {
    by_name: BTreeMap<String, BTreeSet<String>>,
}

impl VisibleTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every declaration of the pass together with the interface it will
    /// produce.
    pub fn for_pass<'a>(
        declarations: impl IntoIterator<Item = &'a TypeDeclaration>,
        config: &GeneratorConfig,
    ) -> Self {
        let mut visible = Self::new();
        for decl in declarations {
            visible.insert(decl.namespace(), decl.name());
            if decl.include_in_contract() {
                visible.insert(decl.namespace(), &interface_name(decl, config));
            }
        }
        visible
    }

    pub fn insert(&mut self, namespace: &str, name: &str) {
        self.by_name
            .entry(name.to_string())
            .or_default()
            .insert(namespace.to_string());
    }

    pub fn namespaces_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.by_name.get(name)
    }

    /// True when `name` is visible in exactly one namespace, `namespace`.
    pub fn is_unique_in(&self, name: &str, namespace: &str) -> bool {
        self.namespaces_of(name)
            .is_some_and(|namespaces| namespaces.len() == 1 && namespaces.contains(namespace))
    }
}

/// The interface name generated for `decl`.
pub fn interface_name(decl: &TypeDeclaration, config: &GeneratorConfig) -> String {
    decl.interface_name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", config.interface_prefix, decl.name()))
}

/// Renders type references for one declaration (and, scoped, its members).
#[derive(Debug, Clone)]
pub struct NameResolver<'a> {
    config: &'a GeneratorConfig,
    visible: &'a VisibleTypes,
    namespace: &'a str,
    type_parameters: Vec<String>,
}

impl<'a> NameResolver<'a> {
    pub fn new(config: &'a GeneratorConfig, visible: &'a VisibleTypes, namespace: &'a str) -> Self {
        Self {
            config,
            visible,
            namespace,
            type_parameters: Vec::new(),
        }
    }

    /// A resolver that additionally has `parameters` in scope.
    pub fn with_type_parameters<'p>(
        &self,
        parameters: impl IntoIterator<Item = &'p GenericParameter>,
    ) -> NameResolver<'a> {
        let mut scoped = self.clone();
        scoped
            .type_parameters
            .extend(parameters.into_iter().map(|p| p.name.clone()));
        scoped
    }

    pub fn resolve(&self, ty: &TypeRef) -> String {
        if ty.nullable {
            return ty.display();
        }
        match &ty.kind {
            TypeKind::Special { name } => name.keyword().to_string(),
            TypeKind::TypeParameter { name } => name.clone(),
            TypeKind::Array { element, rank } => {
                let mut out = self.resolve(element);
                write_rank(&mut out, *rank);
                out
            }
            TypeKind::Named(named) => self.resolve_named(named),
        }
    }

    fn resolve_named(&self, named: &NamedType) -> String {
        let mut tail = named.nested_path();
        if !named.type_arguments.is_empty() {
            let arguments: Vec<String> = named
                .type_arguments
                .iter()
                .map(|arg| self.resolve(arg))
                .collect();
            tail.push('<');
            tail.push_str(&arguments.join(", "));
            tail.push('>');
        }

        if named
            .root_namespace()
            .is_some_and(|root| self.config.is_well_known_root(root))
        {
            return format!("{}.{tail}", named.namespace);
        }

        if self.config.qualification == QualificationPolicy::Shortest {
            if self.is_unambiguous(named) {
                return tail;
            }
            trace!(
                namespace = %named.namespace,
                name = %named.name,
                "short name is ambiguous, using root-anchored reference"
            );
        }

        if named.namespace.is_empty() {
            format!("global::{tail}")
        } else {
            format!("global::{}.{tail}", named.namespace)
        }
    }

    fn is_unambiguous(&self, named: &NamedType) -> bool {
        let lookup = named.top_level_name();
        named.namespace == self.namespace
            && !self.type_parameters.iter().any(|p| p == lookup)
            && self.visible.is_unique_in(lookup, &named.namespace)
    }
}
