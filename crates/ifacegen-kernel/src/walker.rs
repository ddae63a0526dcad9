//! Symbol walker: merge partial fragments into one frozen declaration.
//!
//! Fragments are accumulated into a [`SymbolWalker`] and frozen exactly once.
//! Nothing downstream ever sees a half-merged declaration.
//!
//! Merge rules:
//! - members are identified by name, shape and signature, not by origin; the
//!   first contribution of an identity wins and keeps its position
//! - compiler-synthesized members never surface
//! - the opt-in marker is the OR across fragments
//! - every fragment lists the same generic parameter names; constraints may
//!   be declared by any one fragment, and a different non-empty set on
//!   another fragment is a conflict

use ifacegen_model::{
    Accessibility, DeclarationParts, GenerationError, GenericParameter, MemberDescriptor,
    MemberKind, ParameterDescriptor, PartialFragment, PassingMode, TypeDeclaration,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Identity of a member across fragments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MemberIdentity {
    pub name: String,
    pub shape: &'static str,
    pub arity: usize,
    pub parameters: Vec<(PassingMode, String)>,
}

impl MemberIdentity {
    pub fn of(member: &MemberDescriptor) -> Self {
        let (arity, parameters) = match &member.kind {
            MemberKind::Method(sig) => (sig.generic_parameters.len(), signature(&sig.parameters)),
            MemberKind::Indexer(sig) => (0, signature(&sig.parameters)),
            MemberKind::Property(_) | MemberKind::Event(_) => (0, Vec::new()),
        };
        Self {
            name: member.name.clone(),
            shape: member.kind.tag(),
            arity,
            parameters,
        }
    }
}

fn signature(parameters: &[ParameterDescriptor]) -> Vec<(PassingMode, String)> {
    parameters
        .iter()
        .map(|p| (p.mode, p.ty.display()))
        .collect()
}

/// Accumulates fragments of one type, then freezes them.
#[derive(Debug, Default)]
pub struct SymbolWalker {
    identity: Option<(String, String)>,
    accessibility: Option<Accessibility>,
    include_in_contract: bool,
    interface_name: Option<String>,
    generic_parameters: Option<Vec<GenericParameter>>,
    members: Vec<MemberDescriptor>,
    seen: BTreeSet<MemberIdentity>,
}

impl SymbolWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one fragment's contributions.
    pub fn add_fragment(&mut self, fragment: PartialFragment) -> Result<(), GenerationError> {
        let type_name = fragment.qualified_name();
        let (namespace, name) = self
            .identity
            .get_or_insert_with(|| (fragment.namespace.clone(), fragment.name.clone()));
        if *namespace != fragment.namespace || *name != fragment.name {
            return Err(GenerationError::FragmentIdentityMismatch {
                type_name: qualified(namespace, name),
                detail: format!(
                    "fragment{} declares {type_name}",
                    origin_suffix(fragment.origin.as_deref())
                ),
            });
        }

        if let Some(accessibility) = fragment.accessibility {
            match self.accessibility {
                None => self.accessibility = Some(accessibility),
                Some(existing) if existing != accessibility => {
                    return Err(GenerationError::FragmentIdentityMismatch {
                        type_name,
                        detail: format!(
                            "fragment{} is `{accessibility}` but another is `{existing}`",
                            origin_suffix(fragment.origin.as_deref())
                        ),
                    });
                }
                Some(_) => {}
            }
        }

        self.include_in_contract |= fragment.generate;
        if self.interface_name.is_none() {
            self.interface_name = fragment.interface_name;
        }

        self.merge_generics(&type_name, fragment.generic_parameters)?;

        for member in fragment.members {
            if member.is_synthesized {
                continue;
            }
            let identity = MemberIdentity::of(&member);
            if self.seen.contains(&identity) {
                debug!(
                    type_name = %type_name,
                    member = %member.name,
                    "member already contributed by an earlier fragment"
                );
                continue;
            }
            self.seen.insert(identity);
            self.members.push(member);
        }
        Ok(())
    }

    fn merge_generics(
        &mut self,
        type_name: &str,
        incoming: Vec<GenericParameter>,
    ) -> Result<(), GenerationError> {
        if self.generic_parameters.is_none() {
            self.generic_parameters = Some(incoming);
            return Ok(());
        }
        let existing = self.generic_parameters.get_or_insert_with(Vec::new);

        if existing.len() != incoming.len()
            || existing
                .iter()
                .zip(&incoming)
                .any(|(a, b)| a.name != b.name)
        {
            return Err(GenerationError::MismatchedGenericParameters {
                type_name: type_name.to_string(),
                expected: parameter_names(existing),
                found: parameter_names(&incoming),
            });
        }

        for (current, candidate) in existing.iter_mut().zip(incoming) {
            if candidate.constraints.is_empty() || current.constraints == candidate.constraints {
                continue;
            }
            if current.constraints.is_empty() {
                current.constraints = candidate.constraints;
                continue;
            }
            return Err(GenerationError::ConflictingPartialConstraints {
                type_name: type_name.to_string(),
                parameter: current.name.clone(),
                first: current.constraints.describe(),
                second: candidate.constraints.describe(),
            });
        }
        Ok(())
    }

    /// Freeze the accumulated contributions into a read-only declaration.
    pub fn freeze(self) -> Result<TypeDeclaration, GenerationError> {
        let (namespace, name) = self.identity.ok_or(GenerationError::EmptyDeclaration)?;
        Ok(TypeDeclaration::freeze(DeclarationParts {
            namespace,
            name,
            accessibility: self.accessibility.unwrap_or_default(),
            include_in_contract: self.include_in_contract,
            interface_name: self.interface_name,
            generic_parameters: self.generic_parameters.unwrap_or_default(),
            members: self.members,
        }))
    }
}

/// Merge every fragment of one type and freeze the result.
pub fn walk(
    fragments: impl IntoIterator<Item = PartialFragment>,
) -> Result<TypeDeclaration, GenerationError> {
    let mut walker = SymbolWalker::new();
    for fragment in fragments {
        walker.add_fragment(fragment)?;
    }
    walker.freeze()
}

fn parameter_names(params: &[GenericParameter]) -> String {
    params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn qualified(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

fn origin_suffix(origin: Option<&str>) -> String {
    origin.map(|o| format!(" at {o}")).unwrap_or_default()
}
