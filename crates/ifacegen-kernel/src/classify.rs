//! Inclusion filter and member classification.
//!
//! A member is part of the contract iff it is an instance member, carries no
//! exclusion marker, and exposes at least one public side. Getter and setter
//! are judged independently, each against its own effective accessibility.

use ifacegen_model::{Accessibility, AccessorPair, MemberDescriptor, MemberKind, TypeDeclaration};
use serde::Serialize;
use tracing::debug;

/// Which setter form the contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetterKind {
    Set,
    Init,
}

impl SetterKind {
    pub fn keyword(self) -> &'static str {
        match self {
            SetterKind::Set => "set",
            SetterKind::Init => "init",
        }
    }
}

/// Accessor sides kept in the contract. Never both absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContractAccessors {
    pub get: bool,
    pub set: Option<SetterKind>,
}

/// Why a member was left out. All of these are silent, intended outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Static,
    Excluded,
    NotPublic(Accessibility),
    NoPublicAccessor,
}

/// Contract shape of an included member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractShape {
    Method,
    Event,
    Property(ContractAccessors),
    Indexer(ContractAccessors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Include(ContractShape),
    Omit(Exclusion),
}

/// An included member with its accessor inclusion resolved.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedMember<'a> {
    pub member: &'a MemberDescriptor,
    pub shape: ContractShape,
}

/// Classify one member. Omission is never an error.
pub fn classify_member(member: &MemberDescriptor) -> Classification {
    if member.is_static {
        return Classification::Omit(Exclusion::Static);
    }
    if member.is_excluded {
        return Classification::Omit(Exclusion::Excluded);
    }

    let shape = match &member.kind {
        MemberKind::Method(_) | MemberKind::Event(_) => {
            if !member.accessibility.is_public() {
                return Classification::Omit(Exclusion::NotPublic(member.accessibility));
            }
            if matches!(member.kind, MemberKind::Event(_)) {
                ContractShape::Event
            } else {
                ContractShape::Method
            }
        }
        MemberKind::Property(sig) => match resolve_accessors(member, &sig.accessors) {
            Some(accessors) => ContractShape::Property(accessors),
            None => return Classification::Omit(Exclusion::NoPublicAccessor),
        },
        MemberKind::Indexer(sig) => match resolve_accessors(member, &sig.accessors) {
            Some(accessors) => ContractShape::Indexer(accessors),
            None => return Classification::Omit(Exclusion::NoPublicAccessor),
        },
    };
    Classification::Include(shape)
}

/// Public sides of an accessor pair; `None` when no side is public, which
/// includes a pair that declares neither side.
fn resolve_accessors(member: &MemberDescriptor, pair: &AccessorPair) -> Option<ContractAccessors> {
    let effective = |own: Option<Accessibility>| own.unwrap_or(member.accessibility);
    let get = pair
        .getter
        .is_some_and(|getter| effective(getter.accessibility).is_public());
    let set = pair
        .setter
        .filter(|setter| effective(setter.accessibility).is_public())
        .map(|setter| {
            if setter.init_only {
                SetterKind::Init
            } else {
                SetterKind::Set
            }
        });

    if !get && set.is_none() {
        return None;
    }
    Some(ContractAccessors { get, set })
}

/// Classify every member of a declaration, keeping declaration order.
pub fn classify(decl: &TypeDeclaration) -> Vec<ClassifiedMember<'_>> {
    let type_name = decl.qualified_name();
    let mut included = Vec::new();
    for member in decl.members() {
        match classify_member(member) {
            Classification::Include(shape) => included.push(ClassifiedMember { member, shape }),
            Classification::Omit(reason) => {
                debug!(
                    type_name = %type_name,
                    member = %member.name,
                    reason = ?reason,
                    "member omitted from contract"
                );
            }
        }
    }
    included
}
