//! # ifacegen-model
//!
//! The declaration model consumed by interface synthesis. A host compiler
//! describes a concrete type (possibly split across several partial
//! fragments) with these types; the kernel derives a contract from them.
//!
//! Everything here is plain, fully materialized data. Nullability, accessor
//! presence and opt-in/opt-out markers are explicit fields populated once at
//! ingestion, never inferred from type shape later.
//!
//! ## Architecture
//!
//! ```text
//! PartialFragment       ← one declaration site of a type (host supplied)
//!     │  (merged by the kernel's walker)
//! TypeDeclaration       ← frozen, merged view of all fragments
//!     │
//! MemberDescriptor      ← Method | Property | Indexer | Event
//!     │
//! ParameterDescriptor   ← name, TypeRef, PassingMode, DefaultValue
//! ```

pub mod accessibility;
pub mod constant;
pub mod declaration;
pub mod error;
pub mod generics;
pub mod member;
pub mod types;

pub use accessibility::Accessibility;
pub use constant::{ConstantValue, DefaultValue, IntWidth, UIntWidth};
pub use declaration::{DeclarationParts, PartialFragment, TypeDeclaration};
pub use error::{ErrorKind, GenerationError};
pub use generics::{GenericConstraints, GenericParameter, PrimaryConstraint};
pub use member::{
    Accessor, AccessorPair, EventSignature, IndexerSignature, MemberDescriptor, MemberKind,
    MethodSignature, ParameterDescriptor, PassingMode, PropertySignature, ReturnMode, Setter,
};
pub use types::{NamedType, SpecialType, TypeKind, TypeRef};
