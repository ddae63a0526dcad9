//! # ifacegen-kernel
//!
//! Interface synthesis: derive the interface contract of an opted-in type
//! from its public instance member surface, and render it as source text.
//!
//! The pipeline is pure. The same frozen declaration, visible-type scope and
//! configuration always yield byte-identical output, and nothing is cached
//! between passes.
//!
//! ## Architecture
//!
//! ```text
//! PartialFragment*      ← host-supplied declaration sites
//!     │  walker::SymbolWalker
//! TypeDeclaration       ← frozen, merged
//!     │  classify::classify
//! ClassifiedMember*     ← included members, accessors resolved
//!     │  signature::SignatureReproducer (+ resolve, defaults)
//! GeneratedContract     ← resolved names, escaped identifiers
//!     │  emit::emit
//! GeneratedUnit         ← key, hint name, text, digest
//! ```

pub mod classify;
pub mod config;
pub mod contract;
pub mod defaults;
pub mod emit;
pub mod ident;
pub mod resolve;
pub mod signature;
pub mod walker;

pub use classify::{
    Classification, ClassifiedMember, ContractAccessors, ContractShape, Exclusion, SetterKind,
};
pub use config::{GeneratorConfig, QualificationPolicy};
pub use contract::{GeneratedContract, derive_contract};
pub use emit::{GeneratedUnit, UnitDigest, UnitKey, emit, render_contract};
pub use resolve::{NameResolver, VisibleTypes, interface_name};
pub use signature::{
    ContractEvent, ContractGenericParameter, ContractIndexer, ContractMember, ContractMemberKind,
    ContractMethod, ContractParameter, ContractProperty, SignatureReproducer,
};
pub use walker::{MemberIdentity, SymbolWalker, walk};

use ifacegen_model::{GenerationError, TypeDeclaration};
use tracing::{debug, info};

/// Generate the unit for one declaration.
///
/// Returns `Ok(None)` when the declaration carries no opt-in marker. On error
/// nothing is emitted for this declaration; other declarations of the same
/// pass are unaffected.
pub fn generate(
    decl: &TypeDeclaration,
    scope: &VisibleTypes,
    config: &GeneratorConfig,
) -> Result<Option<GeneratedUnit>, GenerationError> {
    if !decl.include_in_contract() {
        debug!(type_name = %decl.qualified_name(), "not opted in, skipping");
        return Ok(None);
    }

    let contract = derive_contract(decl, scope, config)?;
    let unit = emit(&contract, config);
    info!(
        key = %unit.key,
        interface = %contract.interface_name,
        members = contract.members.len(),
        digest = %unit.digest,
        "generated interface"
    );
    Ok(Some(unit))
}
