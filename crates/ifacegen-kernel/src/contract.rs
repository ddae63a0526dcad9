//! Contract derivation: one frozen declaration in, one interface model out.

use crate::classify::classify;
use crate::config::GeneratorConfig;
use crate::ident::escape_identifier;
use crate::resolve::{NameResolver, VisibleTypes, interface_name};
use crate::signature::{
    ContractGenericParameter, ContractMember, SignatureReproducer, reproduce_generic_parameter,
};
use ifacegen_model::{Accessibility, GenerationError, TypeDeclaration};
use serde::Serialize;

/// The interface model derived from one declaration, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    /// Metadata name of the source type.
    pub source_name: String,
    pub namespace: String,
    pub interface_name: String,
    /// Either `Public` or `Internal`.
    pub accessibility: Accessibility,
    pub generic_parameters: Vec<ContractGenericParameter>,
    pub members: Vec<ContractMember>,
}

impl GeneratedContract {
    /// `IName<TX, TY>`.
    pub fn declared_name(&self) -> String {
        if self.generic_parameters.is_empty() {
            return self.interface_name.clone();
        }
        let names: Vec<&str> = self
            .generic_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        format!("{}<{}>", self.interface_name, names.join(", "))
    }
}

/// Derive the contract of an opted-in declaration.
///
/// Members keep declaration order. Fails on the first member whose shape
/// cannot be reproduced.
pub fn derive_contract(
    decl: &TypeDeclaration,
    visible: &VisibleTypes,
    config: &GeneratorConfig,
) -> Result<GeneratedContract, GenerationError> {
    let type_name = decl.qualified_name();
    let interface = interface_name(decl, config);
    let interface = escape_identifier(&interface)
        .filter(|escaped| !escaped.starts_with('@'))
        .ok_or_else(|| {
            GenerationError::unreproducible(
                &type_name,
                &interface,
                "interface name is not a valid identifier",
            )
        })?;

    let resolver = NameResolver::new(config, visible, decl.namespace())
        .with_type_parameters(decl.generic_parameters());

    let generic_parameters = decl
        .generic_parameters()
        .iter()
        .map(|param| {
            let name = escape_identifier(&param.name).ok_or_else(|| {
                GenerationError::unreproducible(
                    &type_name,
                    &param.name,
                    "type parameter name is not a valid identifier",
                )
            })?;
            Ok(reproduce_generic_parameter(name, param, &resolver))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    let reproducer = SignatureReproducer::new(&type_name, &resolver);
    let members = classify(decl)
        .iter()
        .map(|classified| {
            let mut member = reproducer.reproduce(classified)?;
            if !config.include_documentation {
                member.documentation.clear();
            }
            Ok(member)
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    let accessibility = if decl.accessibility().is_public() {
        Accessibility::Public
    } else {
        Accessibility::Internal
    };

    Ok(GeneratedContract {
        source_name: decl.metadata_name(),
        namespace: decl.namespace().to_string(),
        interface_name: interface,
        accessibility,
        generic_parameters,
        members,
    })
}
