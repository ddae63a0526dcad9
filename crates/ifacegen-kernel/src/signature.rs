//! Signature reproduction.
//!
//! Rebuilds each included member as a contract member: resolved type
//! references, escaped identifiers, passing modes, generic parameters with
//! their constraints in declared order, and rendered defaults. Nullability is
//! taken from the source references as declared.

use crate::classify::{ClassifiedMember, ContractAccessors, ContractShape};
use crate::defaults::{literal_problem, render_default};
use crate::ident::escape_identifier;
use crate::resolve::NameResolver;
use ifacegen_model::{
    GenerationError, GenericConstraints, GenericParameter, MemberDescriptor, MemberKind,
    ParameterDescriptor, PassingMode, ReturnMode, TypeKind,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// A generic parameter as it appears on the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractGenericParameter {
    pub name: String,
    /// The source constraint set, carried unchanged.
    pub constraints: GenericConstraints,
    /// Rendered constraint list for the `where` clause; empty when
    /// unconstrained.
    pub clause: Vec<String>,
}

impl ContractGenericParameter {
    pub fn where_clause(&self) -> Option<String> {
        if self.clause.is_empty() {
            None
        } else {
            Some(format!("where {} : {}", self.name, self.clause.join(", ")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractParameter {
    pub name: String,
    pub ty: String,
    pub mode: PassingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ContractParameter {
    pub fn is_variadic(&self) -> bool {
        self.mode == PassingMode::Params
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(keyword) = self.mode.keyword() {
            out.push_str(keyword);
            out.push(' ');
        }
        out.push_str(&self.ty);
        out.push(' ');
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractMethod {
    pub return_type: String,
    pub return_mode: ReturnMode,
    pub generic_parameters: Vec<ContractGenericParameter>,
    pub parameters: Vec<ContractParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractProperty {
    pub ty: String,
    pub accessors: ContractAccessors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractIndexer {
    pub ty: String,
    pub parameters: Vec<ContractParameter>,
    pub accessors: ContractAccessors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractEvent {
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum ContractMemberKind {
    Method(ContractMethod),
    Property(ContractProperty),
    Indexer(ContractIndexer),
    Event(ContractEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractMember {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<String>,
    #[serde(flatten)]
    pub kind: ContractMemberKind,
}

/// Reproduces members of one declaration.
pub struct SignatureReproducer<'r, 'a> {
    type_name: &'r str,
    resolver: &'r NameResolver<'a>,
}

impl<'r, 'a> SignatureReproducer<'r, 'a> {
    pub fn new(type_name: &'r str, resolver: &'r NameResolver<'a>) -> Self {
        Self {
            type_name,
            resolver,
        }
    }

    pub fn reproduce(
        &self,
        classified: &ClassifiedMember<'_>,
    ) -> Result<ContractMember, GenerationError> {
        let member = classified.member;
        let kind = match (&member.kind, classified.shape) {
            (MemberKind::Method(sig), ContractShape::Method) => {
                let scoped = self.resolver.with_type_parameters(&sig.generic_parameters);
                ContractMemberKind::Method(ContractMethod {
                    return_type: scoped.resolve(&sig.return_type),
                    return_mode: sig.return_mode,
                    generic_parameters: self.generic_parameters(
                        member,
                        &sig.generic_parameters,
                        &scoped,
                    )?,
                    parameters: self.parameters(member, &sig.parameters, &scoped)?,
                })
            }
            (MemberKind::Property(sig), ContractShape::Property(accessors)) => {
                ContractMemberKind::Property(ContractProperty {
                    ty: self.resolver.resolve(&sig.ty),
                    accessors,
                })
            }
            (MemberKind::Indexer(sig), ContractShape::Indexer(accessors)) => {
                if sig.parameters.is_empty() {
                    return Err(self.unreproducible(member, "indexer has no index parameters"));
                }
                if sig.parameters.iter().any(|p| p.mode == PassingMode::Out) {
                    return Err(self.unreproducible(member, "indexer parameters cannot be `out`"));
                }
                ContractMemberKind::Indexer(ContractIndexer {
                    ty: self.resolver.resolve(&sig.ty),
                    parameters: self.parameters(member, &sig.parameters, self.resolver)?,
                    accessors,
                })
            }
            (MemberKind::Event(sig), ContractShape::Event) => {
                ContractMemberKind::Event(ContractEvent {
                    ty: self.resolver.resolve(&sig.ty),
                })
            }
            (kind, shape) => {
                return Err(self.unreproducible(
                    member,
                    &format!("{} classified as {shape:?}", kind.tag()),
                ));
            }
        };

        let name = match &member.kind {
            MemberKind::Indexer(_) => "this".to_string(),
            _ => self.identifier(member, &member.name)?,
        };

        Ok(ContractMember {
            name,
            documentation: member.documentation.clone(),
            kind,
        })
    }

    fn parameters(
        &self,
        member: &MemberDescriptor,
        parameters: &[ParameterDescriptor],
        resolver: &NameResolver<'_>,
    ) -> Result<Vec<ContractParameter>, GenerationError> {
        let mut names = BTreeSet::new();
        let mut out = Vec::with_capacity(parameters.len());
        for (idx, param) in parameters.iter().enumerate() {
            if param.is_variadic() && idx + 1 != parameters.len() {
                return Err(self.unreproducible(
                    member,
                    &format!("`params` parameter `{}` is not last", param.name),
                ));
            }
            if param.is_variadic() && !matches!(param.ty.kind, TypeKind::Array { rank: 1, .. }) {
                return Err(self.unreproducible(
                    member,
                    &format!("`params` parameter `{}` is not a single-rank array", param.name),
                ));
            }
            if param.default.is_some()
                && matches!(
                    param.mode,
                    PassingMode::Ref | PassingMode::Out | PassingMode::Params
                )
            {
                return Err(self.unreproducible(
                    member,
                    &format!("parameter `{}` cannot have a default in its mode", param.name),
                ));
            }
            let problem = param
                .default
                .as_ref()
                .and_then(|default| literal_problem(default.value()));
            if let Some(problem) = problem {
                return Err(self.unreproducible(
                    member,
                    &format!("default of parameter `{}`: {problem}", param.name),
                ));
            }
            let name = self.identifier(member, &param.name)?;
            if !names.insert(name.trim_start_matches('@').to_string()) {
                return Err(self.unreproducible(
                    member,
                    &format!("duplicate parameter name `{}`", param.name),
                ));
            }
            out.push(ContractParameter {
                name,
                ty: resolver.resolve(&param.ty),
                mode: param.mode,
                default: param
                    .default
                    .as_ref()
                    .map(|default| render_default(default, resolver)),
            });
        }
        Ok(out)
    }

    /// Reproduce a generic parameter list; shared with the type level.
    pub fn generic_parameters(
        &self,
        member: &MemberDescriptor,
        parameters: &[GenericParameter],
        resolver: &NameResolver<'_>,
    ) -> Result<Vec<ContractGenericParameter>, GenerationError> {
        parameters
            .iter()
            .map(|param| {
                let name = self.identifier(member, &param.name)?;
                Ok(reproduce_generic_parameter(name, param, resolver))
            })
            .collect()
    }

    fn identifier(&self, member: &MemberDescriptor, name: &str) -> Result<String, GenerationError> {
        escape_identifier(name).ok_or_else(|| {
            self.unreproducible(member, &format!("`{name}` is not a valid identifier"))
        })
    }

    fn unreproducible(&self, member: &MemberDescriptor, reason: &str) -> GenerationError {
        GenerationError::unreproducible(self.type_name, &member.name, reason)
    }
}

/// Render one generic parameter's constraint clause in declared order.
pub fn reproduce_generic_parameter(
    name: String,
    param: &GenericParameter,
    resolver: &NameResolver<'_>,
) -> ContractGenericParameter {
    let constraints = &param.constraints;
    let mut clause = Vec::new();
    if let Some(primary) = constraints.primary {
        clause.push(primary.keyword().to_string());
    }
    clause.extend(constraints.types.iter().map(|ty| resolver.resolve(ty)));
    if constraints.constructor {
        clause.push("new()".to_string());
    }
    ContractGenericParameter {
        name,
        constraints: constraints.clone(),
        clause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, SetterKind, classify_member};
    use crate::config::GeneratorConfig;
    use crate::resolve::VisibleTypes;
    use ifacegen_model::{
        AccessorPair, ConstantValue, DefaultValue, MethodSignature, SpecialType, TypeRef,
    };

    const TYPE: &str = "Speckle.InterfaceGenerator.Tests.MethodsTestService";
    const NS: &str = "Speckle.InterfaceGenerator.Tests";

    fn string() -> TypeRef {
        TypeRef::special(SpecialType::String)
    }

    fn reproduce(member: MemberDescriptor) -> Result<ContractMember, GenerationError> {
        let config = GeneratorConfig::default();
        let visible = VisibleTypes::new();
        let resolver = NameResolver::new(&config, &visible, NS);
        let reproducer = SignatureReproducer::new(TYPE, &resolver);
        let Classification::Include(shape) = classify_member(&member) else {
            panic!("member should be included");
        };
        reproducer.reproduce(&ClassifiedMember {
            member: &member,
            shape,
        })
    }

    fn method(member: MemberDescriptor) -> ContractMethod {
        match reproduce(member).unwrap().kind {
            ContractMemberKind::Method(method) => method,
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn keyword_parameter_is_escaped() {
        let m = method(MemberDescriptor::method(
            "VoidMethodWithKeywordParam",
            MethodSignature::new(TypeRef::void())
                .with_parameter(ParameterDescriptor::new("void", string())),
        ));
        assert_eq!(m.parameters[0].name, "@void");
        assert_eq!(m.parameters[0].render(), "string @void");
    }

    #[test]
    fn passing_modes_are_preserved() {
        let modes = [
            PassingMode::Ref,
            PassingMode::In,
            PassingMode::Out,
            PassingMode::Value,
        ];
        for mode in modes {
            let m = method(MemberDescriptor::method(
                "M",
                MethodSignature::new(TypeRef::void())
                    .with_parameter(ParameterDescriptor::new("a", string()).with_mode(mode)),
            ));
            assert_eq!(m.parameters[0].mode, mode);
        }
    }

    #[test]
    fn variadic_parameter_stays_variadic() {
        let m = method(MemberDescriptor::method(
            "VoidMethodWithExpandingParam",
            MethodSignature::new(TypeRef::void()).with_parameter(
                ParameterDescriptor::new("strings", TypeRef::array_of(string()))
                    .with_mode(PassingMode::Params),
            ),
        ));
        assert!(m.parameters[0].is_variadic());
        insta::assert_snapshot!(m.parameters[0].render(), @"params string[] strings");
    }

    #[test]
    fn variadic_parameter_must_be_last() {
        let err = reproduce(MemberDescriptor::method(
            "M",
            MethodSignature::new(TypeRef::void())
                .with_parameter(
                    ParameterDescriptor::new("rest", TypeRef::array_of(string()))
                        .with_mode(PassingMode::Params),
                )
                .with_parameter(ParameterDescriptor::new("tail", string())),
        ))
        .unwrap_err();
        assert!(matches!(err, GenerationError::UnreproducibleMemberShape { .. }));
    }

    #[test]
    fn method_generic_constraints_keep_kind_and_order() {
        let m = method(MemberDescriptor::method(
            "GenericVoidMethodWithConstraints",
            MethodSignature::new(TypeRef::void())
                .with_generic(GenericParameter::constrained(
                    "TX",
                    GenericConstraints::default().reference_type(),
                ))
                .with_generic(GenericParameter::constrained(
                    "TY",
                    GenericConstraints::default()
                        .reference_type()
                        .with_type(TypeRef::type_parameter("TX"))
                        .with_constructor(),
                )),
        ));
        let clauses: Vec<Option<String>> = m
            .generic_parameters
            .iter()
            .map(ContractGenericParameter::where_clause)
            .collect();
        assert_eq!(
            clauses,
            vec![
                Some("where TX : class".to_string()),
                Some("where TY : class, TX, new()".to_string()),
            ]
        );
    }

    #[test]
    fn nullable_return_is_carried_through() {
        let m = method(MemberDescriptor::method(
            "StringMethodNullable",
            MethodSignature::new(string().nullable()),
        ));
        assert_eq!(m.return_type, "string?");
    }

    #[test]
    fn defaults_are_rendered_per_parameter() {
        let m = method(MemberDescriptor::method(
            "M",
            MethodSignature::new(TypeRef::void()).with_parameter(
                ParameterDescriptor::new(
                    "nullableNullBoolLiteral",
                    TypeRef::special(SpecialType::Bool).nullable(),
                )
                .with_default(DefaultValue::literal(ConstantValue::Null)),
            ),
        ));
        assert_eq!(
            m.parameters[0].render(),
            "bool? nullableNullBoolLiteral = null"
        );
    }

    #[test]
    fn out_parameter_with_default_is_unreproducible() {
        let err = reproduce(MemberDescriptor::method(
            "M",
            MethodSignature::new(TypeRef::void()).with_parameter(
                ParameterDescriptor::new("a", string())
                    .with_mode(PassingMode::Out)
                    .with_default(DefaultValue::literal(ConstantValue::Null)),
            ),
        ))
        .unwrap_err();
        assert!(matches!(err, GenerationError::UnreproducibleMemberShape { .. }));
    }

    #[test]
    fn char_default_outside_the_basic_plane_is_unreproducible() {
        let emoji = DefaultValue::literal(ConstantValue::Char { value: '\u{1F600}' });
        let err = reproduce(MemberDescriptor::method(
            "M",
            MethodSignature::new(TypeRef::void()).with_parameter(
                ParameterDescriptor::new("c", TypeRef::special(SpecialType::Char))
                    .with_default(emoji),
            ),
        ))
        .unwrap_err();
        assert_eq!(
            err,
            GenerationError::unreproducible(
                TYPE,
                "M",
                "default of parameter `c`: char U+1F600 does not fit one UTF-16 code unit"
            )
        );
    }

    #[test]
    fn indexer_is_named_this_and_keeps_index_parameters() {
        let member = reproduce(MemberDescriptor::indexer(
            TypeRef::special(SpecialType::Int),
            vec![ParameterDescriptor::new("x", string())],
            AccessorPair::get_set(),
        ))
        .unwrap();
        assert_eq!(member.name, "this");
        let ContractMemberKind::Indexer(indexer) = member.kind else {
            panic!("expected indexer");
        };
        assert_eq!(indexer.parameters[0].render(), "string x");
        assert_eq!(indexer.accessors.set, Some(SetterKind::Set));
    }

    #[test]
    fn indexer_without_parameters_is_unreproducible() {
        let err = reproduce(MemberDescriptor::indexer(
            TypeRef::special(SpecialType::Int),
            Vec::new(),
            AccessorPair::get_only(),
        ))
        .unwrap_err();
        assert!(matches!(err, GenerationError::UnreproducibleMemberShape { .. }));
    }

    #[test]
    fn invalid_member_name_is_unreproducible() {
        let err = reproduce(MemberDescriptor::method(
            "not valid",
            MethodSignature::new(TypeRef::void()),
        ))
        .unwrap_err();
        assert_eq!(
            err,
            GenerationError::unreproducible(
                TYPE,
                "not valid",
                "`not valid` is not a valid identifier"
            )
        );
    }
}
