//! Emitter: render a contract as source text and package it as a unit.
//!
//! Rendering is a pure function of the contract and the layout settings.
//! Members appear in contract order, separated by one blank line.

use crate::classify::ContractAccessors;
use crate::config::GeneratorConfig;
use crate::contract::GeneratedContract;
use crate::signature::{
    ContractGenericParameter, ContractMember, ContractMemberKind, ContractMethod,
    ContractParameter,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a generated unit: the source type's metadata name
/// (`Ns.Type` or ``Ns.Type`2``).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitKey(pub String);

impl UnitKey {
    /// File-system friendly name for the unit, e.g. `Ns.Type_2.g.cs`.
    pub fn hint_name(&self) -> String {
        format!("{}.g.cs", self.0.replace('`', "_"))
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 of a unit's text, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDigest(pub String);

impl UnitDigest {
    pub fn of(text: &str) -> Self {
        let hash = Sha256::digest(text.as_bytes());
        Self(format!("{hash:x}"))
    }
}

impl fmt::Display for UnitDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One emitted source unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUnit {
    pub key: UnitKey,
    pub hint_name: String,
    pub text: String,
    pub digest: UnitDigest,
}

impl GeneratedUnit {
    pub fn new(key: UnitKey, text: String) -> Self {
        Self {
            hint_name: key.hint_name(),
            digest: UnitDigest::of(&text),
            key,
            text,
        }
    }
}

/// Render the unit for `contract`.
pub fn emit(contract: &GeneratedContract, config: &GeneratorConfig) -> GeneratedUnit {
    GeneratedUnit::new(
        UnitKey(contract.source_name.clone()),
        render_contract(contract, config),
    )
}

/// Render `contract` as a complete source file.
pub fn render_contract(contract: &GeneratedContract, config: &GeneratorConfig) -> String {
    let mut writer = SourceWriter::new(config.indent);

    if let Some(header) = &config.header_comment {
        writer.line(header);
    }
    if config.nullable_directive {
        writer.line("#nullable enable");
    }
    if !writer.is_empty() {
        writer.blank();
    }

    let namespaced = !contract.namespace.is_empty();
    if namespaced {
        writer.line(&format!("namespace {}", contract.namespace));
        writer.open();
    }

    writer.line(&format!(
        "{} partial interface {}",
        contract.accessibility.keyword(),
        contract.declared_name()
    ));
    writer.indented(|w| where_clauses(w, &contract.generic_parameters, ""));
    writer.open();
    for (idx, member) in contract.members.iter().enumerate() {
        if idx > 0 {
            writer.blank();
        }
        render_member(&mut writer, member);
    }
    writer.close();

    if namespaced {
        writer.close();
    }
    writer.finish()
}

/// Line terminators of the target language besides `\r\n`.
const LINE_BREAKS: [char; 5] = ['\r', '\n', '\u{85}', '\u{2028}', '\u{2029}'];

fn render_member(writer: &mut SourceWriter, member: &ContractMember) {
    // A documentation entry may carry embedded line breaks; every physical
    // line needs its own comment marker.
    let lines = member
        .documentation
        .iter()
        .flat_map(|entry| entry.split("\r\n"))
        .flat_map(|entry| entry.split(LINE_BREAKS));
    for line in lines {
        if line.is_empty() {
            writer.line("///");
        } else {
            writer.line(&format!("/// {line}"));
        }
    }

    match &member.kind {
        ContractMemberKind::Method(method) => render_method(writer, &member.name, method),
        ContractMemberKind::Property(property) => writer.line(&format!(
            "{} {} {}",
            property.ty,
            member.name,
            accessor_list(property.accessors)
        )),
        ContractMemberKind::Indexer(indexer) => writer.line(&format!(
            "{} this[{}] {}",
            indexer.ty,
            parameter_list(&indexer.parameters),
            accessor_list(indexer.accessors)
        )),
        ContractMemberKind::Event(event) => {
            writer.line(&format!("event {} {};", event.ty, member.name))
        }
    }
}

fn render_method(writer: &mut SourceWriter, name: &str, method: &ContractMethod) {
    let mut head = String::new();
    if let Some(keyword) = method.return_mode.keyword() {
        head.push_str(keyword);
        head.push(' ');
    }
    head.push_str(&method.return_type);
    head.push(' ');
    head.push_str(name);
    if !method.generic_parameters.is_empty() {
        let names: Vec<&str> = method
            .generic_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        head.push('<');
        head.push_str(&names.join(", "));
        head.push('>');
    }
    head.push('(');
    head.push_str(&parameter_list(&method.parameters));
    head.push(')');

    let has_clauses = method
        .generic_parameters
        .iter()
        .any(|p| p.where_clause().is_some());
    if has_clauses {
        writer.line(&head);
        writer.indented(|w| where_clauses(w, &method.generic_parameters, ";"));
    } else {
        head.push(';');
        writer.line(&head);
    }
}

/// One `where` line per constrained parameter; `terminator` ends the last.
fn where_clauses(
    writer: &mut SourceWriter,
    parameters: &[ContractGenericParameter],
    terminator: &str,
) {
    let clauses: Vec<String> = parameters
        .iter()
        .filter_map(ContractGenericParameter::where_clause)
        .collect();
    let last = clauses.len().saturating_sub(1);
    for (idx, clause) in clauses.iter().enumerate() {
        if idx == last {
            writer.line(&format!("{clause}{terminator}"));
        } else {
            writer.line(clause);
        }
    }
}

fn parameter_list(parameters: &[ContractParameter]) -> String {
    parameters
        .iter()
        .map(ContractParameter::render)
        .collect::<Vec<_>>()
        .join(", ")
}

fn accessor_list(accessors: ContractAccessors) -> String {
    let mut out = String::from("{ ");
    if accessors.get {
        out.push_str("get; ");
    }
    if let Some(setter) = accessors.set {
        out.push_str(setter.keyword());
        out.push_str("; ");
    }
    out.push('}');
    out
}

/// Line-oriented writer with brace-driven indentation.
struct SourceWriter {
    out: String,
    depth: usize,
    indent: usize,
}

impl SourceWriter {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent,
        }
    }

    fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth * self.indent {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SetterKind;
    use crate::signature::{ContractEvent, ContractIndexer, ContractProperty};
    use ifacegen_model::{Accessibility, GenericConstraints, PassingMode, ReturnMode};

    fn contract(members: Vec<ContractMember>) -> GeneratedContract {
        GeneratedContract {
            source_name: "App.Service".to_string(),
            namespace: "App".to_string(),
            interface_name: "IService".to_string(),
            accessibility: Accessibility::Public,
            generic_parameters: Vec::new(),
            members,
        }
    }

    fn member(name: &str, kind: ContractMemberKind) -> ContractMember {
        ContractMember {
            name: name.to_string(),
            documentation: Vec::new(),
            kind,
        }
    }

    fn clause(name: &str, parts: &[&str]) -> ContractGenericParameter {
        ContractGenericParameter {
            name: name.to_string(),
            constraints: GenericConstraints::default(),
            clause: parts.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[test]
    fn empty_interface_layout() {
        let text = render_contract(&contract(Vec::new()), &GeneratorConfig::default());
        assert_eq!(
            text,
            "// <auto-generated/>\n\
             #nullable enable\n\
             \n\
             namespace App\n\
             {\n    public partial interface IService\n    {\n    }\n}\n"
        );
    }

    #[test]
    fn global_namespace_has_no_namespace_block() {
        let mut c = contract(Vec::new());
        c.namespace = String::new();
        c.accessibility = Accessibility::Internal;
        let config = GeneratorConfig {
            header_comment: None,
            nullable_directive: false,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            render_contract(&c, &config),
            "internal partial interface IService\n{\n}\n"
        );
    }

    #[test]
    fn members_are_blank_line_separated_with_docs() {
        let mut event = member(
            "Changed",
            ContractMemberKind::Event(ContractEvent {
                ty: "System.EventHandler".to_string(),
            }),
        );
        event.documentation = vec![
            "<summary>".to_string(),
            "Raised.".to_string(),
            "</summary>".to_string(),
        ];
        let property = member(
            "Name",
            ContractMemberKind::Property(ContractProperty {
                ty: "string".to_string(),
                accessors: ContractAccessors {
                    get: true,
                    set: Some(SetterKind::Init),
                },
            }),
        );
        let config = GeneratorConfig::default();
        let text = render_contract(&contract(vec![event, property]), &config);
        assert!(text.contains(
            "        /// <summary>\n\
             \x20       /// Raised.\n\
             \x20       /// </summary>\n\
             \x20       event System.EventHandler Changed;\n\
             \n\
             \x20       string Name { get; init; }\n"
        ));
    }

    #[test]
    fn embedded_line_breaks_in_docs_stay_commented() {
        let mut property = member(
            "Name",
            ContractMemberKind::Property(ContractProperty {
                ty: "string".to_string(),
                accessors: ContractAccessors {
                    get: true,
                    set: None,
                },
            }),
        );
        property.documentation = vec![
            "<summary>\nFirst.\r\nSecond.\n</summary>".to_string(),
            String::new(),
        ];
        let config = GeneratorConfig::default();
        let text = render_contract(&contract(vec![property]), &config);
        assert!(text.contains(
            "        /// <summary>\n\
             \x20       /// First.\n\
             \x20       /// Second.\n\
             \x20       /// </summary>\n\
             \x20       ///\n\
             \x20       string Name { get; }\n"
        ));
    }

    #[test]
    fn method_where_clauses_follow_on_their_own_lines() {
        let method = member(
            "GenericVoidMethodWithConstraints",
            ContractMemberKind::Method(ContractMethod {
                return_type: "void".to_string(),
                return_mode: ReturnMode::Value,
                generic_parameters: vec![
                    clause("TX", &["class"]),
                    clause("TY", &["class", "TX", "new()"]),
                ],
                parameters: Vec::new(),
            }),
        );
        let config = GeneratorConfig::default();
        let text = render_contract(&contract(vec![method]), &config);
        assert!(text.contains(
            "        void GenericVoidMethodWithConstraints<TX, TY>()\n\
             \x20           where TX : class\n\
             \x20           where TY : class, TX, new();\n"
        ));
    }

    #[test]
    fn ref_returns_and_indexers() {
        let method = member(
            "Slot",
            ContractMemberKind::Method(ContractMethod {
                return_type: "int".to_string(),
                return_mode: ReturnMode::RefReadonly,
                generic_parameters: vec![clause("T", &[])],
                parameters: vec![ContractParameter {
                    name: "index".to_string(),
                    ty: "int".to_string(),
                    mode: PassingMode::In,
                    default: None,
                }],
            }),
        );
        let indexer = member(
            "this",
            ContractMemberKind::Indexer(ContractIndexer {
                ty: "string".to_string(),
                parameters: vec![ContractParameter {
                    name: "key".to_string(),
                    ty: "string".to_string(),
                    mode: PassingMode::Value,
                    default: None,
                }],
                accessors: ContractAccessors {
                    get: true,
                    set: None,
                },
            }),
        );
        let config = GeneratorConfig::default();
        let text = render_contract(&contract(vec![method, indexer]), &config);
        assert!(text.contains("        ref readonly int Slot<T>(in int index);\n"));
        assert!(text.contains("        string this[string key] { get; }\n"));
    }

    #[test]
    fn interface_where_clauses_sit_under_the_declaration() {
        let mut c = contract(Vec::new());
        c.generic_parameters = vec![
            clause("TX", &["class", "System.IEquatable<TX>", "new()"]),
            clause("TY", &["struct"]),
        ];
        let text = render_contract(&c, &GeneratorConfig::default());
        assert!(text.contains(
            "    public partial interface IService<TX, TY>\n\
             \x20       where TX : class, System.IEquatable<TX>, new()\n\
             \x20       where TY : struct\n\
             \x20   {\n"
        ));
    }

    #[test]
    fn unit_identity() {
        let key = UnitKey("App.Repo`2".to_string());
        insta::assert_snapshot!(key.hint_name(), @"App.Repo_2.g.cs");
        let unit = GeneratedUnit::new(key, String::new());
        assert_eq!(
            unit.digest.0,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
