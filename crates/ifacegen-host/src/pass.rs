//! One generation pass over every declaration a host supplied.
//!
//! Declarations are independent: a failure in one is reported as a
//! diagnostic and never stops or alters the units of the others.

use crate::diagnostics::Diagnostic;
use crate::ingest::{FragmentGroup, group_fragments};
use ifacegen_kernel::{
    GeneratedUnit, GeneratorConfig, UnitKey, VisibleTypes, generate, interface_name, walk,
};
use ifacegen_model::{PartialFragment, TypeDeclaration};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Accumulates fragments, then runs once.
#[derive(Debug, Clone, Default)]
pub struct GenerationPass {
    config: GeneratorConfig,
    fragments: Vec<PartialFragment>,
}

/// Everything a pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassOutput {
    pub units: BTreeMap<UnitKey, GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
    /// Metadata names of declarations without the opt-in marker.
    pub skipped: Vec<String>,
}

impl PassOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn unit(&self, key: &str) -> Option<&GeneratedUnit> {
        self.units.get(&UnitKey(key.to_string()))
    }
}

impl GenerationPass {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            fragments: Vec::new(),
        }
    }

    pub fn add_fragment(&mut self, fragment: PartialFragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    pub fn add_fragments(
        &mut self,
        fragments: impl IntoIterator<Item = PartialFragment>,
    ) -> &mut Self {
        self.fragments.extend(fragments);
        self
    }

    pub fn run(self) -> PassOutput {
        let config = self.config;
        let groups = group_fragments(self.fragments);
        let mut output = PassOutput::default();

        // Every type of the pass is visible, including ones that fail to
        // merge, so a fault never changes how other units are qualified.
        let mut visible = VisibleTypes::new();
        for group in &groups {
            visible.insert(&group.namespace, &group.name);
        }

        let mut frozen: Vec<(FragmentGroup, TypeDeclaration)> = Vec::new();
        for group in groups {
            match walk(group.fragments.iter().cloned()) {
                Ok(decl) => {
                    if decl.include_in_contract() {
                        visible.insert(decl.namespace(), &interface_name(&decl, &config));
                    }
                    frozen.push((group, decl));
                }
                Err(error) => {
                    warn!(
                        type_name = %group.key,
                        error = %error,
                        "failed to merge partial declarations"
                    );
                    output
                        .diagnostics
                        .push(Diagnostic::from_error(&group.key, &error, origins(&group)));
                }
            }
        }

        for (group, decl) in &frozen {
            match generate(decl, &visible, &config) {
                Ok(Some(unit)) => {
                    output.units.insert(unit.key.clone(), unit);
                }
                Ok(None) => {
                    debug!(type_name = %group.key, "skipped, not opted in");
                    output.skipped.push(group.key.clone());
                }
                Err(error) => {
                    warn!(type_name = %group.key, error = %error, "failed to generate interface");
                    output
                        .diagnostics
                        .push(Diagnostic::from_error(&group.key, &error, origins(group)));
                }
            }
        }

        info!(
            units = output.units.len(),
            diagnostics = output.diagnostics.len(),
            skipped = output.skipped.len(),
            "generation pass finished"
        );
        output
    }
}

fn origins(group: &FragmentGroup) -> Vec<String> {
    group
        .fragments
        .iter()
        .filter_map(|fragment| fragment.origin.clone())
        .collect()
}
