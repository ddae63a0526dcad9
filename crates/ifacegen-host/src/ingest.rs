//! JSON ingestion of partial fragments.
//!
//! A fragment document is either a bare array of fragments or an object
//! with a `fragments` array. Fragments without an origin are labelled with
//! the document they came from.

use crate::config::display_path;
use ifacegen_model::PartialFragment;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read fragments: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fragment json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedDocument {
    fragments: Vec<PartialFragment>,
}

pub fn load_fragments(path: &Path) -> Result<Vec<PartialFragment>, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::ReadFile {
        path: display_path(path),
        source,
    })?;
    parse_fragments(&text, &display_path(path))
}

/// Parse a fragment document; `origin` labels errors and unlabelled fragments.
pub fn parse_fragments(text: &str, origin: &str) -> Result<Vec<PartialFragment>, IngestError> {
    let parse_error = |source| IngestError::ParseJson {
        path: origin.to_string(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(text).map_err(parse_error)?;
    let mut fragments: Vec<PartialFragment> = if value.is_array() {
        serde_json::from_value(value).map_err(parse_error)?
    } else {
        serde_json::from_value::<WrappedDocument>(value)
            .map_err(parse_error)?
            .fragments
    };
    for fragment in &mut fragments {
        if fragment.origin.is_none() {
            fragment.origin = Some(origin.to_string());
        }
    }
    debug!(origin, count = fragments.len(), "ingested fragments");
    Ok(fragments)
}

/// The fragments of one type, keyed by metadata name.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentGroup {
    pub key: String,
    pub namespace: String,
    pub name: String,
    pub fragments: Vec<PartialFragment>,
}

/// Metadata name of the type a fragment belongs to. Generic arity is part of
/// the key, so `Repo` and `Repo<T>` are separate types.
pub fn fragment_key(fragment: &PartialFragment) -> String {
    fragment.metadata_name()
}

/// Group fragments per type, keeping first-seen order of types and of the
/// fragments within each type.
pub fn group_fragments(fragments: impl IntoIterator<Item = PartialFragment>) -> Vec<FragmentGroup> {
    let mut groups: Vec<FragmentGroup> = Vec::new();
    for fragment in fragments {
        let key = fragment_key(&fragment);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.fragments.push(fragment),
            None => groups.push(FragmentGroup {
                key,
                namespace: fragment.namespace.clone(),
                name: fragment.name.clone(),
                fragments: vec![fragment],
            }),
        }
    }
    groups
}
