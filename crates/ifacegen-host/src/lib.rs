//! # ifacegen-host
//!
//! The adapter between a host compiler and the interface-synthesis kernel.
//! Hosts hand over partial fragments as JSON, configure the generator with a
//! TOML file, and run a [`GenerationPass`] that yields one unit per opted-in
//! type plus coded diagnostics for the declarations that failed.

pub mod config;
pub mod diagnostics;
pub mod ingest;
pub mod pass;

pub use config::{ConfigError, HostConfig};
pub use diagnostics::{Diagnostic, DiagnosticMapping, Severity, map_error_kind};
pub use ingest::{
    FragmentGroup, IngestError, fragment_key, group_fragments, load_fragments, parse_fragments,
};
pub use pass::{GenerationPass, PassOutput};
