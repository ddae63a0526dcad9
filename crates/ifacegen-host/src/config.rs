//! TOML configuration for a host.
//!
//! ```toml
//! [generator]
//! interface_prefix = "I"
//! qualification = "root_anchored"
//! well_known_roots = ["System", "Microsoft"]
//! indent = 4
//! ```
//!
//! Every key is optional; an empty file yields the stock settings.

use ifacegen_kernel::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config at {path}: {message}")]
    Invalid { path: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub generator: GeneratorConfig,
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: display_path(path),
            source,
        })?;
        Self::parse(&text, &display_path(path))
    }

    /// Parse `text`; `path` only labels errors.
    pub fn parse(text: &str, path: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_string(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let generator = &self.generator;
        let prefix_ok = generator
            .interface_prefix
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
        if !prefix_ok {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                message: format!(
                    "interface_prefix {:?} must be identifier characters",
                    generator.interface_prefix
                ),
            });
        }
        if generator.indent == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                message: "indent must be at least 1".to_string(),
            });
        }
        if let Some(root) = generator
            .well_known_roots
            .iter()
            .find(|root| root.is_empty() || root.contains('.'))
        {
            return Err(ConfigError::Invalid {
                path: path.to_string(),
                message: format!("well_known_roots entry {root:?} must be a single segment"),
            });
        }
        Ok(())
    }
}

pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
