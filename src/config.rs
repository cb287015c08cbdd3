//! Configuration
//!
//! ```yaml
//! storage:
//!   backups: 3
//!   sync: true
//!   format: turtle
//!   base_iri: http://example.org/
//! prefixes:
//!   ex: http://example.org/
//! ```
//!
//! Every key is optional. `ONTOBIND_BACKUPS`, `ONTOBIND_SYNC` and
//! `ONTOBIND_FORMAT` override the file.

use crate::rdf::{NamespaceManager, RdfFormat};
use crate::storage::StorageConfig;
use crate::vocab::{crypto, dicto, rdfa};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_BACKUPS: &str = "ONTOBIND_BACKUPS";
pub const ENV_SYNC: &str = "ONTOBIND_SYNC";
pub const ENV_FORMAT: &str = "ONTOBIND_FORMAT";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Malformed YAML
    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An override that does not parse
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    /// Extra prefixes, added after the built-in ones
    pub prefixes: IndexMap<String, String>,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Apply `ONTOBIND_*` environment variables
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(value) = lookup(ENV_BACKUPS) {
            self.storage.backups = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_BACKUPS,
                value: value.clone(),
            })?;
            debug!("{} override: {}", ENV_BACKUPS, self.storage.backups);
        }
        if let Some(value) = lookup(ENV_SYNC) {
            self.storage.sync = parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_SYNC,
                value: value.clone(),
            })?;
            debug!("{} override: {}", ENV_SYNC, self.storage.sync);
        }
        if let Some(value) = lookup(ENV_FORMAT) {
            let format: RdfFormat = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_FORMAT,
                value: value.clone(),
            })?;
            self.storage.format = Some(format);
            debug!("{} override: {:?}", ENV_FORMAT, format);
        }
        Ok(())
    }

    /// RDFa initial context, the crate's own vocabularies, then configured prefixes
    pub fn namespaces(&self) -> NamespaceManager {
        let mut mgr = rdfa::initial_context();
        mgr.add_prefix("crypto", crypto::NS);
        mgr.add_prefix("dicto", dicto::NS);
        mgr.add_prefix("dir", crate::directory::NS);
        for (prefix, iri) in &self.prefixes {
            mgr.add_prefix(prefix.clone(), iri.clone());
        }
        mgr
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
