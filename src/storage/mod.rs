//! File-backed storage for a model
//!
//! A [`FileStorage`] keeps one model in one RDF file. Saves go through a
//! temp file in the same directory that is renamed over the live file,
//! after the previous version has been rotated into numbered backups.

mod file;

pub use file::{backup_path, backups, FileStorage, Transaction};

use crate::model::ModelError;
use crate::rdf::{ParseError, RdfFormat, SerializeError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored file could not be read back
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The model could not be written out
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    /// No format configured and none implied by the file extension
    #[error("Cannot infer an RDF format for {0:?}")]
    UnknownFormat(PathBuf),

    /// A binding failed inside an update
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Number of `.bak.N` generations to keep; 0 disables backups
    pub backups: usize,
    /// fsync the data file and its directory on save
    pub sync: bool,
    /// File format; inferred from the extension when unset
    pub format: Option<RdfFormat>,
    /// Base IRI for resolving relative IRIs while parsing
    pub base_iri: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backups: 1,
            sync: true,
            format: None,
            base_iri: None,
        }
    }
}
