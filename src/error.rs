//! Crate-wide error type

use crate::config::ConfigError;
use crate::literal::LiteralError;
use crate::model::ModelError;
use crate::rdf::{ParseError, PrefixError, RdfError, SerializeError};
use crate::storage::StorageError;
use crate::vocab::crypto::UnknownAlgorithm;

/// Any error raised by this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("RDF error: {0}")]
    Rdf(#[from] RdfError),

    #[error("Prefix error: {0}")]
    Prefix(#[from] PrefixError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Literal error: {0}")]
    Literal(#[from] LiteralError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Algorithm(#[from] UnknownAlgorithm),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn open_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/ontobind/file.ttl")?)
    }

    #[test]
    fn test_conversions() {
        assert!(matches!(open_missing(), Err(Error::Io(_))));

        let err: Error = "md5".parse::<crate::vocab::DigestAlgorithm>().unwrap_err().into();
        assert_eq!(err.to_string(), "Unknown digest algorithm: md5");

        let err: Error = ModelError::IndexOutOfRange { index: 3, len: 1 }.into();
        assert!(err.to_string().starts_with("Model error"));
    }
}
