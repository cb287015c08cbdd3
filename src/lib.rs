//! Ontobind
//!
//! Typed vocabulary bindings over an in-memory RDF graph, with crash-safe
//! single-file storage.
//!
//! # Layers
//!
//! - [`rdf`]: terms, an insertion-ordered triple store, namespaces and
//!   Turtle / N-Triples / RDF/XML / JSON-LD serialization
//! - [`model`]: the shared [`Model`] handle and the generic [`Resource`]
//!   property-value API
//! - [`literal`]: Rust values as XSD typed literals
//! - [`container`]: `rdf:_n` ordering, Bag / Seq / Alt
//! - [`directory`]: named, path-addressable directory trees
//! - [`vocab`]: Dublin Core, vCard, RDFS, digests, dictionaries and the
//!   RDFa initial context
//! - [`storage`]: file persistence with backups and transactions
//!
//! ## Example Usage
//!
//! ```rust
//! use ontobind::vocab::{DublinCore, Digest, DigestAlgorithm};
//! use ontobind::Model;
//!
//! let model = Model::new();
//! let doc = model.resource("http://example.org/report").unwrap();
//!
//! let dc = DublinCore::new(doc.clone());
//! dc.set_title(Some("Quarterly report")).unwrap();
//! dc.add_creator("Ada").unwrap();
//!
//! let digest = Digest::attach(&doc, DigestAlgorithm::Sha256, b"report body").unwrap();
//! assert!(digest.verify(b"report body").unwrap());
//! assert_eq!(dc.title().unwrap().as_deref(), Some("Quarterly report"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod directory;
pub mod error;
pub mod literal;
pub mod model;
pub mod rdf;
pub mod storage;
pub mod vocab;

pub use config::{Config, ConfigError, ConfigResult};
pub use container::{Alt, Container, ContainerKind, Sequence};
pub use directory::Directory;
pub use error::{Error, Result};
pub use literal::{AnyUri, Base64Binary, LiteralError, LiteralResult, TypedLiteral};
pub use model::{Model, ModelError, ModelResult, Resource, TypedResource};
pub use storage::{FileStorage, StorageConfig, StorageError, StorageResult, Transaction};

pub use rdf::{
    BlankNode, Literal, NamedNode, NamespaceManager, RdfFormat, RdfObject, RdfParser,
    RdfPredicate, RdfSerializer, RdfStore, RdfSubject, Triple,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
