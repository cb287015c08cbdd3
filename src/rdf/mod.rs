//! RDF graph primitives
//!
//! This module provides the graph every binding reads and writes:
//! - RDF terms and triples (wrapping oxrdf)
//! - an insertion-ordered in-memory triple store
//! - namespace prefixes for compact IRIs
//! - RDF serialization formats (Turtle, N-Triples, RDF/XML, JSON-LD)
//!
//! # Example
//!
//! ```rust
//! use ontobind::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! let triple = Triple::new(subject.clone().into(), predicate, object.into());
//! assert!(store.insert(triple));
//!
//! let results = store.triples_for_subject(&subject.into());
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod serialization;
mod store;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::RdfStore;

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    node_object, JsonLdSerializer, ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer,
    SerializeError, SerializeResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _store: RdfStore = RdfStore::new();
        let _ns_mgr = NamespaceManager::new();
        let _format = RdfFormat::Turtle;
    }
}
