//! Vocabulary bindings
//!
//! Each submodule exposes the vocabulary's IRIs as constants and, where
//! the vocabulary describes structured data, typed views over
//! [`Resource`](crate::model::Resource).

pub mod crypto;
pub mod dc;
pub mod dicto;
pub mod rdf;
pub mod rdfa;
pub mod rdfs;
pub mod vcard;

pub use crypto::{Digest, DigestAlgorithm};
pub use dc::DublinCore;
pub use dicto::{Dictionary, Entry};
pub use rdfs::{Described, RdfProperty, RdfsClass};
pub use vcard::{Address, Name, Organization, VCard};
