//! Digest ontology: message digests attached to resources
//!
//! A `crypto:Digest` node records the algorithm (as the XML-Encryption or
//! XML-DSig algorithm IRI) and the digest bytes as `xsd:base64Binary`.
//! Resources point at their digests with `crypto:digest`.

use crate::literal::Base64Binary;
use crate::model::{Model, ModelError, ModelResult, Resource, TypedResource};
use crate::rdf::NamedNode;
use sha2::{Digest as _, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const NS: &str = "https://ontobind.dev/ns/crypto#";

pub const DIGEST_CLASS: &str = "https://ontobind.dev/ns/crypto#Digest";
pub const DIGEST: &str = "https://ontobind.dev/ns/crypto#digest";
pub const ALGORITHM: &str = "https://ontobind.dev/ns/crypto#algorithm";
pub const VALUE: &str = "https://ontobind.dev/ns/crypto#value";

pub const SHA256_IRI: &str = "http://www.w3.org/2001/04/xmlenc#sha256";
pub const SHA384_IRI: &str = "http://www.w3.org/2001/04/xmldsig-more#sha384";
pub const SHA512_IRI: &str = "http://www.w3.org/2001/04/xmlenc#sha512";

/// Algorithm name that matches none of the supported digests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown digest algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 3] = [Self::Sha256, Self::Sha384, Self::Sha512];

    pub fn iri(&self) -> &'static str {
        match self {
            Self::Sha256 => SHA256_IRI,
            Self::Sha384 => SHA384_IRI,
            Self::Sha512 => SHA512_IRI,
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.iri() == iri)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Output size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn hash(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
            Self::Sha384 => Sha384::digest(bytes).to_vec(),
            Self::Sha512 => Sha512::digest(bytes).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UnknownAlgorithm;

    /// Accepts `sha256`, `SHA-256` and the algorithm IRI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(algorithm) = Self::from_iri(s) {
            return Ok(algorithm);
        }
        let normalized = s.to_ascii_lowercase().replace('-', "");
        Self::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// A `crypto:Digest` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(Resource);

impl TypedResource for Digest {
    const TYPE: &'static str = DIGEST_CLASS;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl Digest {
    /// Hash `bytes` into a new blank digest node
    pub fn compute(model: &Model, algorithm: DigestAlgorithm, bytes: &[u8]) -> ModelResult<Self> {
        let digest = Self::create(model, None)?;
        digest.set_algorithm(algorithm)?;
        digest.set_value(&algorithm.hash(bytes))?;
        Ok(digest)
    }

    /// Compute a digest and link it from `resource`
    ///
    /// A digest already attached with the same algorithm is replaced.
    pub fn attach(resource: &Resource, algorithm: DigestAlgorithm, bytes: &[u8]) -> ModelResult<Self> {
        for old in Self::of(resource)? {
            if matches!(old.algorithm(), Ok(a) if a == algorithm) {
                resource.remove_value(DIGEST, old.0.to_object())?;
                old.0.clear();
            }
        }
        let digest = Self::compute(resource.model(), algorithm, bytes)?;
        resource.add_resource(DIGEST, &digest.0)?;
        debug!(resource = %resource, %algorithm, "Attached digest");
        Ok(digest)
    }

    /// Digests linked from `resource`, in insertion order
    pub fn of(resource: &Resource) -> ModelResult<Vec<Self>> {
        Ok(resource
            .get_resources(DIGEST)?
            .into_iter()
            .map(Self::wrap)
            .collect())
    }

    pub fn algorithm(&self) -> ModelResult<DigestAlgorithm> {
        let node = self.0.get_resource(ALGORITHM)?.ok_or_else(|| ModelError::MissingProperty {
            resource: self.0.to_string(),
            predicate: ALGORITHM.to_string(),
        })?;
        let iri = node.iri().unwrap_or_default();
        DigestAlgorithm::from_iri(iri).ok_or_else(|| ModelError::UnsupportedValue {
            predicate: ALGORITHM.to_string(),
            value: node.to_string(),
        })
    }

    pub fn set_algorithm(&self, algorithm: DigestAlgorithm) -> ModelResult<()> {
        self.0.set_property(ALGORITHM, NamedNode::new(algorithm.iri())?)
    }

    pub fn value(&self) -> ModelResult<Vec<u8>> {
        self.0
            .get::<Base64Binary>(VALUE)?
            .map(Base64Binary::into_bytes)
            .ok_or_else(|| ModelError::MissingProperty {
                resource: self.0.to_string(),
                predicate: VALUE.to_string(),
            })
    }

    pub fn set_value(&self, bytes: &[u8]) -> ModelResult<()> {
        self.0.set(VALUE, &Base64Binary::from(bytes))
    }

    /// True when `bytes` hash to the stored value
    pub fn verify(&self, bytes: &[u8]) -> ModelResult<bool> {
        let algorithm = self.algorithm()?;
        Ok(algorithm.hash(bytes) == self.value()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names() {
        assert_eq!("SHA-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("sha512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert_eq!(SHA384_IRI.parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha384);
        assert!("md5".parse::<DigestAlgorithm>().is_err());

        for algorithm in DigestAlgorithm::ALL {
            assert_eq!(algorithm.hash(b"x").len(), algorithm.output_len());
        }
    }

    #[test]
    fn test_known_sha256_vector() {
        let model = Model::new();
        let digest = Digest::compute(&model, DigestAlgorithm::Sha256, b"abc").unwrap();
        let literal = digest.as_resource().property_value(VALUE).unwrap().unwrap();
        assert_eq!(
            literal.as_literal().unwrap().value(),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
        assert!(digest.verify(b"abc").unwrap());
        assert!(!digest.verify(b"abd").unwrap());
    }

    #[test]
    fn test_attach_replaces_same_algorithm() {
        let model = Model::new();
        let file = model.resource("http://example.org/file").unwrap();

        Digest::attach(&file, DigestAlgorithm::Sha256, b"v1").unwrap();
        Digest::attach(&file, DigestAlgorithm::Sha512, b"v1").unwrap();
        let triples = model.len();
        Digest::attach(&file, DigestAlgorithm::Sha256, b"v2").unwrap();

        let digests = Digest::of(&file).unwrap();
        assert_eq!(digests.len(), 2);
        assert_eq!(model.len(), triples);

        let sha256 = digests
            .iter()
            .find(|d| d.algorithm().unwrap() == DigestAlgorithm::Sha256)
            .unwrap();
        assert!(sha256.verify(b"v2").unwrap());
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let model = Model::new();
        let digest = Digest::create(&model, None).unwrap();
        digest.set_algorithm(DigestAlgorithm::Sha384).unwrap();
        assert!(matches!(
            digest.verify(b"abc"),
            Err(ModelError::MissingProperty { .. })
        ));
    }

    #[test]
    fn test_unknown_algorithm_iri() {
        let model = Model::new();
        let digest = Digest::create(&model, None).unwrap();
        digest
            .as_resource()
            .set_property(ALGORITHM, NamedNode::new("http://example.org/md5").unwrap())
            .unwrap();
        assert!(matches!(
            digest.algorithm(),
            Err(ModelError::UnsupportedValue { .. })
        ));
    }
}
