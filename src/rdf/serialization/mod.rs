//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//! - JSON-LD (expanded form, serialization only)

mod jsonld;
mod rio;

use super::Triple;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Cursor, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub use jsonld::{node_object, JsonLdSerializer};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf)
    RdfXml,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "rdf" | "xml" | "owl" => Some(RdfFormat::RdfXml),
            "jsonld" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
            RdfFormat::RdfXml => "rdf",
            RdfFormat::JsonLd => "jsonld",
        }
    }
}

impl FromStr for RdfFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "n-triples" | "ntriples" | "nt" => Ok(RdfFormat::NTriples),
            "rdf-xml" | "rdfxml" | "rdf" | "xml" => Ok(RdfFormat::RdfXml),
            "json-ld" | "jsonld" => Ok(RdfFormat::JsonLd),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base IRI rejected
    #[error("Invalid base IRI {0}")]
    InvalidBaseIri(String),

    /// Unsupported format
    #[error("Unsupported format: {0:?}")]
    UnsupportedFormat(RdfFormat),

    /// Name that matches no format
    #[error("Unknown RDF format: {0}")]
    UnknownFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
        Self::parse_reader(Cursor::new(input), format, base_iri)
    }

    /// Parse RDF data from any buffered reader
    pub fn parse_reader(
        reader: impl BufRead,
        format: RdfFormat,
        base_iri: Option<&str>,
    ) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => rio::parse_turtle(reader, base_iri),
            RdfFormat::NTriples => rio::parse_ntriples(reader),
            RdfFormat::RdfXml => rio::parse_rdfxml(reader, base_iri),
            RdfFormat::JsonLd => Err(ParseError::UnsupportedFormat(format)),
        }
    }

    /// Parse RDF data from a file
    pub fn parse_file(path: &Path, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
        let file = std::fs::File::open(path)?;
        Self::parse_reader(std::io::BufReader::new(file), format, base_iri)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize<'a>(
        triples: impl IntoIterator<Item = &'a Triple>,
        format: RdfFormat,
    ) -> SerializeResult<String> {
        let mut output = Vec::new();
        Self::serialize_to(&mut output, triples, format)?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize triples into a writer
    pub fn serialize_to<'a, W: Write>(
        writer: W,
        triples: impl IntoIterator<Item = &'a Triple>,
        format: RdfFormat,
    ) -> SerializeResult<W> {
        match format {
            RdfFormat::Turtle => rio::write_turtle(writer, triples),
            RdfFormat::NTriples => rio::write_ntriples(writer, triples),
            RdfFormat::RdfXml => rio::write_rdfxml(writer, triples),
            RdfFormat::JsonLd => JsonLdSerializer::serialize_to(writer, triples),
        }
    }
}
