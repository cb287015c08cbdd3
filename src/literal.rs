//! Typed literal wrappers
//!
//! Each Rust value type maps to one XSD datatype. Conversion goes through
//! the lexical form, so a literal read from a file with a slightly
//! different datatype (say `xsd:long` for an `i64`) still converts as long
//! as its lexical form parses.

use crate::rdf::{Literal, NamedNode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::fmt;
use thiserror::Error;

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// A lexical form that does not denote a value of the datatype
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {datatype} lexical form {lexical:?}: {reason}")]
pub struct LiteralError {
    pub datatype: &'static str,
    pub lexical: String,
    pub reason: String,
}

pub type LiteralResult<T> = Result<T, LiteralError>;

fn invalid<T>(datatype: &'static str, lexical: &str, reason: impl fmt::Display) -> LiteralResult<T> {
    Err(LiteralError {
        datatype,
        lexical: lexical.to_string(),
        reason: reason.to_string(),
    })
}

/// A Rust value stored as an RDF literal
pub trait TypedLiteral: Sized {
    /// XSD datatype IRI written for this type
    const DATATYPE: &'static str;

    /// Canonical lexical form
    fn to_lexical(&self) -> String;

    /// Parse a lexical form
    fn from_lexical(lexical: &str) -> LiteralResult<Self>;

    /// Build the RDF literal; strings become simple literals
    fn to_literal(&self) -> Literal {
        if Self::DATATYPE == XSD_STRING {
            Literal::new_simple_literal(self.to_lexical())
        } else {
            let datatype = NamedNode::from(oxrdf::NamedNode::new_unchecked(Self::DATATYPE));
            Literal::new_typed_literal(self.to_lexical(), datatype)
        }
    }

    /// Read a value back from any literal whose lexical form parses
    fn from_literal(literal: &Literal) -> LiteralResult<Self> {
        Self::from_lexical(literal.value())
    }
}

impl TypedLiteral for String {
    const DATATYPE: &'static str = XSD_STRING;

    fn to_lexical(&self) -> String {
        self.clone()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        Ok(lexical.to_string())
    }
}

impl TypedLiteral for i64 {
    const DATATYPE: &'static str = XSD_INTEGER;

    fn to_lexical(&self) -> String {
        self.to_string()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        lexical
            .trim()
            .parse()
            .or_else(|e| invalid(Self::DATATYPE, lexical, e))
    }
}

impl TypedLiteral for i32 {
    const DATATYPE: &'static str = XSD_INT;

    fn to_lexical(&self) -> String {
        self.to_string()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        lexical
            .trim()
            .parse()
            .or_else(|e| invalid(Self::DATATYPE, lexical, e))
    }
}

impl TypedLiteral for bool {
    const DATATYPE: &'static str = XSD_BOOLEAN;

    fn to_lexical(&self) -> String {
        self.to_string()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        match lexical.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => invalid(Self::DATATYPE, lexical, "expected true, false, 1 or 0"),
        }
    }
}

/// XSD float/double lexical forms: INF, -INF and NaN are spelled the XSD way,
/// and Rust's own spellings ("inf", "infinity") are rejected.
fn parse_xsd_float<T>(datatype: &'static str, lexical: &str) -> LiteralResult<T>
where
    T: std::str::FromStr + From<f32>,
    T::Err: fmt::Display,
{
    let trimmed = lexical.trim();
    match trimmed {
        "INF" | "+INF" => return Ok(T::from(f32::INFINITY)),
        "-INF" => return Ok(T::from(f32::NEG_INFINITY)),
        "NaN" => return Ok(T::from(f32::NAN)),
        _ => {}
    }
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) {
        return invalid(datatype, lexical, "not a decimal or scientific number");
    }
    trimmed.parse().or_else(|e| invalid(datatype, lexical, e))
}

macro_rules! xsd_float_lexical {
    ($value:expr) => {
        if $value.is_nan() {
            "NaN".to_string()
        } else if $value.is_infinite() {
            (if $value > 0.0 { "INF" } else { "-INF" }).to_string()
        } else {
            format!("{:?}", $value)
        }
    };
}

impl TypedLiteral for f32 {
    const DATATYPE: &'static str = XSD_FLOAT;

    fn to_lexical(&self) -> String {
        xsd_float_lexical!(*self)
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        parse_xsd_float(Self::DATATYPE, lexical)
    }
}

impl TypedLiteral for f64 {
    const DATATYPE: &'static str = XSD_DOUBLE;

    fn to_lexical(&self) -> String {
        xsd_float_lexical!(*self)
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        parse_xsd_float(Self::DATATYPE, lexical)
    }
}

/// Binary data carried as `xsd:base64Binary`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Base64Binary(pub Vec<u8>);

impl Base64Binary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Base64Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Base64Binary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl TypedLiteral for Base64Binary {
    const DATATYPE: &'static str = XSD_BASE64_BINARY;

    fn to_lexical(&self) -> String {
        STANDARD.encode(&self.0)
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        // whitespace is allowed anywhere in the lexical space
        let compact: String = lexical.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact.as_bytes())
            .map(Self)
            .or_else(|e| invalid(Self::DATATYPE, lexical, e))
    }
}

/// A URI stored as an `xsd:anyURI` literal rather than as a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnyUri(pub String);

impl AnyUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URI as a graph node, when it is an absolute IRI
    pub fn to_named_node(&self) -> Option<NamedNode> {
        NamedNode::new(&self.0).ok()
    }
}

impl fmt::Display for AnyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TypedLiteral for AnyUri {
    const DATATYPE: &'static str = XSD_ANY_URI;

    fn to_lexical(&self) -> String {
        self.0.clone()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        Ok(Self(lexical.trim().to_string()))
    }
}

impl TypedLiteral for NaiveDate {
    const DATATYPE: &'static str = XSD_DATE;

    fn to_lexical(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        let date = lexical.trim().trim_end_matches('Z');
        NaiveDate::parse_from_str(date, "%Y-%m-%d").or_else(|e| invalid(Self::DATATYPE, lexical, e))
    }
}

impl TypedLiteral for DateTime<Utc> {
    const DATATYPE: &'static str = XSD_DATE_TIME;

    fn to_lexical(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_lexical(lexical: &str) -> LiteralResult<Self> {
        let trimmed = lexical.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.with_timezone(&Utc));
        }
        // no timezone: read as UTC
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .or_else(|e| invalid(Self::DATATYPE, lexical, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_integer_literals() {
        let lit = 42i64.to_literal();
        assert_eq!(lit.value(), "42");
        assert_eq!(lit.datatype_iri(), XSD_INTEGER);
        assert_eq!(i64::from_lexical(" +7 ").unwrap(), 7);
        assert_eq!(i32::from_literal(&(-3i32).to_literal()).unwrap(), -3);

        let err = i32::from_lexical("99999999999").unwrap_err();
        assert_eq!(err.datatype, XSD_INT);
    }

    #[test]
    fn test_boolean_lexical_space() {
        assert!(bool::from_lexical("1").unwrap());
        assert!(!bool::from_lexical("false").unwrap());
        assert!(bool::from_lexical("TRUE").is_err());
        assert_eq!(true.to_lexical(), "true");
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(f64::INFINITY.to_lexical(), "INF");
        assert_eq!(f32::NEG_INFINITY.to_lexical(), "-INF");
        assert_eq!(f64::NAN.to_lexical(), "NaN");
        assert!(f64::from_lexical("NaN").unwrap().is_nan());
        assert_eq!(f32::from_lexical("-INF").unwrap(), f32::NEG_INFINITY);
        assert!(f64::from_lexical("inf").is_err());
        assert!(f64::from_lexical("infinity").is_err());
        assert!(f64::from_lexical("").is_err());
    }

    #[test]
    fn test_float_values() {
        assert_eq!(1.5f64.to_lexical(), "1.5");
        assert_eq!(f64::from_lexical("1.0E3").unwrap(), 1000.0);
        assert_eq!(f32::from_lexical("0.25").unwrap(), 0.25);
        assert_eq!(f64::from_literal(&2.0f64.to_literal()).unwrap(), 2.0);
        assert_eq!(2.0f32.to_literal().datatype_iri(), XSD_FLOAT);
    }

    #[test]
    fn test_base64_binary() {
        let data = Base64Binary::from(&b"hello world"[..]);
        assert_eq!(data.to_lexical(), "aGVsbG8gd29ybGQ=");
        let decoded = Base64Binary::from_lexical("aGVs bG8g\nd29y bGQ=").unwrap();
        assert_eq!(decoded.as_bytes(), b"hello world");
        assert!(Base64Binary::from_lexical("***").is_err());
    }

    #[test]
    fn test_string_is_simple_literal() {
        let lit = "plain".to_string().to_literal();
        assert!(lit.is_plain());
        assert_eq!(lit.language(), None);

        let tagged = Literal::new_language_tagged_literal("hola", "es").unwrap();
        assert_eq!(String::from_literal(&tagged).unwrap(), "hola");
    }

    #[test]
    fn test_any_uri() {
        let uri = AnyUri::new("http://example.org/x");
        let lit = uri.to_literal();
        assert_eq!(lit.datatype_iri(), XSD_ANY_URI);
        assert!(uri.to_named_node().is_some());
        assert!(AnyUri::new("relative/path").to_named_node().is_none());
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date.to_lexical(), "2024-02-29");
        assert_eq!(NaiveDate::from_lexical("2024-02-29Z").unwrap(), date);

        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(dt.to_lexical(), "2024-01-02T03:04:05Z");
        assert_eq!(DateTime::<Utc>::from_lexical("2024-01-02T05:04:05+02:00").unwrap(), dt);
        assert_eq!(DateTime::<Utc>::from_lexical("2024-01-02T03:04:05").unwrap(), dt);
        assert!(DateTime::<Utc>::from_lexical("yesterday").is_err());
    }
}
