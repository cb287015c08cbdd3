//! The RDF namespace

pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub const VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
pub const BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
pub const ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";
pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

/// Prefix shared by every container membership property
pub const MEMBER_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_";

/// The container membership property `rdf:_n`
pub fn member(n: u64) -> String {
    format!("{MEMBER_PREFIX}{n}")
}
