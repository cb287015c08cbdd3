//! The RDFa 1.1 initial context
//!
//! Prefixes and terms every RDFa processor knows without declarations,
//! as published by the W3C at <http://www.w3.org/2011/rdfa-context/rdfa-1.1>.

use crate::rdf::{NamedNode, NamespaceManager};

/// Default vocabulary-independent prefix mappings
pub const PREFIXES: &[(&str, &str)] = &[
    ("as", "https://www.w3.org/ns/activitystreams#"),
    ("cc", "http://creativecommons.org/ns#"),
    ("ctag", "http://commontag.org/ns#"),
    ("dc", "http://purl.org/dc/terms/"),
    ("dc11", "http://purl.org/dc/elements/1.1/"),
    ("dcat", "http://www.w3.org/ns/dcat#"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("dqv", "http://www.w3.org/ns/dqv#"),
    ("duv", "https://www.w3.org/ns/duv#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("gr", "http://purl.org/goodrelations/v1#"),
    ("grddl", "http://www.w3.org/2003/g/data-view#"),
    ("ical", "http://www.w3.org/2002/12/cal/icaltzd#"),
    ("ldp", "http://www.w3.org/ns/ldp#"),
    ("ma", "http://www.w3.org/ns/ma-ont#"),
    ("oa", "http://www.w3.org/ns/oa#"),
    ("odrl", "http://www.w3.org/ns/odrl/2/"),
    ("og", "http://ogp.me/ns#"),
    ("org", "http://www.w3.org/ns/org#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("qb", "http://purl.org/linked-data/cube#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfa", "http://www.w3.org/ns/rdfa#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("rev", "http://purl.org/stuff/rev#"),
    ("rif", "http://www.w3.org/2007/rif#"),
    ("rr", "http://www.w3.org/ns/r2rml#"),
    ("schema", "http://schema.org/"),
    ("sd", "http://www.w3.org/ns/sparql-service-description#"),
    ("sioc", "http://rdfs.org/sioc/ns#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("skosxl", "http://www.w3.org/2008/05/skos-xl#"),
    ("sosa", "http://www.w3.org/ns/sosa/"),
    ("ssn", "http://www.w3.org/ns/ssn/"),
    ("time", "http://www.w3.org/2006/time#"),
    ("v", "http://rdf.data-vocabulary.org/#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("void", "http://rdfs.org/ns/void#"),
    ("wdr", "http://www.w3.org/2007/05/powder#"),
    ("wdrs", "http://www.w3.org/2007/05/powder-s#"),
    ("xhv", "http://www.w3.org/1999/xhtml/vocab#"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Default terms
pub const TERMS: &[(&str, &str)] = &[
    ("describedby", "http://www.w3.org/2007/05/powder-s#describedby"),
    ("license", "http://www.w3.org/1999/xhtml/vocab#license"),
    ("role", "http://www.w3.org/1999/xhtml/vocab#role"),
];

/// A namespace manager preloaded with every initial-context prefix
pub fn initial_context() -> NamespaceManager {
    let mut mgr = NamespaceManager::empty();
    for (prefix, iri) in PREFIXES {
        mgr.add_prefix(*prefix, *iri);
    }
    mgr
}

/// IRI of a default term; an exact match wins over a case-insensitive one
pub fn term(name: &str) -> Option<&'static str> {
    TERMS
        .iter()
        .find(|(t, _)| *t == name)
        .or_else(|| TERMS.iter().find(|(t, _)| t.eq_ignore_ascii_case(name)))
        .map(|(_, iri)| *iri)
}

/// Resolve a term, a CURIE or an absolute IRI to a full IRI
///
/// A CURIE with an unknown prefix is taken as an absolute IRI, which is
/// how RDFa processors treat `urn:` or `mailto:` values.
pub fn resolve(token: &str) -> Option<String> {
    if let Some(iri) = term(token) {
        return Some(iri.to_string());
    }
    let (prefix, local) = token.split_once(':')?;
    if let Some((_, ns)) = PREFIXES.iter().find(|(p, _)| *p == prefix) {
        return Some(format!("{}{}", ns, local));
    }
    NamedNode::new(token).ok().map(|_| token.to_string())
}
