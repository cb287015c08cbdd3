//! JSON-LD format implementation (expanded form)

use super::{SerializeError, SerializeResult};
use crate::literal::XSD_STRING;
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::io::Write;

/// JSON-LD serializer
pub struct JsonLdSerializer;

impl JsonLdSerializer {
    /// Serialize triples as an array of expanded node objects
    pub fn serialize_to<'a, W: Write>(
        mut writer: W,
        triples: impl IntoIterator<Item = &'a Triple>,
    ) -> SerializeResult<W> {
        let mut nodes: IndexMap<&RdfSubject, Vec<(RdfPredicate, RdfObject)>> = IndexMap::new();
        for triple in triples {
            nodes
                .entry(&triple.subject)
                .or_default()
                .push((triple.predicate.clone(), triple.object.clone()));
        }

        let output: Vec<Value> = nodes
            .into_iter()
            .map(|(subject, pairs)| node_object(subject, &pairs))
            .collect();

        serde_json::to_writer_pretty(&mut writer, &output)
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        writer.write_all(b"\n")?;
        Ok(writer)
    }
}

/// Expanded JSON-LD node object for one subject
pub fn node_object(subject: &RdfSubject, pairs: &[(RdfPredicate, RdfObject)]) -> Value {
    let mut node = Map::new();
    node.insert("@id".to_string(), Value::String(subject_id(subject)));

    for (predicate, object) in pairs {
        let values = node
            .entry(predicate.as_str().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(values) = values {
            values.push(object_value(object));
        }
    }
    Value::Object(node)
}

fn subject_id(subject: &RdfSubject) -> String {
    match subject {
        RdfSubject::NamedNode(n) => n.as_str().to_string(),
        RdfSubject::BlankNode(b) => format!("_:{}", b.as_str()),
    }
}

fn object_value(object: &RdfObject) -> Value {
    match object {
        RdfObject::NamedNode(n) => json!({ "@id": n.as_str() }),
        RdfObject::BlankNode(b) => json!({ "@id": format!("_:{}", b.as_str()) }),
        RdfObject::Literal(l) => {
            if let Some(lang) = l.language() {
                json!({ "@value": l.value(), "@language": lang })
            } else if l.datatype_iri() == XSD_STRING {
                json!({ "@value": l.value() })
            } else {
                json!({ "@value": l.value(), "@type": l.datatype_iri() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, NamedNode};

    #[test]
    fn test_jsonld_serialization() {
        let subject = NamedNode::new("http://example.org/alice").unwrap();
        let name = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let triples = vec![
            Triple::new(
                subject.clone().into(),
                name.clone(),
                Literal::new_simple_literal("Alice").into(),
            ),
            Triple::new(
                subject.into(),
                name,
                Literal::new_language_tagged_literal("Alicia", "es").unwrap().into(),
            ),
        ];

        let out = JsonLdSerializer::serialize_to(Vec::new(), &triples).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        let node = &parsed[0];
        assert_eq!(node["@id"], "http://example.org/alice");
        let names = node["http://xmlns.com/foaf/0.1/name"].as_array().unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0]["@value"], "Alice");
        assert_eq!(names[1]["@language"], "es");
    }
}
