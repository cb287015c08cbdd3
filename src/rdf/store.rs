//! RDF triple store implementation
//!
//! An in-memory store that remembers insertion order. Bindings rely on
//! that order: the first value of a property is the first one asserted,
//! and serialized files list statements the way they were written.

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

type PredicateIndex = IndexMap<RdfPredicate, IndexSet<RdfObject>>;

/// RDF triple store
///
/// Implements:
/// - primary storage as an insertion-ordered set
/// - SP index (Subject -> Predicate -> ordered set of Objects)
#[derive(Clone, Debug, Default)]
pub struct RdfStore {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// SP index: Subject -> Predicate -> Objects
    sp_index: HashMap<RdfSubject, PredicateIndex>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            return false;
        }

        self.sp_index
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .insert(triple.object.clone());

        self.triples.insert(triple);
        true
    }

    /// Insert every triple of an iterator, returning how many were new
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .map(|t| self.insert(t))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Remove a triple. Returns false if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        if !self.triples.shift_remove(triple) {
            return false;
        }
        self.update_index_remove(triple);
        true
    }

    /// Remove all triples with the given subject and predicate
    pub fn remove_matching(&mut self, subject: &RdfSubject, predicate: &RdfPredicate) -> usize {
        let objects = self.objects(subject, predicate);
        let mut removed = 0;
        for object in objects {
            let triple = Triple::new(subject.clone(), predicate.clone(), object);
            if self.remove(&triple) {
                removed += 1;
            }
        }
        removed
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Clear all triples
    pub fn clear(&mut self) {
        self.triples.clear();
        self.sp_index.clear();
    }

    /// Objects for a subject and predicate, in insertion order
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<RdfObject> {
        self.sp_index
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map(|objs| objs.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// First object for a subject and predicate
    pub fn first_object(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Option<RdfObject> {
        self.sp_index
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .and_then(|objs| objs.first())
            .cloned()
    }

    /// All (predicate, object) pairs for a subject, grouped by predicate
    pub fn predicate_objects(&self, subject: &RdfSubject) -> Vec<(RdfPredicate, RdfObject)> {
        self.sp_index
            .get(subject)
            .map(|preds| {
                preds
                    .iter()
                    .flat_map(|(p, objs)| objs.iter().map(move |o| (p.clone(), o.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Query triples matching a pattern
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        self.triples
            .iter()
            .filter(|triple| pattern.matches(triple))
            .cloned()
            .collect()
    }

    /// Get triples with a specific subject
    pub fn triples_for_subject(&self, subject: &RdfSubject) -> Vec<Triple> {
        self.predicate_objects(subject)
            .into_iter()
            .map(|(p, o)| Triple::new(subject.clone(), p, o))
            .collect()
    }

    /// Subjects having `predicate` with value `object`, in insertion order
    pub fn subjects_with(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<RdfSubject> {
        let pattern = TriplePattern::new(None, Some(predicate.clone()), Some(object.clone()));
        self.query(&pattern)
            .into_iter()
            .map(|t| t.subject)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Get an iterator over all triples, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get all subjects in the store, in first-seen order
    pub fn subjects(&self) -> Vec<RdfSubject> {
        self.triples
            .iter()
            .map(|t| t.subject.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    fn update_index_remove(&mut self, triple: &Triple) {
        if let Some(preds) = self.sp_index.get_mut(&triple.subject) {
            if let Some(objs) = preds.get_mut(&triple.predicate) {
                objs.shift_remove(&triple.object);
                if objs.is_empty() {
                    preds.shift_remove(&triple.predicate);
                }
            }
            if preds.is_empty() {
                self.sp_index.remove(&triple.subject);
            }
        }
    }
}

impl FromIterator<Triple> for RdfStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = RdfStore::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode};

    fn alice() -> RdfSubject {
        NamedNode::new("http://example.org/alice").unwrap().into()
    }

    fn name() -> RdfPredicate {
        RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap()
    }

    fn create_test_triple() -> Triple {
        Triple::new(alice(), name(), Literal::new_simple_literal("Alice").into())
    }

    #[test]
    fn test_insert_and_contains() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        assert!(store.insert(triple.clone()));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&triple));
    }

    #[test]
    fn test_duplicate_insert() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        assert!(store.insert(triple.clone()));
        assert!(!store.insert(triple));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        store.insert(triple.clone());
        assert!(store.remove(&triple));
        assert!(store.is_empty());
        assert!(store.objects(&alice(), &name()).is_empty());
        assert!(!store.remove(&triple));
    }

    #[test]
    fn test_objects_keep_insertion_order() {
        let mut store = RdfStore::new();
        for value in ["c", "a", "b"] {
            store.insert(Triple::new(
                alice(),
                name(),
                Literal::new_simple_literal(value).into(),
            ));
        }

        let values: Vec<String> = store
            .objects(&alice(), &name())
            .iter()
            .map(|o| o.as_literal().unwrap().value().to_string())
            .collect();
        assert_eq!(values, vec!["c", "a", "b"]);

        // Removing the middle value keeps the rest in order
        store.remove(&Triple::new(
            alice(),
            name(),
            Literal::new_simple_literal("a").into(),
        ));
        let first = store.first_object(&alice(), &name()).unwrap();
        assert_eq!(first.as_literal().unwrap().value(), "c");
        assert_eq!(store.objects(&alice(), &name()).len(), 2);
    }

    #[test]
    fn test_remove_matching() {
        let mut store = RdfStore::new();
        let age = RdfPredicate::new("http://xmlns.com/foaf/0.1/age").unwrap();
        store.insert(create_test_triple());
        store.insert(Triple::new(
            alice(),
            name(),
            Literal::new_simple_literal("Al").into(),
        ));
        store.insert(Triple::new(
            alice(),
            age.clone(),
            Literal::new_simple_literal("30").into(),
        ));

        assert_eq!(store.remove_matching(&alice(), &name()), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.objects(&alice(), &age).len(), 1);
    }

    #[test]
    fn test_triple_pattern_query() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();
        store.insert(triple.clone());

        let pattern = TriplePattern::new(None, None, None);
        assert_eq!(store.query(&pattern).len(), 1);

        let wrong_subject = NamedNode::new("http://example.org/bob").unwrap();
        let pattern = TriplePattern::new(Some(wrong_subject.into()), None, None);
        assert!(store.query(&pattern).is_empty());
    }

    #[test]
    fn test_subjects_with() {
        let mut store = RdfStore::new();
        let bob: RdfSubject = NamedNode::new("http://example.org/bob").unwrap().into();
        let value: RdfObject = Literal::new_simple_literal("same").into();
        store.insert(Triple::new(bob.clone(), name(), value.clone()));
        store.insert(Triple::new(alice(), name(), value.clone()));

        assert_eq!(store.subjects_with(&name(), &value), vec![bob, alice()]);
        assert_eq!(store.subjects().len(), 2);
    }
}
