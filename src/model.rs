//! Shared model handle and the generic resource API
//!
//! A [`Model`] is a cheap, cloneable handle to one triple store. A
//! [`Resource`] is a node in that store; every vocabulary binding in this
//! crate is a typed view over a `Resource`, translating between the
//! generic property-value calls (`property_value`, `set_property`,
//! `add_property`) and typed accessors.

use crate::container::sort_properties;
use crate::literal::{LiteralError, TypedLiteral};
use crate::rdf::{
    BlankNode, NamedNode, RdfError, RdfObject, RdfPredicate, RdfStore, RdfSubject, Triple,
};
use crate::vocab::rdf;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Errors raised by the resource API
#[derive(Error, Debug)]
pub enum ModelError {
    /// Invalid IRI or term
    #[error(transparent)]
    Rdf(#[from] RdfError),

    /// A literal whose lexical form does not fit the requested type
    #[error("Property <{predicate}>: {source}")]
    Literal {
        predicate: String,
        source: LiteralError,
    },

    /// A literal where a node was expected, or the other way round
    #[error("Property <{predicate}> holds a {found}, expected a {expected}")]
    UnexpectedTerm {
        predicate: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A container position past the last member
    #[error("Index {index} out of range for {len} members")]
    IndexOutOfRange { index: usize, len: usize },

    /// A container already uses the highest membership index
    #[error("Container {resource} has no membership index left")]
    ContainerFull { resource: String },

    /// A property a binding needs has no value
    #[error("Resource {resource} has no <{predicate}>")]
    MissingProperty { resource: String, predicate: String },

    /// A value outside the set a binding understands
    #[error("Property <{predicate}> has unsupported value {value}")]
    UnsupportedValue { predicate: String, value: String },

    /// A resource lacks the rdf:type a binding requires
    #[error("Resource {resource} is not a <{expected}>")]
    WrongType {
        resource: String,
        expected: &'static str,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;

fn predicate(iri: &str) -> ModelResult<RdfPredicate> {
    Ok(RdfPredicate::new(iri)?)
}

/// Handle to a shared triple store
#[derive(Clone, Default)]
pub struct Model {
    store: Arc<RwLock<RdfStore>>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store
    pub fn from_store(store: RdfStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Run a closure with shared access to the store
    pub fn read<R>(&self, f: impl FnOnce(&RdfStore) -> R) -> R {
        let guard = self.store.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a closure with exclusive access to the store
    pub fn write<R>(&self, f: impl FnOnce(&mut RdfStore) -> R) -> R {
        let mut guard = self.store.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Copy of the current store contents
    pub fn snapshot(&self) -> RdfStore {
        self.read(|store| store.clone())
    }

    /// Swap in new contents, returning the previous ones
    pub fn replace(&self, store: RdfStore) -> RdfStore {
        self.write(|current| std::mem::replace(current, store))
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.read(|store| store.len())
    }

    /// True when the model holds no triples
    pub fn is_empty(&self) -> bool {
        self.read(|store| store.is_empty())
    }

    /// True when both handles point to the same store
    pub fn same_model(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// The resource named by `iri`
    pub fn resource(&self, iri: &str) -> ModelResult<Resource> {
        Ok(self.node(NamedNode::new(iri)?))
    }

    /// A fresh blank node resource
    pub fn blank(&self) -> Resource {
        self.node(BlankNode::new())
    }

    /// The resource for an existing subject term
    pub fn node(&self, node: impl Into<RdfSubject>) -> Resource {
        Resource {
            model: self.clone(),
            node: node.into(),
        }
    }

    /// Create a resource (blank when `iri` is None) typed with `type_iri`
    pub fn create(&self, iri: Option<&str>, type_iri: &str) -> ModelResult<Resource> {
        let resource = match iri {
            Some(iri) => self.resource(iri)?,
            None => self.blank(),
        };
        resource.add_type(type_iri)?;
        Ok(resource)
    }

    /// All resources with the given rdf:type, in first-seen order
    pub fn instances_of(&self, type_iri: &str) -> ModelResult<Vec<Resource>> {
        let rdf_type = predicate(rdf::TYPE)?;
        let class: RdfObject = NamedNode::new(type_iri)?.into();
        let subjects = self.read(|store| store.subjects_with(&rdf_type, &class));
        Ok(subjects.into_iter().map(|s| self.node(s)).collect())
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model").field("triples", &self.len()).finish()
    }
}

/// A node in a model, with the generic property-value API
#[derive(Clone)]
pub struct Resource {
    model: Model,
    node: RdfSubject,
}

impl Resource {
    /// The subject term
    pub fn node(&self) -> &RdfSubject {
        &self.node
    }

    /// The owning model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// IRI of a named resource
    pub fn iri(&self) -> Option<&str> {
        self.node.iri()
    }

    /// The node as an object term, for linking from other resources
    pub fn to_object(&self) -> RdfObject {
        self.node.clone().into()
    }

    /// First value of `predicate`, in insertion order
    pub fn property_value(&self, predicate_iri: &str) -> ModelResult<Option<RdfObject>> {
        let p = predicate(predicate_iri)?;
        Ok(self.model.read(|store| store.first_object(&self.node, &p)))
    }

    /// All values of `predicate`, in insertion order
    pub fn property_values(&self, predicate_iri: &str) -> ModelResult<Vec<RdfObject>> {
        let p = predicate(predicate_iri)?;
        Ok(self.model.read(|store| store.objects(&self.node, &p)))
    }

    /// Replace every value of `predicate` with `value`
    pub fn set_property(&self, predicate_iri: &str, value: impl Into<RdfObject>) -> ModelResult<()> {
        let p = predicate(predicate_iri)?;
        let triple = Triple::new(self.node.clone(), p.clone(), value.into());
        self.model.write(|store| {
            store.remove_matching(&self.node, &p);
            store.insert(triple);
        });
        Ok(())
    }

    /// Add a value to `predicate`. Returns false if it was already there.
    pub fn add_property(&self, predicate_iri: &str, value: impl Into<RdfObject>) -> ModelResult<bool> {
        let triple = Triple::new(self.node.clone(), predicate(predicate_iri)?, value.into());
        Ok(self.model.write(|store| store.insert(triple)))
    }

    /// Remove every value of `predicate`, returning how many were removed
    pub fn remove_property(&self, predicate_iri: &str) -> ModelResult<usize> {
        let p = predicate(predicate_iri)?;
        Ok(self.model.write(|store| store.remove_matching(&self.node, &p)))
    }

    /// Remove one value of `predicate`
    pub fn remove_value(&self, predicate_iri: &str, value: impl Into<RdfObject>) -> ModelResult<bool> {
        let triple = Triple::new(self.node.clone(), predicate(predicate_iri)?, value.into());
        Ok(self.model.write(|store| store.remove(&triple)))
    }

    /// True if `predicate` has at least one value
    pub fn has_property(&self, predicate_iri: &str) -> ModelResult<bool> {
        Ok(self.property_value(predicate_iri)?.is_some())
    }

    /// Every (predicate, value) pair; membership properties come last, in numeric order
    pub fn properties(&self) -> Vec<(RdfPredicate, RdfObject)> {
        let mut pairs = self.model.read(|store| store.predicate_objects(&self.node));
        sort_properties(&mut pairs);
        pairs
    }

    /// Delete every statement about this resource
    pub fn clear(&self) -> usize {
        self.model.write(|store| {
            store
                .triples_for_subject(&self.node)
                .iter()
                .filter(|t| store.remove(t))
                .count()
        })
    }

    /// Named rdf:type values
    pub fn types(&self) -> ModelResult<Vec<NamedNode>> {
        Ok(self
            .property_values(rdf::TYPE)?
            .into_iter()
            .filter_map(|o| match o {
                RdfObject::NamedNode(n) => Some(n),
                _ => None,
            })
            .collect())
    }

    /// True if the resource has the given rdf:type
    pub fn has_type(&self, type_iri: &str) -> ModelResult<bool> {
        let class = NamedNode::new(type_iri)?;
        Ok(self.types()?.contains(&class))
    }

    /// Add an rdf:type
    pub fn add_type(&self, type_iri: &str) -> ModelResult<bool> {
        self.add_property(rdf::TYPE, NamedNode::new(type_iri)?)
    }

    /// Replace every rdf:type with `type_iri`
    pub fn set_type(&self, type_iri: &str) -> ModelResult<()> {
        self.set_property(rdf::TYPE, NamedNode::new(type_iri)?)
    }

    /// First value of `predicate` converted to `T`
    pub fn get<T: TypedLiteral>(&self, predicate_iri: &str) -> ModelResult<Option<T>> {
        self.property_value(predicate_iri)?
            .map(|object| literal_value(predicate_iri, &object))
            .transpose()
    }

    /// Every value of `predicate` converted to `T`
    pub fn get_all<T: TypedLiteral>(&self, predicate_iri: &str) -> ModelResult<Vec<T>> {
        self.property_values(predicate_iri)?
            .iter()
            .map(|object| literal_value(predicate_iri, object))
            .collect()
    }

    /// Replace `predicate` with a typed literal
    pub fn set<T: TypedLiteral>(&self, predicate_iri: &str, value: &T) -> ModelResult<()> {
        self.set_property(predicate_iri, value.to_literal())
    }

    /// Add a typed literal to `predicate`
    pub fn add<T: TypedLiteral>(&self, predicate_iri: &str, value: &T) -> ModelResult<bool> {
        self.add_property(predicate_iri, value.to_literal())
    }

    /// Set `predicate` to `value`, or clear it on None
    pub fn set_optional<T: TypedLiteral>(&self, predicate_iri: &str, value: Option<&T>) -> ModelResult<()> {
        match value {
            Some(value) => self.set(predicate_iri, value),
            None => self.remove_property(predicate_iri).map(|_| ()),
        }
    }

    /// First value of `predicate` as a resource
    pub fn get_resource(&self, predicate_iri: &str) -> ModelResult<Option<Resource>> {
        self.property_value(predicate_iri)?
            .map(|object| self.node_value(predicate_iri, &object))
            .transpose()
    }

    /// Every value of `predicate` as a resource
    pub fn get_resources(&self, predicate_iri: &str) -> ModelResult<Vec<Resource>> {
        self.property_values(predicate_iri)?
            .iter()
            .map(|object| self.node_value(predicate_iri, object))
            .collect()
    }

    /// Point `predicate` at `target`, replacing previous values
    pub fn set_resource(&self, predicate_iri: &str, target: &Resource) -> ModelResult<()> {
        self.set_property(predicate_iri, target.to_object())
    }

    /// Add `target` as a value of `predicate`
    pub fn add_resource(&self, predicate_iri: &str, target: &Resource) -> ModelResult<bool> {
        self.add_property(predicate_iri, target.to_object())
    }

    fn node_value(&self, predicate_iri: &str, object: &RdfObject) -> ModelResult<Resource> {
        object
            .to_subject()
            .map(|subject| self.model.node(subject))
            .ok_or_else(|| ModelError::UnexpectedTerm {
                predicate: predicate_iri.to_string(),
                expected: "resource",
                found: object.kind(),
            })
    }
}

fn literal_value<T: TypedLiteral>(predicate_iri: &str, object: &RdfObject) -> ModelResult<T> {
    match object {
        RdfObject::Literal(literal) => T::from_literal(literal).map_err(|source| ModelError::Literal {
            predicate: predicate_iri.to_string(),
            source,
        }),
        other => Err(ModelError::UnexpectedTerm {
            predicate: predicate_iri.to_string(),
            expected: "literal",
            found: other.kind(),
        }),
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.model.same_model(&other.model)
    }
}

impl Eq for Resource {}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self.node)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

/// A class binding: a resource view tied to one rdf:type
pub trait TypedResource: Sized {
    /// Class IRI written as rdf:type on creation
    const TYPE: &'static str;

    /// Wrap a resource without checking its type
    fn wrap(resource: Resource) -> Self;

    /// The underlying resource
    fn as_resource(&self) -> &Resource;

    /// Create a new instance; blank when `iri` is None
    fn create(model: &Model, iri: Option<&str>) -> ModelResult<Self> {
        model.create(iri, Self::TYPE).map(Self::wrap)
    }

    /// View `resource` as this class if it carries the rdf:type
    fn cast(resource: Resource) -> ModelResult<Option<Self>> {
        if resource.has_type(Self::TYPE)? {
            Ok(Some(Self::wrap(resource)))
        } else {
            Ok(None)
        }
    }

    /// Like `cast`, but a missing type is an error
    fn expect(resource: Resource) -> ModelResult<Self> {
        let name = resource.to_string();
        Self::cast(resource)?.ok_or(ModelError::WrongType {
            resource: name,
            expected: Self::TYPE,
        })
    }

    /// Every instance in the model
    fn all(model: &Model) -> ModelResult<Vec<Self>> {
        Ok(model
            .instances_of(Self::TYPE)?
            .into_iter()
            .map(Self::wrap)
            .collect())
    }
}
