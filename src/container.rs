//! RDF containers and membership ordering
//!
//! Container members hang off `rdf:_1`, `rdf:_2`, … Statements come back
//! from the store in insertion order, so anything that shows or walks a
//! container first sorts the membership properties by the integer at the
//! end of their IRI.
//!
//! Public indexes in this module are 0-based and count membership slots;
//! `get(0)` reads `rdf:_1`. A slot may carry several values (RDF allows
//! `rdf:_1 "a", "b"`). Such a slot still occupies one position, and every
//! value moves with it when members are renumbered.

use crate::model::{Model, ModelError, ModelResult, Resource, TypedResource};
use crate::rdf::{RdfObject, RdfPredicate};
use crate::vocab::rdf;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Decimal digits as a u64, saturating at `u64::MAX`
fn saturating_digits(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// The `n` of a container membership property `rdf:_n` (n ≥ 1).
/// Indexes too large for a u64 saturate to `u64::MAX`.
pub fn membership_index(iri: &str) -> Option<u64> {
    let digits = iri.strip_prefix(rdf::MEMBER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(saturating_digits(digits)).filter(|n| *n >= 1)
}

/// Decimal digits at the very end of an IRI, if any. Saturates like
/// [`membership_index`].
pub fn trailing_integer(iri: &str) -> Option<u64> {
    let start = iri
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(saturating_digits(&iri[start..]))
}

/// Orders predicate IRIs so that membership properties follow all other
/// properties and sort numerically among themselves. Other properties
/// compare equal so that a stable sort keeps their order.
pub fn compare_properties(a: &str, b: &str) -> Ordering {
    match (membership_index(a), membership_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of a property list with [`compare_properties`]
pub fn sort_properties(pairs: &mut [(RdfPredicate, RdfObject)]) {
    pairs.sort_by(|(a, _), (b, _)| compare_properties(a.as_str(), b.as_str()));
}

/// The three RDF container classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Bag,
    Seq,
    Alt,
}

impl ContainerKind {
    pub fn type_iri(&self) -> &'static str {
        match self {
            ContainerKind::Bag => rdf::BAG,
            ContainerKind::Seq => rdf::SEQ,
            ContainerKind::Alt => rdf::ALT,
        }
    }

    pub fn from_type_iri(iri: &str) -> Option<Self> {
        match iri {
            rdf::BAG => Some(ContainerKind::Bag),
            rdf::SEQ => Some(ContainerKind::Seq),
            rdf::ALT => Some(ContainerKind::Alt),
            _ => None,
        }
    }
}

/// A Bag, Seq or Alt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    resource: Resource,
    kind: ContainerKind,
}

impl Container {
    /// Create a container of the given kind
    pub fn create(model: &Model, iri: Option<&str>, kind: ContainerKind) -> ModelResult<Self> {
        let resource = model.create(iri, kind.type_iri())?;
        Ok(Self { resource, kind })
    }

    /// View an existing resource as a container, judged by its rdf:type
    pub fn from_resource(resource: Resource) -> ModelResult<Option<Self>> {
        let kind = resource
            .types()?
            .iter()
            .find_map(|t| ContainerKind::from_type_iri(t.as_str()));
        Ok(kind.map(|kind| Self { resource, kind }))
    }

    /// Treat any resource as a container of `kind` without checking types
    pub fn wrap(resource: Resource, kind: ContainerKind) -> Self {
        Self { resource, kind }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn as_resource(&self) -> &Resource {
        &self.resource
    }

    /// Membership index -> values, sorted numerically. Values of one slot
    /// keep insertion order.
    fn slots(&self) -> BTreeMap<u64, Vec<RdfObject>> {
        let mut slots: BTreeMap<u64, Vec<RdfObject>> = BTreeMap::new();
        for (predicate, object) in self.resource.properties() {
            if let Some(n) = membership_index(predicate.as_str()) {
                slots.entry(n).or_default().push(object);
            }
        }
        slots
    }

    /// Values grouped by slot, in numeric order
    fn groups(&self) -> Vec<Vec<RdfObject>> {
        self.slots().into_values().collect()
    }

    /// Every member value in numeric order. A multi-valued slot
    /// contributes all of its values.
    pub fn members(&self) -> Vec<RdfObject> {
        self.slots().into_values().flatten().collect()
    }

    /// Members that are resources, in numeric order
    pub fn member_resources(&self) -> Vec<Resource> {
        let model = self.resource.model();
        self.members()
            .iter()
            .filter_map(|o| o.to_subject())
            .map(|s| model.node(s))
            .collect()
    }

    /// Number of occupied membership slots
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First value of the slot at a 0-based position
    pub fn get(&self, index: usize) -> Option<RdfObject> {
        self.slots()
            .into_values()
            .nth(index)
            .and_then(|values| values.into_iter().next())
    }

    /// Append after the highest index in use
    pub fn push(&self, value: impl Into<RdfObject>) -> ModelResult<()> {
        let next = match self.slots().keys().next_back() {
            None => 1,
            Some(n) => n.checked_add(1).ok_or_else(|| ModelError::ContainerFull {
                resource: self.resource.to_string(),
            })?,
        };
        self.resource.set_property(&rdf::member(next), value)
    }

    /// True if some member equals `value`
    pub fn contains(&self, value: &RdfObject) -> bool {
        self.members().iter().any(|v| v == value)
    }

    /// 0-based position of the first slot holding `value`
    pub fn position(&self, value: &RdfObject) -> Option<usize> {
        self.groups().iter().position(|values| values.contains(value))
    }

    /// Remove the slot at a 0-based position and close the gap. Returns
    /// the first value the slot held.
    pub fn remove(&self, index: usize) -> ModelResult<Option<RdfObject>> {
        let mut groups = self.groups();
        if index >= groups.len() {
            return Ok(None);
        }
        let removed = groups.remove(index);
        self.rewrite(groups)?;
        Ok(removed.into_iter().next())
    }

    /// Remove one value wherever it sits, closing the gap if its slot
    /// becomes empty. Other values of the same slot stay put.
    pub fn remove_value(&self, value: &RdfObject) -> ModelResult<bool> {
        let mut groups = self.groups();
        let Some(index) = groups.iter().position(|values| values.contains(value)) else {
            return Ok(false);
        };
        groups[index].retain(|v| v != value);
        if groups[index].is_empty() {
            groups.remove(index);
        }
        self.rewrite(groups)?;
        Ok(true)
    }

    /// Remove every member, returning how many statements were deleted
    pub fn clear(&self) -> ModelResult<usize> {
        let predicates: BTreeSet<String> = self
            .resource
            .properties()
            .into_iter()
            .map(|(p, _)| p.as_str().to_string())
            .filter(|p| membership_index(p).is_some())
            .collect();
        let mut removed = 0;
        for predicate in &predicates {
            removed += self.resource.remove_property(predicate)?;
        }
        Ok(removed)
    }

    /// Renumber members to 1..=n, keeping their order
    pub fn renumber(&self) -> ModelResult<()> {
        self.rewrite(self.groups())
    }

    fn rewrite(&self, groups: Vec<Vec<RdfObject>>) -> ModelResult<()> {
        self.clear()?;
        for (i, values) in groups.into_iter().enumerate() {
            let predicate = rdf::member(i as u64 + 1);
            for value in values {
                self.resource.add_property(&predicate, value)?;
            }
        }
        Ok(())
    }
}

/// An `rdf:Seq`, where member order carries meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence(Container);

impl TypedResource for Sequence {
    const TYPE: &'static str = rdf::SEQ;

    fn wrap(resource: Resource) -> Self {
        Sequence(Container::wrap(resource, ContainerKind::Seq))
    }

    fn as_resource(&self) -> &Resource {
        self.0.as_resource()
    }
}

impl Sequence {
    pub fn container(&self) -> &Container {
        &self.0
    }

    pub fn members(&self) -> Vec<RdfObject> {
        self.0.members()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RdfObject> {
        self.0.get(index)
    }

    pub fn push(&self, value: impl Into<RdfObject>) -> ModelResult<()> {
        self.0.push(value)
    }

    pub fn remove(&self, index: usize) -> ModelResult<Option<RdfObject>> {
        self.0.remove(index)
    }

    /// Insert at a 0-based position, shifting later members up.
    /// An index past the end appends.
    pub fn insert(&self, index: usize, value: impl Into<RdfObject>) -> ModelResult<()> {
        let mut groups = self.0.groups();
        let index = index.min(groups.len());
        groups.insert(index, vec![value.into()]);
        self.0.rewrite(groups)
    }

    /// Replace the slot at a 0-based position with a single value,
    /// returning its previous first value
    pub fn set(&self, index: usize, value: impl Into<RdfObject>) -> ModelResult<Option<RdfObject>> {
        let slots = self.0.slots();
        match slots.into_iter().nth(index) {
            Some((n, old)) => {
                self.0.resource.set_property(&rdf::member(n), value)?;
                Ok(old.into_iter().next())
            }
            None => Ok(None),
        }
    }

    /// 0-based position of the first slot holding `value`
    pub fn index_of(&self, value: &RdfObject) -> Option<usize> {
        self.0.position(value)
    }

    /// Exchange two members
    pub fn swap(&self, a: usize, b: usize) -> ModelResult<()> {
        let mut groups = self.0.groups();
        if a >= groups.len() || b >= groups.len() {
            return Err(ModelError::IndexOutOfRange {
                index: a.max(b),
                len: groups.len(),
            });
        }
        groups.swap(a, b);
        self.0.rewrite(groups)
    }
}

/// An `rdf:Alt`, whose first member is the default choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alt(Container);

impl TypedResource for Alt {
    const TYPE: &'static str = rdf::ALT;

    fn wrap(resource: Resource) -> Self {
        Alt(Container::wrap(resource, ContainerKind::Alt))
    }

    fn as_resource(&self) -> &Resource {
        self.0.as_resource()
    }
}

impl Alt {
    pub fn container(&self) -> &Container {
        &self.0
    }

    /// The preferred alternative
    pub fn default_value(&self) -> Option<RdfObject> {
        self.0.get(0)
    }

    pub fn alternatives(&self) -> Vec<RdfObject> {
        self.0.members()
    }

    pub fn push(&self, value: impl Into<RdfObject>) -> ModelResult<()> {
        self.0.push(value)
    }
}
