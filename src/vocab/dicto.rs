//! Dictionary ontology: string-keyed maps stored in the graph
//!
//! ```text
//! <dict> a dicto:Dictionary ;
//!     dicto:entry [ a dicto:Entry ; dicto:key "colour" ; dicto:value "blue" ] .
//! ```
//!
//! Keys are unique within a dictionary. Entries keep the order they were
//! first added in.

use crate::literal::TypedLiteral;
use crate::model::{Model, ModelError, ModelResult, Resource, TypedResource};
use crate::rdf::RdfObject;

pub const NS: &str = "https://ontobind.dev/ns/dicto#";

pub const DICTIONARY: &str = "https://ontobind.dev/ns/dicto#Dictionary";
pub const ENTRY_CLASS: &str = "https://ontobind.dev/ns/dicto#Entry";
pub const ENTRY: &str = "https://ontobind.dev/ns/dicto#entry";
pub const KEY: &str = "https://ontobind.dev/ns/dicto#key";
pub const VALUE: &str = "https://ontobind.dev/ns/dicto#value";

/// One key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry(Resource);

impl TypedResource for Entry {
    const TYPE: &'static str = ENTRY_CLASS;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl Entry {
    pub fn key(&self) -> ModelResult<String> {
        self.0.get(KEY)?.ok_or_else(|| ModelError::MissingProperty {
            resource: self.0.to_string(),
            predicate: KEY.to_string(),
        })
    }

    pub fn value(&self) -> ModelResult<Option<RdfObject>> {
        self.0.property_value(VALUE)
    }

    pub fn set_value(&self, value: impl Into<RdfObject>) -> ModelResult<()> {
        self.0.set_property(VALUE, value)
    }
}

/// A `dicto:Dictionary`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary(Resource);

impl TypedResource for Dictionary {
    const TYPE: &'static str = DICTIONARY;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl Dictionary {
    /// Entries in insertion order
    pub fn entries(&self) -> ModelResult<Vec<Entry>> {
        Ok(self
            .0
            .get_resources(ENTRY)?
            .into_iter()
            .map(Entry::wrap)
            .collect())
    }

    fn find(&self, key: &str) -> ModelResult<Option<Entry>> {
        for entry in self.entries()? {
            if entry.key()? == key {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    fn model(&self) -> &Model {
        self.0.model()
    }

    /// Insert or replace; returns the previous value
    pub fn put(&self, key: &str, value: impl Into<RdfObject>) -> ModelResult<Option<RdfObject>> {
        if let Some(entry) = self.find(key)? {
            let previous = entry.value()?;
            entry.set_value(value)?;
            return Ok(previous);
        }
        let entry = Entry::create(self.model(), None)?;
        entry.0.set(KEY, &key.to_string())?;
        entry.set_value(value)?;
        self.0.add_resource(ENTRY, &entry.0)?;
        Ok(None)
    }

    /// `put` for a typed literal value
    pub fn put_literal<T: TypedLiteral>(&self, key: &str, value: &T) -> ModelResult<Option<RdfObject>> {
        self.put(key, value.to_literal())
    }

    pub fn get(&self, key: &str) -> ModelResult<Option<RdfObject>> {
        match self.find(key)? {
            Some(entry) => entry.value(),
            None => Ok(None),
        }
    }

    /// Value for `key` converted to `T`
    pub fn get_literal<T: TypedLiteral>(&self, key: &str) -> ModelResult<Option<T>> {
        match self.find(key)? {
            Some(entry) => entry.0.get(VALUE),
            None => Ok(None),
        }
    }

    /// Remove the entry for `key` and its node; returns the removed value
    pub fn remove(&self, key: &str) -> ModelResult<Option<RdfObject>> {
        let Some(entry) = self.find(key)? else {
            return Ok(None);
        };
        let value = entry.value()?;
        self.0.remove_value(ENTRY, entry.0.to_object())?;
        entry.0.clear();
        Ok(value)
    }

    pub fn contains_key(&self, key: &str) -> ModelResult<bool> {
        Ok(self.find(key)?.is_some())
    }

    pub fn keys(&self) -> ModelResult<Vec<String>> {
        self.entries()?.iter().map(Entry::key).collect()
    }

    pub fn len(&self) -> ModelResult<usize> {
        Ok(self.0.property_values(ENTRY)?.len())
    }

    pub fn is_empty(&self) -> ModelResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn text(s: &str) -> RdfObject {
        Literal::new_simple_literal(s).into()
    }

    #[test]
    fn test_put_get_replace() {
        let model = Model::new();
        let dict = Dictionary::create(&model, Some("http://example.org/settings")).unwrap();
        assert!(dict.is_empty().unwrap());

        assert_eq!(dict.put("colour", text("blue")).unwrap(), None);
        assert_eq!(dict.put("size", text("L")).unwrap(), None);
        assert_eq!(dict.put("colour", text("red")).unwrap(), Some(text("blue")));

        assert_eq!(dict.len().unwrap(), 2);
        assert_eq!(dict.get("colour").unwrap(), Some(text("red")));
        assert_eq!(dict.get("weight").unwrap(), None);
        assert_eq!(dict.keys().unwrap(), vec!["colour", "size"]);
    }

    #[test]
    fn test_remove_drops_entry_node() {
        let model = Model::new();
        let dict = Dictionary::create(&model, None).unwrap();
        dict.put("a", text("1")).unwrap();
        let before = model.len();
        dict.put("b", text("2")).unwrap();

        assert_eq!(dict.remove("b").unwrap(), Some(text("2")));
        assert_eq!(dict.remove("b").unwrap(), None);
        assert!(!dict.contains_key("b").unwrap());
        assert_eq!(model.len(), before);
        assert_eq!(Entry::all(&model).unwrap().len(), 1);
    }

    #[test]
    fn test_typed_values() {
        let model = Model::new();
        let dict = Dictionary::create(&model, None).unwrap();
        let target = model.resource("http://example.org/target").unwrap();

        dict.put_literal("retries", &3i64).unwrap();
        dict.put("link", target.to_object()).unwrap();

        assert_eq!(dict.get_literal::<i64>("retries").unwrap(), Some(3));
        assert!(dict.get_literal::<i64>("link").is_err());
        assert_eq!(dict.get("link").unwrap(), Some(target.to_object()));
    }
}
