//! Directory resources
//!
//! A directory is named by its `rdfs:label` and lists its entries as
//! container members, so entries keep the order they were added in.
//! Entries are any labelled resource; those typed `dir:Directory` can be
//! walked into with [`Directory::lookup`].

use crate::container::{Container, ContainerKind};
use crate::model::{Model, ModelResult, Resource, TypedResource};
use crate::vocab::rdfs;

pub const NS: &str = "https://ontobind.dev/ns/dir#";
pub const DIRECTORY: &str = "https://ontobind.dev/ns/dir#Directory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory(Resource);

impl TypedResource for Directory {
    const TYPE: &'static str = DIRECTORY;

    fn wrap(resource: Resource) -> Self {
        Self(resource)
    }

    fn as_resource(&self) -> &Resource {
        &self.0
    }
}

fn label(resource: &Resource) -> ModelResult<Option<String>> {
    resource.get(rdfs::LABEL)
}

impl Directory {
    /// Create a named directory; blank when `iri` is None
    pub fn create(model: &Model, iri: Option<&str>, name: &str) -> ModelResult<Self> {
        let dir = <Self as TypedResource>::create(model, iri)?;
        dir.0.set(rdfs::LABEL, &name.to_string())?;
        Ok(dir)
    }

    pub fn name(&self) -> ModelResult<Option<String>> {
        label(&self.0)
    }

    pub fn rename(&self, name: &str) -> ModelResult<()> {
        self.0.set(rdfs::LABEL, &name.to_string())
    }

    fn members(&self) -> Container {
        Container::wrap(self.0.clone(), ContainerKind::Bag)
    }

    /// Entries in the order they were added
    pub fn entries(&self) -> Vec<Resource> {
        self.members().member_resources()
    }

    /// Names of all entries; unnamed entries are skipped
    pub fn entry_names(&self) -> ModelResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.entries() {
            names.extend(label(&entry)?);
        }
        Ok(names)
    }

    /// Add `entry` unless it is already listed
    pub fn add_entry(&self, entry: &Resource) -> ModelResult<bool> {
        let members = self.members();
        let object = entry.to_object();
        if members.contains(&object) {
            return Ok(false);
        }
        members.push(object)?;
        Ok(true)
    }

    /// First entry whose label is `name`
    pub fn entry(&self, name: &str) -> ModelResult<Option<Resource>> {
        for entry in self.entries() {
            if label(&entry)?.as_deref() == Some(name) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Entry `name` when it is itself a directory
    pub fn subdirectory(&self, name: &str) -> ModelResult<Option<Directory>> {
        match self.entry(name)? {
            Some(entry) => Directory::cast(entry),
            None => Ok(None),
        }
    }

    /// Find or create the subdirectory `name`
    ///
    /// Fails when an entry of that name exists but is not a directory.
    pub fn mkdir(&self, name: &str) -> ModelResult<Directory> {
        if let Some(entry) = self.entry(name)? {
            return Directory::expect(entry);
        }
        let dir = Directory::create(self.0.model(), None, name)?;
        self.add_entry(&dir.0)?;
        Ok(dir)
    }

    /// Unlist the entry `name`; the entry's own statements are kept
    pub fn remove_entry(&self, name: &str) -> ModelResult<Option<Resource>> {
        let Some(entry) = self.entry(name)? else {
            return Ok(None);
        };
        self.members().remove_value(&entry.to_object())?;
        Ok(Some(entry))
    }

    /// Walk a `/`-separated path; empty and `.` segments are skipped
    pub fn lookup(&self, path: &str) -> ModelResult<Option<Resource>> {
        let mut segments = path.split('/').filter(|s| !s.is_empty() && *s != ".").peekable();
        let mut current = self.clone();
        while let Some(segment) = segments.next() {
            let Some(entry) = current.entry(segment)? else {
                return Ok(None);
            };
            if segments.peek().is_none() {
                return Ok(Some(entry));
            }
            match Directory::cast(entry)? {
                Some(dir) => current = dir,
                None => return Ok(None),
            }
        }
        Ok(Some(current.0))
    }

    /// Like [`lookup`](Self::lookup), but the target must be a directory
    pub fn lookup_dir(&self, path: &str) -> ModelResult<Option<Directory>> {
        match self.lookup(path)? {
            Some(entry) => Directory::cast(entry),
            None => Ok(None),
        }
    }
}

impl From<Directory> for Resource {
    fn from(dir: Directory) -> Self {
        dir.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;

    fn file(model: &Model, name: &str) -> Resource {
        let f = model.blank();
        f.set(rdfs::LABEL, &name.to_string()).unwrap();
        f
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let model = Model::new();
        let root = Directory::create(&model, Some("http://example.org/root"), "root").unwrap();
        for name in ["b", "a", "c"] {
            root.add_entry(&file(&model, name)).unwrap();
        }
        assert_eq!(root.entry_names().unwrap(), vec!["b", "a", "c"]);
        assert_eq!(root.name().unwrap().as_deref(), Some("root"));
    }

    #[test]
    fn test_add_entry_is_idempotent() {
        let model = Model::new();
        let root = Directory::create(&model, None, "root").unwrap();
        let f = file(&model, "f");
        assert!(root.add_entry(&f).unwrap());
        assert!(!root.add_entry(&f).unwrap());
        assert_eq!(root.entries().len(), 1);
    }

    #[test]
    fn test_mkdir_finds_or_creates() {
        let model = Model::new();
        let root = Directory::create(&model, None, "root").unwrap();
        let docs = root.mkdir("docs").unwrap();
        assert_eq!(root.mkdir("docs").unwrap(), docs);
        assert_eq!(root.entries().len(), 1);

        root.add_entry(&file(&model, "notes.txt")).unwrap();
        assert!(matches!(
            root.mkdir("notes.txt"),
            Err(ModelError::WrongType { .. })
        ));
    }

    #[test]
    fn test_lookup_paths() {
        let model = Model::new();
        let root = Directory::create(&model, None, "root").unwrap();
        let src = root.mkdir("a").unwrap().mkdir("b").unwrap();
        let main = file(&model, "main.rs");
        src.add_entry(&main).unwrap();

        assert_eq!(root.lookup("a/b/main.rs").unwrap(), Some(main.clone()));
        assert_eq!(root.lookup("./a//b/./main.rs").unwrap(), Some(main));
        assert_eq!(root.lookup_dir("a/b").unwrap(), Some(src));
        assert_eq!(root.lookup("").unwrap(), Some(root.as_resource().clone()));
        assert_eq!(root.lookup(".").unwrap(), Some(root.as_resource().clone()));
        assert_eq!(root.lookup("a/missing").unwrap(), None);
        assert_eq!(root.lookup("a/b/main.rs/deeper").unwrap(), None);
    }

    #[test]
    fn test_remove_entry_compacts_members() {
        let model = Model::new();
        let root = Directory::create(&model, None, "root").unwrap();
        for name in ["x", "y", "z"] {
            root.add_entry(&file(&model, name)).unwrap();
        }
        assert!(root.remove_entry("y").unwrap().is_some());
        assert!(root.remove_entry("y").unwrap().is_none());
        assert_eq!(root.entry_names().unwrap(), vec!["x", "z"]);
        assert!(root
            .as_resource()
            .has_property(&crate::vocab::rdf::member(2))
            .unwrap());
        assert!(!root
            .as_resource()
            .has_property(&crate::vocab::rdf::member(3))
            .unwrap());
    }
}
