//! Crash-safe single-file storage
//!
//! Save protocol:
//! 1. serialize into `.{name}.XXXX.tmp` next to the live file
//! 2. flush, and fsync when `sync` is on
//! 3. shift `{name}.bak.N` up by one and move the live file to `{name}.bak.1`
//! 4. rename the temp file onto the live path
//! 5. fsync the directory when `sync` is on
//!
//! A crash between 3 and 4 leaves no live file; `open` then restores the
//! newest backup. Temp files left by a crash are deleted on `open`.

use super::{StorageConfig, StorageError, StorageResult};
use crate::model::{Model, ModelResult};
use crate::rdf::{RdfFormat, RdfParser, RdfSerializer, RdfStore};
use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A model persisted to one RDF file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    format: RdfFormat,
    config: StorageConfig,
    model: Model,
}

impl FileStorage {
    /// Open (or prepare to create) the file at `path`
    pub fn open(path: impl AsRef<Path>, config: StorageConfig) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let format = resolve_format(&path, &config)?;

        let stale = remove_stale_temp_files(&path)?;
        if stale > 0 {
            warn!("Removed {} stale temp file(s) next to {:?}", stale, path);
        }

        if !path.exists() {
            if let Some(newest) = backups(&path)?.into_iter().next() {
                warn!("{:?} is missing, restoring from {:?}", path, newest);
                fs::copy(&newest, &path)?;
            }
        }

        let storage = Self {
            path,
            format,
            config,
            model: Model::new(),
        };
        let count = storage.reload()?;
        info!("Opened {:?} as {:?}: {} triples", storage.path, storage.format, count);
        Ok(storage)
    }

    /// Start an empty model for `path`, ignoring any current contents
    ///
    /// The existing file is not read; the next save replaces it (and backs
    /// it up as usual).
    pub fn create(path: impl AsRef<Path>, config: StorageConfig) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let format = resolve_format(&path, &config)?;
        remove_stale_temp_files(&path)?;
        Ok(Self {
            path,
            format,
            config,
            model: Model::new(),
        })
    }

    /// The live model
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Replace the model contents with the file contents; returns the triple count
    ///
    /// A missing file reads as an empty graph.
    pub fn reload(&self) -> StorageResult<usize> {
        let store: RdfStore = if self.path.exists() {
            RdfParser::parse_file(&self.path, self.format, self.config.base_iri.as_deref())?
                .into_iter()
                .collect()
        } else {
            RdfStore::new()
        };
        let count = store.len();
        self.model.replace(store);
        debug!("Loaded {} triples from {:?}", count, self.path);
        Ok(count)
    }

    /// Write the model to disk
    pub fn save(&self) -> StorageResult<()> {
        let dir = parent_dir(&self.path);
        let mut temp = tempfile::Builder::new()
            .prefix(&temp_prefix(&self.path))
            .suffix(".tmp")
            .tempfile_in(&dir)?;

        let snapshot = self.model.snapshot();
        {
            let writer = BufWriter::new(temp.as_file_mut());
            let mut writer = RdfSerializer::serialize_to(writer, snapshot.iter(), self.format)?;
            writer.flush()?;
        }
        if self.config.sync {
            temp.as_file().sync_all()?;
        }

        if self.config.backups > 0 && self.path.exists() {
            rotate_backups(&self.path, self.config.backups)?;
        }

        temp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        if self.config.sync {
            sync_dir(&dir)?;
        }

        debug!("Saved {} triples to {:?}", snapshot.len(), self.path);
        Ok(())
    }

    /// Start a transaction over the current model contents
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            storage: self,
            snapshot: Some(self.model.snapshot()),
        }
    }

    /// Run `f` in a transaction; commit on success, roll back on error
    pub fn update<T>(&self, f: impl FnOnce(&Model) -> ModelResult<T>) -> StorageResult<T> {
        let tx = self.begin();
        match f(tx.model()) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                tx.rollback();
                Err(e.into())
            }
        }
    }
}

/// Pending changes to a [`FileStorage`] model
///
/// Dropping a transaction without committing rolls it back.
#[derive(Debug)]
pub struct Transaction<'a> {
    storage: &'a FileStorage,
    snapshot: Option<RdfStore>,
}

impl Transaction<'_> {
    pub fn model(&self) -> &Model {
        &self.storage.model
    }

    /// Save the changes; on failure the model is restored to the snapshot
    pub fn commit(mut self) -> StorageResult<()> {
        let snapshot = self.snapshot.take();
        if let Err(e) = self.storage.save() {
            if let Some(snapshot) = snapshot {
                self.storage.model.replace(snapshot);
            }
            warn!("Commit to {:?} failed, changes rolled back: {}", self.storage.path, e);
            return Err(e);
        }
        Ok(())
    }

    /// Discard the changes
    pub fn rollback(mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.storage.model.replace(snapshot);
            debug!("Rolled back transaction on {:?}", self.storage.path);
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            warn!(
                "Transaction on {:?} dropped without commit, rolling back",
                self.storage.path
            );
            self.storage.model.replace(snapshot);
        }
    }
}

fn resolve_format(path: &Path, config: &StorageConfig) -> StorageResult<RdfFormat> {
    match config.format {
        Some(format) => Ok(format),
        None => RdfFormat::from_path(path).ok_or_else(|| StorageError::UnknownFormat(path.to_path_buf())),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn file_name(path: &Path) -> OsString {
    path.file_name().map(OsString::from).unwrap_or_default()
}

fn temp_prefix(path: &Path) -> OsString {
    let mut prefix = OsString::from(".");
    prefix.push(file_name(path));
    prefix.push(".");
    prefix
}

/// `{path}.bak.{n}`
pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = file_name(path);
    name.push(format!(".bak.{}", n));
    path.with_file_name(name)
}

/// Existing backups of `path`, newest (`.bak.1`) first
pub fn backups(path: &Path) -> StorageResult<Vec<PathBuf>> {
    let dir = parent_dir(path);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let prefix = format!("{}.bak.", file_name(path).to_string_lossy());

    let mut found = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let generation = name
            .to_str()
            .and_then(|n| n.strip_prefix(&prefix))
            .and_then(|n| n.parse::<usize>().ok());
        if let Some(n) = generation {
            found.push((n, entry.path()));
        }
    }
    found.sort_by_key(|(n, _)| *n);
    Ok(found.into_iter().map(|(_, p)| p).collect())
}

fn rotate_backups(path: &Path, keep: usize) -> StorageResult<()> {
    let oldest = backup_path(path, keep);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..keep).rev() {
        let from = backup_path(path, n);
        if from.exists() {
            fs::rename(&from, backup_path(path, n + 1))?;
        }
    }
    fs::rename(path, backup_path(path, 1))?;
    debug!("Rotated backups of {:?} (keeping {})", path, keep);
    Ok(())
}

fn remove_stale_temp_files(path: &Path) -> StorageResult<usize> {
    let dir = parent_dir(path);
    if !dir.exists() {
        return Ok(0);
    }
    let prefix = temp_prefix(path).to_string_lossy().into_owned();

    let mut removed = 0;
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let stale = name
            .to_str()
            .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".tmp"));
        if stale {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> StorageResult<()> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> StorageResult<()> {
    Ok(())
}
