//! Key-value storage backends.
//!
//! [`PreferenceStore`](super::PreferenceStore) only needs string get/set/remove
//! on a single key, so backends are deliberately small. Two are provided:
//!
//! - [`MemoryStorage`]: an in-process map. Clones share the same entries,
//!   which lets tests hand one clone to the engine and inspect the other.
//! - [`FileStorage`]: a JSON object on disk, loaded on open and written back
//!   by [`Storage::flush`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StorageError;

/// String key-value storage holding persisted preferences.
pub trait Storage {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Deletes `key`. Removing a missing key is a no-op.
    fn remove(&mut self, key: &str);

    /// Persists pending changes. In-memory backends have nothing to do.
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-memory storage with shared entries across clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.into(), value.into());
        storage
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Storage backed by a JSON object file.
///
/// Non-string JSON values are kept as their JSON text, so a hand-edited
/// `{"theme": 5}` reads back as the (invalid) preference `"5"` and gets
/// sanitized like any other bad entry.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStorage {
    /// Opens the file at `path`. A missing file opens as empty storage.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => parse_entries(&path, &content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_entries(path: &Path, content: &str) -> Result<BTreeMap<String, String>, StorageError> {
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(content).map_err(|source| StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) != Some(value) {
            self.entries.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json + "\n").map_err(io_err)?;

        self.dirty = false;
        Ok(())
    }
}
