//! String key-value persistence shared by favorites and the journal.
//!
//! The contract matches browser local storage: `get` returns the stored text
//! or nothing, `set` replaces it. Readers decode values with [`load_list`],
//! which treats absent and unreadable values as an empty list.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Decode the JSON list stored under `key`.
///
/// Missing keys, `null`, and text that does not parse as a list of `T` all
/// yield an empty list; the last case is logged.
pub fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(err) => {
            warn!(key, error = %err, "stored value is not a valid list; treating as empty");
            Vec::new()
        }
    }
}

/// Encode `items` as JSON and store them under `key`.
pub fn save_list<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let encoded = serde_json::to_string(items).with_context(|| format!("encoding {key}"))?;
    store.set(key, encoded)
}

/// Volatile store, one per page session.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file of string entries.
///
/// Every `set` re-reads the file, merges its one key and rewrites the file
/// through a temp file in the same directory, so handles on the same path
/// keep each other's keys and readers never see a partial write. `get`
/// answers from the entries seen at open or at this handle's last write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`, starting empty when the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating store directory {}", dir.display()))?;
        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, &self.entries)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)
            .with_context(|| format!("writing store {}", self.path.display()))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.is_file() {
        debug!(path = %path.display(), "store file missing; starting empty");
        return Ok(BTreeMap::new());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading store {}", path.display()))?;
    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "store file is corrupt; starting empty");
            Ok(BTreeMap::new())
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries = read_entries(&self.path)?;
        self.entries.insert(key.to_string(), value);
        self.persist()
    }
}
