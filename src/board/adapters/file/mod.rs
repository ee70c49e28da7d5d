//! JSON file key-value store.
//!
//! Entries live in a single JSON object on disk. Every write goes to a
//! sibling temporary file that is then renamed over the original, so a crash
//! mid-write leaves the previous document intact. Access goes through a
//! capability handle on the configured directory only.

use crate::board::ports::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::{Map, Value};
use std::io;
use std::sync::{Arc, Mutex};

/// Key-value store backed by one JSON file.
///
/// Clones share an in-process lock, so read-modify-write cycles from the
/// same process never interleave.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: Utf8PathBuf,
    file_name: String,
    guard: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// File name used when none is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "kanban.json";

    /// Opens a store in `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when the directory cannot be
    /// created.
    pub fn open(root: impl Into<Utf8PathBuf>) -> KeyValueStoreResult<Self> {
        let root_dir = root.into();
        Dir::create_ambient_dir_all(&root_dir, ambient_authority())
            .map_err(KeyValueStoreError::backend)?;
        Ok(Self {
            root: root_dir,
            file_name: Self::DEFAULT_FILE_NAME.to_owned(),
            guard: Arc::new(Mutex::new(())),
        })
    }

    /// Replaces the file name within the root directory.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Returns the directory holding the file.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the full path of the backing file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.root.join(&self.file_name)
    }

    async fn run_blocking<F, T>(&self, f: F) -> KeyValueStoreResult<T>
    where
        F: FnOnce(&Dir, &str) -> KeyValueStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = self.root.clone();
        let file_name = self.file_name.clone();
        let guard = Arc::clone(&self.guard);
        tokio::task::spawn_blocking(move || {
            let _held = guard
                .lock()
                .map_err(|err| KeyValueStoreError::backend(io::Error::other(err.to_string())))?;
            let dir = Dir::open_ambient_dir(&root, ambient_authority())
                .map_err(KeyValueStoreError::backend)?;
            f(&dir, &file_name)
        })
        .await
        .map_err(KeyValueStoreError::backend)?
    }
}

fn read_entries(dir: &Dir, file_name: &str) -> KeyValueStoreResult<Map<String, Value>> {
    let text = match dir.read_to_string(file_name) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => return Err(KeyValueStoreError::backend(err)),
    };
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(entries)) => Ok(entries),
        Ok(_) => Err(KeyValueStoreError::Malformed(format!(
            "{file_name} does not hold a JSON object"
        ))),
        Err(err) => Err(KeyValueStoreError::Malformed(format!("{file_name}: {err}"))),
    }
}

fn write_entries(
    dir: &Dir,
    file_name: &str,
    entries: &Map<String, Value>,
) -> KeyValueStoreResult<()> {
    let bytes = serde_json::to_vec_pretty(entries).map_err(KeyValueStoreError::backend)?;
    let temp_name = format!("{file_name}.tmp");
    dir.write(&temp_name, bytes)
        .map_err(KeyValueStoreError::backend)?;
    dir.rename(&temp_name, dir, file_name)
        .map_err(KeyValueStoreError::backend)
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> KeyValueStoreResult<Option<Value>> {
        let lookup = key.to_owned();
        self.run_blocking(move |dir, file_name| {
            let mut entries = read_entries(dir, file_name)?;
            Ok(entries.remove(&lookup))
        })
        .await
    }

    async fn set(&self, key: &str, value: Value) -> KeyValueStoreResult<()> {
        let entry_key = key.to_owned();
        self.run_blocking(move |dir, file_name| {
            let mut entries = read_entries(dir, file_name)?;
            entries.insert(entry_key, value);
            write_entries(dir, file_name, &entries)
        })
        .await
    }

    async fn remove(&self, key: &str) -> KeyValueStoreResult<()> {
        let entry_key = key.to_owned();
        self.run_blocking(move |dir, file_name| {
            let mut entries = read_entries(dir, file_name)?;
            if entries.remove(&entry_key).is_none() {
                return Ok(());
            }
            write_entries(dir, file_name, &entries)
        })
        .await
    }

    async fn keys(&self) -> KeyValueStoreResult<Vec<String>> {
        self.run_blocking(|dir, file_name| {
            Ok(read_entries(dir, file_name)?.keys().cloned().collect())
        })
        .await
    }
}
