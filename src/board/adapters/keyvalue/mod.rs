//! Board store layered over any [`KeyValueStore`].
//!
//! All boards live in one consolidated document under
//! [`StorageKeys::database_key`], mapping normalised account keys to their
//! stored board. Older deployments kept one `kanban-tasks::<account>` and one
//! `kanban-columns::<account>` entry per account; those are folded into the
//! document when the store is opened and then removed.
//!
//! Every read-modify-write of the document holds the store's document lock,
//! so concurrent saves for different accounts sharing one store never
//! overwrite each other.

use crate::board::{
    config::StorageKeys,
    domain::{AccountKey, BoardSnapshot, StoredBoard},
    ports::{BoardStore, BoardStoreError, BoardStoreResult, KeyValueStore},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The consolidated board document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Layout version.
    pub version: u32,
    /// Stored boards keyed by normalised account key.
    #[serde(default)]
    pub users: BTreeMap<String, StoredBoard>,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self {
            version: StorageKeys::DOCUMENT_VERSION,
            users: BTreeMap::new(),
        }
    }
}

/// Board store persisting into a key-value backend.
///
/// Clones share the document lock.
#[derive(Debug, Clone)]
pub struct KeyValueBoardStore<K>
where
    K: KeyValueStore,
{
    backend: Arc<K>,
    keys: StorageKeys,
    document_lock: Arc<Mutex<()>>,
}

impl<K> KeyValueBoardStore<K>
where
    K: KeyValueStore,
{
    /// Opens the store, migrating any legacy per-account entries first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the backend fails or the consolidated
    /// document cannot be decoded.
    pub async fn open(backend: Arc<K>, keys: StorageKeys) -> BoardStoreResult<Self> {
        let store = Self {
            backend,
            keys,
            document_lock: Arc::new(Mutex::new(())),
        };
        store.migrate_legacy().await?;
        Ok(store)
    }

    /// Returns the storage key layout.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Folds legacy per-account entries into the consolidated document.
    ///
    /// Returns the number of accounts migrated. Entries that cannot be
    /// decoded are left in place and reported; everything else under a
    /// legacy prefix is removed once the document has been written.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the backend fails or the consolidated
    /// document cannot be decoded.
    pub async fn migrate_legacy(&self) -> BoardStoreResult<usize> {
        let legacy_keys: Vec<String> = self
            .backend
            .keys()
            .await
            .map_err(BoardStoreError::persistence)?
            .into_iter()
            .filter(|key| self.keys.is_legacy_key(key))
            .collect();
        if legacy_keys.is_empty() {
            return Ok(0);
        }

        let _held = self.document_lock.lock().await;
        let mut document = self.read_document().await?;
        let mut retained = HashSet::new();
        let mut migrated = 0_usize;
        for key in &legacy_keys {
            let Some(raw_account) = key.strip_prefix(self.keys.legacy_tasks_prefix.as_str())
            else {
                continue;
            };
            let Ok(account) = AccountKey::new(raw_account) else {
                warn!(key = %key, "keeping legacy entry without a usable account");
                retained.insert(key.clone());
                retained.insert(self.keys.legacy_columns_key(raw_account));
                continue;
            };
            match self.read_legacy_board(key, raw_account).await {
                Ok(board) => {
                    document.users.insert(account.as_str().to_owned(), board);
                    migrated = migrated.saturating_add(1);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "keeping undecodable legacy entry");
                    retained.insert(key.clone());
                    retained.insert(self.keys.legacy_columns_key(raw_account));
                }
            }
        }

        self.write_document(&document).await?;
        let mut removed = 0_usize;
        for key in legacy_keys.iter().filter(|key| !retained.contains(*key)) {
            self.backend
                .remove(key)
                .await
                .map_err(BoardStoreError::persistence)?;
            removed = removed.saturating_add(1);
        }
        info!(
            accounts = migrated,
            removed_keys = removed,
            "migrated legacy board entries"
        );
        Ok(migrated)
    }

    async fn read_legacy_board(
        &self,
        tasks_key: &str,
        raw_account: &str,
    ) -> BoardStoreResult<StoredBoard> {
        let tasks = self.read_legacy_list(tasks_key).await?;
        let columns = self
            .read_legacy_list(&self.keys.legacy_columns_key(raw_account))
            .await?;
        Ok(StoredBoard { columns, tasks })
    }

    async fn read_legacy_list<T>(&self, key: &str) -> BoardStoreResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let value = self
            .backend
            .get(key)
            .await
            .map_err(BoardStoreError::persistence)?;
        match value {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(text)) => {
                serde_json::from_str(&text).map_err(|err| BoardStoreError::corrupt(key, &err))
            }
            Some(other) => {
                serde_json::from_value(other).map_err(|err| BoardStoreError::corrupt(key, &err))
            }
        }
    }

    async fn read_document(&self) -> BoardStoreResult<BoardDocument> {
        let key = self.keys.database_key.as_str();
        let value = self
            .backend
            .get(key)
            .await
            .map_err(BoardStoreError::persistence)?;
        match value {
            None | Some(Value::Null) => Ok(BoardDocument::default()),
            Some(document) => {
                serde_json::from_value(document).map_err(|err| BoardStoreError::corrupt(key, &err))
            }
        }
    }

    async fn write_document(&self, document: &BoardDocument) -> BoardStoreResult<()> {
        let key = self.keys.database_key.as_str();
        let value =
            serde_json::to_value(document).map_err(|err| BoardStoreError::corrupt(key, &err))?;
        self.backend
            .set(key, value)
            .await
            .map_err(BoardStoreError::persistence)
    }
}

#[async_trait]
impl<K> BoardStore for KeyValueBoardStore<K>
where
    K: KeyValueStore,
{
    async fn load(&self, account: &AccountKey) -> BoardStoreResult<Option<StoredBoard>> {
        let document = self.read_document().await?;
        Ok(document.users.get(account.as_str()).cloned())
    }

    async fn save(&self, account: &AccountKey, board: &BoardSnapshot) -> BoardStoreResult<()> {
        let _held = self.document_lock.lock().await;
        let mut document = self.read_document().await?;
        document
            .users
            .insert(account.as_str().to_owned(), StoredBoard::from(board));
        self.write_document(&document).await
    }
}
