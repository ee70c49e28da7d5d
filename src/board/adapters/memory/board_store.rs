//! In-memory board store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{AccountKey, BoardSnapshot, StoredBoard},
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

/// Thread-safe in-memory board store keyed by account.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    boards: Arc<RwLock<HashMap<AccountKey, StoredBoard>>>,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a stored board directly, bypassing reconciliation.
    ///
    /// Useful for seeding legacy-shaped data.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] if the lock is poisoned.
    pub fn insert_stored(&self, account: AccountKey, board: StoredBoard) -> BoardStoreResult<()> {
        let mut boards = self.boards.write().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        boards.insert(account, board);
        Ok(())
    }

    /// Returns the number of accounts with a stored board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] if the lock is poisoned.
    pub fn account_count(&self) -> BoardStoreResult<usize> {
        let boards = self.boards.read().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(boards.len())
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self, account: &AccountKey) -> BoardStoreResult<Option<StoredBoard>> {
        let boards = self.boards.read().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(boards.get(account).cloned())
    }

    async fn save(&self, account: &AccountKey, board: &BoardSnapshot) -> BoardStoreResult<()> {
        let mut boards = self.boards.write().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        boards.insert(account.clone(), StoredBoard::from(board));
        Ok(())
    }
}
