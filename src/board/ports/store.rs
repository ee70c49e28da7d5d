//! Store port for loading and saving one board per account.

use crate::board::domain::{AccountKey, BoardSnapshot, StoredBoard};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Board persistence contract.
///
/// Implementations scope storage by account. They return boards exactly as
/// stored; reconciliation into a consistent snapshot is the caller's job.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the stored board for an account.
    ///
    /// Returns `None` when the account has never saved a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the backend cannot be read or holds
    /// data that cannot be decoded.
    async fn load(&self, account: &AccountKey) -> BoardStoreResult<Option<StoredBoard>>;

    /// Replaces the stored board for an account.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the backend rejects the write.
    async fn save(&self, account: &AccountKey, board: &BoardSnapshot) -> BoardStoreResult<()>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// Stored data could not be decoded.
    #[error("corrupt board data under '{key}': {reason}")]
    Corrupt {
        /// Storage key or account holding the data.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Reports undecodable data under `key`.
    pub fn corrupt(key: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: err.to_string(),
        }
    }
}
