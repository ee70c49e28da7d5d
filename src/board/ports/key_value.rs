//! Flat key-value port modelled on browser local storage.
//!
//! Values are JSON documents. Adapters built on this port share one key
//! layout, see [`crate::board::config::StorageKeys`].

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueStoreResult<T> = Result<T, KeyValueStoreError>;

/// Key-value persistence contract.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend cannot be read.
    async fn get(&self, key: &str) -> KeyValueStoreResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend rejects the write.
    async fn set(&self, key: &str, value: Value) -> KeyValueStoreResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend rejects the write.
    async fn remove(&self, key: &str) -> KeyValueStoreResult<()>;

    /// Lists every key currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend cannot be read.
    async fn keys(&self) -> KeyValueStoreResult<Vec<String>>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// The backing document is not a JSON object.
    #[error("malformed key-value document: {0}")]
    Malformed(String),

    /// Backend failure.
    #[error("key-value backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
