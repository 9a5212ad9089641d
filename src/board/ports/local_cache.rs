//! Local on-device cache port: a key-value blob store.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for local cache operations.
pub type LocalCacheResult<T> = Result<T, LocalCacheError>;

/// Key-value blob storage on the local device.
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `None` when nothing is stored under the key.
    async fn get(&self, key: &str) -> LocalCacheResult<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError::InvalidKey`] when the key cannot address a
    /// blob in this cache, or [`LocalCacheError::Persistence`] when the write
    /// fails.
    async fn set(&self, key: &str, blob: String) -> LocalCacheResult<()>;
}

/// Errors returned by local cache implementations.
#[derive(Debug, Clone, Error)]
pub enum LocalCacheError {
    /// The key is empty or not addressable by the backing store.
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LocalCacheError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
