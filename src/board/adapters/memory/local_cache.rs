//! In-memory local cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{LocalCache, LocalCacheError, LocalCacheResult};

/// Thread-safe in-memory blob cache.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalCache {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated with one blob.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let blobs = HashMap::from([(key.into(), blob.into())]);
        Self {
            blobs: Arc::new(RwLock::new(blobs)),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> LocalCacheError {
    LocalCacheError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LocalCache for InMemoryLocalCache {
    async fn get(&self, key: &str) -> LocalCacheResult<Option<String>> {
        let blobs = self.blobs.read().map_err(poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: String) -> LocalCacheResult<()> {
        if key.trim().is_empty() {
            return Err(LocalCacheError::InvalidKey(key.to_owned()));
        }
        let mut blobs = self.blobs.write().map_err(poisoned)?;
        blobs.insert(key.to_owned(), blob);
        Ok(())
    }
}
