//! Directory-backed local cache.
//!
//! Each key maps to one `<key>.json` file inside a capability-scoped
//! directory handle, so cache keys can never address files outside it.
//! Writes go to a temporary sibling first and are renamed into place.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::board::ports::{LocalCache, LocalCacheError, LocalCacheResult};

/// Local cache storing blobs as files in one directory.
#[derive(Debug, Clone)]
pub struct DirLocalCache {
    dir: Arc<Dir>,
}

impl DirLocalCache {
    /// Opens the cache directory at `path`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`LocalCacheError::Persistence`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> LocalCacheResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(LocalCacheError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(LocalCacheError::persistence)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LocalCacheResult<T>
    where
        F: FnOnce(&Dir) -> LocalCacheResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(LocalCacheError::persistence)?
    }
}

/// Maps a cache key to its file name, rejecting keys that are not a plain
/// file stem.
fn blob_file_name(key: &str) -> LocalCacheResult<String> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if !is_valid {
        return Err(LocalCacheError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.json"))
}

#[async_trait]
impl LocalCache for DirLocalCache {
    async fn get(&self, key: &str) -> LocalCacheResult<Option<String>> {
        let file_name = blob_file_name(key)?;
        self.run_blocking(move |dir| match dir.read_to_string(&file_name) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LocalCacheError::persistence(err)),
        })
        .await
    }

    async fn set(&self, key: &str, blob: String) -> LocalCacheResult<()> {
        let file_name = blob_file_name(key)?;
        let staging_name = format!(".{file_name}.tmp");
        self.run_blocking(move |dir| {
            dir.write(&staging_name, blob.as_bytes())
                .map_err(LocalCacheError::persistence)?;
            dir.rename(&staging_name, dir, &file_name)
                .map_err(LocalCacheError::persistence)
        })
        .await
    }
}
