//! Filesystem adapters for board persistence ports.

mod local_cache;

pub use local_cache::DirLocalCache;
