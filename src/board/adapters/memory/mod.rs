//! In-memory adapters for board persistence ports.

mod local_cache;
mod remote_store;

pub use local_cache::InMemoryLocalCache;
pub use remote_store::InMemoryRemoteStore;
