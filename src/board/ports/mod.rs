//! Port contracts for board persistence collaborators.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod local_cache;
pub mod remote_store;

pub use local_cache::{LocalCache, LocalCacheError, LocalCacheResult};
pub use remote_store::{RemoteStore, RemoteStoreError, RemoteStoreResult};
