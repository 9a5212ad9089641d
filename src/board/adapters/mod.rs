//! Adapter implementations for board persistence ports.
//!
//! - [`memory`]: in-process maps for tests and ephemeral sessions
//! - [`fs`]: directory-backed local cache
//! - [`postgres`]: `PostgreSQL` document store for remote persistence

pub mod fs;
pub mod memory;
pub mod postgres;
