//! `PostgreSQL` adapters for remote board persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresRemoteStore};
