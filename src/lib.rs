//! Corkboard: a Kanban board state engine.
//!
//! This crate models a board of ordered columns holding ordered tasks and
//! computes every state transition over it: drag-and-drop moves, column
//! lifecycle, task creation, and the merge and purge that run when a user
//! signs in or out.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board transitions with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the local cache and remote store
//! - **Adapters**: In-memory, filesystem and `PostgreSQL` implementations
//!
//! # Modules
//!
//! - [`board`]: Board state, transitions, reconciliation and persistence

pub mod board;
