//! Kanban board state engine.
//!
//! Boards are immutable values of tasks, columns and column order. Every
//! mutation intent (a task move, column add/rename/delete, task creation or
//! an identity transition) produces a new board that keeps each task placed
//! in exactly one column. The module follows hexagonal architecture:
//!
//! - Domain types and transitions in [`domain`]
//! - Port contracts for the local cache and remote store in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The engine and the adopt-then-persist session in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
