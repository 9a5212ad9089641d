//! Application services for board mutation and persistence.

mod engine;
mod session;

pub use engine::BoardEngine;
pub use session::{BoardSession, BoardSessionError, BoardSessionResult};
