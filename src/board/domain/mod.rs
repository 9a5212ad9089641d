//! Pure board state engine.
//!
//! The domain holds the board value type and every transition over it. No
//! type here performs I/O; persistence is expressed as planned
//! [`WriteInstruction`]s that the services layer hands to the ports.

mod column;
mod columns;
mod config;
mod creation;
mod error;
mod ids;
mod moves;
mod ownership;
mod reconcile;
mod seed;
mod state;
mod task;
mod writes;

pub use column::Column;
pub use config::{BoardConfig, CACHE_KEY_ENV, ConfigError, DEFAULT_COLUMN_ENV, MAX_COLUMNS_ENV};
pub use error::{BoardError, BoardResult, MoveRejection, Violation};
pub use ids::{ClockIdAllocator, ColumnId, IdAllocator, OwnerId, SequentialIdAllocator, TaskId};
pub use moves::{DragLocation, MoveDescriptor};
pub use reconcile::{Reconciliation, RemoteSnapshot, Repair};
pub use seed::{seed_board, seed_task_ids};
pub use state::{BoardDocument, BoardState, BoardTopology};
pub use task::{Task, TaskDraft};
pub use writes::{WriteInstruction, plan_full_sync, plan_task_sync, plan_writes};
