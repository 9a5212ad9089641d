//! Error types for board transitions and state validation.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Result type for board transitions.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors returned by board transitions.
///
/// Every variant is recoverable: a failed transition never yields a partially
/// mutated board, so callers keep rendering the state they already hold.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A move descriptor does not match the current board.
    #[error("invalid move: {0}")]
    InvalidMove(MoveRejection),

    /// The board already holds the configured maximum number of columns.
    #[error("column limit of {limit} reached")]
    ColumnLimitExceeded {
        /// Configured maximum column count.
        limit: usize,
    },

    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A freshly allocated identifier is already in use.
    #[error("identifier already in use: {0}")]
    DuplicateIdentifier(String),

    /// Stored board data violates the board invariants.
    #[error("corrupt board state: {0}")]
    CorruptState(Violation),
}

impl BoardError {
    /// Creates a validation error for the named field.
    #[must_use]
    pub const fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }
}

/// Reason a move descriptor was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveRejection {
    /// The source column does not exist.
    #[error("unknown source column {0}")]
    UnknownSourceColumn(ColumnId),

    /// The destination column does not exist.
    #[error("unknown destination column {0}")]
    UnknownDestinationColumn(ColumnId),

    /// The source index lies outside the source column.
    #[error("source index {index} out of range for column {column} of length {len}")]
    SourceIndexOutOfRange {
        /// Source column identifier.
        column: ColumnId,
        /// Requested source index.
        index: usize,
        /// Current length of the source column.
        len: usize,
    },

    /// The task at the source index is not the task being moved.
    #[error("expected task {expected} at source index, found {found}")]
    TaskMismatch {
        /// Task named by the descriptor.
        expected: TaskId,
        /// Task actually found at the source index.
        found: TaskId,
    },

    /// The destination index lies beyond the end of the destination column.
    #[error("destination index {index} out of range for column {column} of length {len}")]
    DestinationIndexOutOfRange {
        /// Destination column identifier.
        column: ColumnId,
        /// Requested destination index.
        index: usize,
        /// Length the destination sequence has before insertion.
        len: usize,
    },
}

/// Board invariant breach detected while validating stored data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    /// The column order names a column that does not exist.
    #[error("column order references missing column {0}")]
    OrderedColumnMissing(ColumnId),

    /// A column exists but is absent from the column order.
    #[error("column {0} is missing from the column order")]
    UnorderedColumn(ColumnId),

    /// The column order lists a column more than once.
    #[error("column {0} appears more than once in the column order")]
    DuplicateOrderEntry(ColumnId),

    /// A column is stored under a key that differs from its identifier.
    #[error("column stored under {key} carries identifier {id}")]
    ColumnKeyMismatch {
        /// Map key.
        key: ColumnId,
        /// Identifier inside the column.
        id: ColumnId,
    },

    /// A task is stored under a key that differs from its identifier.
    #[error("task stored under {key} carries identifier {id}")]
    TaskKeyMismatch {
        /// Map key.
        key: TaskId,
        /// Identifier inside the task.
        id: TaskId,
    },

    /// A column references a task that does not exist.
    #[error("column {column} references unknown task {task}")]
    UnknownTaskReference {
        /// Referencing column.
        column: ColumnId,
        /// Missing task.
        task: TaskId,
    },

    /// A task is placed more than once across all columns.
    #[error("task {0} is placed more than once")]
    DuplicatePlacement(TaskId),

    /// A task exists but no column references it.
    #[error("task {0} is not placed in any column")]
    UnplacedTask(TaskId),

    /// The stored payload could not be decoded at all.
    #[error("undecodable board payload: {0}")]
    Undecodable(String),
}

impl From<Violation> for BoardError {
    fn from(violation: Violation) -> Self {
        Self::CorruptState(violation)
    }
}

impl From<MoveRejection> for BoardError {
    fn from(rejection: MoveRejection) -> Self {
        Self::InvalidMove(rejection)
    }
}
