//! Identifier newtypes and allocators for the board domain.
//!
//! Board identifiers are opaque strings: the seed dataset uses short literal
//! ids (`"1"`, `"todo"`) while freshly allocated ids are time-ordered UUIDs.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::{NoContext, Timestamp, Uuid};

/// Unique identifier for a task on the board.
///
/// # Examples
///
/// ```
/// use corkboard::board::domain::TaskId;
///
/// let id = TaskId::new("task-1");
/// assert_eq!(id.as_str(), "task-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a board column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of an authenticated identity that can own tasks.
///
/// Supplied by the authentication provider; the board never mints these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wraps an identity string from the authentication provider.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh identifiers for new tasks and columns.
pub trait IdAllocator: Send + Sync {
    /// Returns an identifier not previously handed out for a task.
    fn next_task_id(&self) -> TaskId;

    /// Returns an identifier not previously handed out for a column.
    fn next_column_id(&self) -> ColumnId;
}

/// Allocates UUIDv7 identifiers stamped with the injected clock.
///
/// Identifiers minted at a later clock reading sort after earlier ones; two
/// identifiers from the same millisecond differ in their random bits.
#[derive(Debug, Clone)]
pub struct ClockIdAllocator<C> {
    clock: C,
}

impl<C> ClockIdAllocator<C>
where
    C: Clock + Send + Sync,
{
    /// Prefix applied to task identifiers.
    pub const TASK_PREFIX: &'static str = "task-";
    /// Prefix applied to column identifiers.
    pub const COLUMN_PREFIX: &'static str = "col-";

    /// Creates an allocator reading time from `clock`.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_uuid(&self) -> Uuid {
        let now = self.clock.utc();
        let seconds = u64::try_from(now.timestamp()).unwrap_or_default();
        Uuid::new_v7(Timestamp::from_unix(
            NoContext,
            seconds,
            now.timestamp_subsec_nanos(),
        ))
    }
}

impl<C> IdAllocator for ClockIdAllocator<C>
where
    C: Clock + Send + Sync,
{
    fn next_task_id(&self) -> TaskId {
        TaskId::new(format!("{}{}", Self::TASK_PREFIX, self.next_uuid()))
    }

    fn next_column_id(&self) -> ColumnId {
        ColumnId::new(format!("{}{}", Self::COLUMN_PREFIX, self.next_uuid()))
    }
}

/// Deterministic allocator yielding `task-1`, `task-2`, ... and `col-1`, ...
///
/// For tests only. Both sequences restart at one in every process, so over a
/// board restored from a persisted cache the first allocation collides with
/// an existing id and the transition fails with
/// [`BoardError::DuplicateIdentifier`](super::BoardError::DuplicateIdentifier).
/// Use [`ClockIdAllocator`] for real sessions.
#[derive(Debug, Default)]
pub struct SequentialIdAllocator {
    tasks: AtomicU64,
    columns: AtomicU64,
}

impl SequentialIdAllocator {
    /// Creates an allocator starting both sequences at one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn next_task_id(&self) -> TaskId {
        let next = self.tasks.fetch_add(1, Ordering::Relaxed) + 1;
        TaskId::new(format!("task-{next}"))
    }

    fn next_column_id(&self) -> ColumnId {
        let next = self.columns.fetch_add(1, Ordering::Relaxed) + 1;
        ColumnId::new(format!("col-{next}"))
    }
}
