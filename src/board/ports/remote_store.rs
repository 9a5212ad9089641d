//! Remote document store port.
//!
//! The store keeps one layout document per owner and one document per task,
//! queryable by the task's `ownerId`. Writes are last-write-wins; there is
//! no version check.

use crate::board::domain::{BoardTopology, OwnerId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Authoritative remote persistence for identity-owned board data.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Reads the column layout stored for `owner`.
    ///
    /// Returns `None` when the owner never stored a layout.
    async fn find_topology(&self, owner: &OwnerId) -> RemoteStoreResult<Option<BoardTopology>>;

    /// Stores the column layout for `owner`, replacing any previous one.
    async fn store_topology(
        &self,
        owner: &OwnerId,
        topology: &BoardTopology,
    ) -> RemoteStoreResult<()>;

    /// Reads a single task document.
    ///
    /// Returns `None` when the task is not stored.
    async fn find_task(&self, id: &TaskId) -> RemoteStoreResult<Option<Task>>;

    /// Stores a task document, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::UnownedTask`] for tasks without an owner;
    /// the store is partitioned by owner and has no place for them.
    async fn store_task(&self, task: &Task) -> RemoteStoreResult<()>;

    /// Removes a task document. Removing a task that is not stored succeeds.
    async fn remove_task(&self, id: &TaskId) -> RemoteStoreResult<()>;

    /// Returns every task whose `ownerId` equals `owner`, ordered by id.
    async fn find_tasks_by_owner(&self, owner: &OwnerId) -> RemoteStoreResult<Vec<Task>>;
}

/// Errors returned by remote store implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteStoreError {
    /// The task has no owner and cannot be stored remotely.
    #[error("task {0} has no owner")]
    UnownedTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
