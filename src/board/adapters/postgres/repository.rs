//! `PostgreSQL` remote store keeping board documents as JSONB rows.

use super::{
    models::{NewTaskDocumentRow, NewTopologyRow, TaskDocumentRow, TopologyRow},
    schema::{board_topologies, task_documents},
};
use crate::board::{
    domain::{BoardTopology, OwnerId, Task, TaskId},
    ports::{RemoteStore, RemoteStoreError, RemoteStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed remote store.
///
/// Both tables are written with upserts, so concurrent writers follow
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct PostgresRemoteStore<C> {
    pool: BoardPgPool,
    clock: Arc<C>,
}

/// A stored document disagrees with the row that holds it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub(super) enum DocumentMismatch {
    /// The task document carries another id than its row.
    #[error("task row {row} holds document for task {document}")]
    TaskId {
        /// Row key.
        row: String,
        /// Identifier inside the document.
        document: String,
    },
    /// The task document names another owner than its row.
    #[error("task row {row} is filed under owner {row_owner} but owned by {document_owner:?}")]
    Owner {
        /// Row key.
        row: String,
        /// Owner column value.
        row_owner: String,
        /// Owner inside the document.
        document_owner: Option<String>,
    },
}

impl<C> PostgresRemoteStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RemoteStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RemoteStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RemoteStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RemoteStoreError::persistence)?
    }
}

#[async_trait]
impl<C> RemoteStore for PostgresRemoteStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn find_topology(&self, owner: &OwnerId) -> RemoteStoreResult<Option<BoardTopology>> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = board_topologies::table
                .filter(board_topologies::owner_id.eq(&owner_key))
                .select(TopologyRow::as_select())
                .first::<TopologyRow>(connection)
                .optional()
                .map_err(RemoteStoreError::persistence)?;
            row.map(row_to_topology).transpose()
        })
        .await
    }

    async fn store_topology(
        &self,
        owner: &OwnerId,
        topology: &BoardTopology,
    ) -> RemoteStoreResult<()> {
        let new_row = topology_to_row(owner, topology, self.clock.utc())?;
        self.run_blocking(move |connection| {
            diesel::insert_into(board_topologies::table)
                .values(&new_row)
                .on_conflict(board_topologies::owner_id)
                .do_update()
                .set((
                    board_topologies::document.eq(excluded(board_topologies::document)),
                    board_topologies::updated_at.eq(excluded(board_topologies::updated_at)),
                ))
                .execute(connection)
                .map_err(RemoteStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: &TaskId) -> RemoteStoreResult<Option<Task>> {
        let task_key = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = task_documents::table
                .filter(task_documents::id.eq(&task_key))
                .select(TaskDocumentRow::as_select())
                .first::<TaskDocumentRow>(connection)
                .optional()
                .map_err(RemoteStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn store_task(&self, task: &Task) -> RemoteStoreResult<()> {
        let new_row = task_to_row(task, self.clock.utc())?;
        self.run_blocking(move |connection| {
            diesel::insert_into(task_documents::table)
                .values(&new_row)
                .on_conflict(task_documents::id)
                .do_update()
                .set((
                    task_documents::owner_id.eq(excluded(task_documents::owner_id)),
                    task_documents::document.eq(excluded(task_documents::document)),
                    task_documents::updated_at.eq(excluded(task_documents::updated_at)),
                ))
                .execute(connection)
                .map_err(RemoteStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn remove_task(&self, id: &TaskId) -> RemoteStoreResult<()> {
        let task_key = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(task_documents::table.filter(task_documents::id.eq(&task_key)))
                    .execute(connection)
                    .map_err(RemoteStoreError::persistence)?;
            debug!(task = %task_key, removed, "removed task document");
            Ok(())
        })
        .await
    }

    async fn find_tasks_by_owner(&self, owner: &OwnerId) -> RemoteStoreResult<Vec<Task>> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = task_documents::table
                .filter(task_documents::owner_id.eq(&owner_key))
                .order(task_documents::id.asc())
                .select(TaskDocumentRow::as_select())
                .load::<TaskDocumentRow>(connection)
                .map_err(RemoteStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

pub(super) fn topology_to_row(
    owner: &OwnerId,
    topology: &BoardTopology,
    updated_at: DateTime<Utc>,
) -> RemoteStoreResult<NewTopologyRow> {
    let document = serde_json::to_value(topology).map_err(RemoteStoreError::persistence)?;
    Ok(NewTopologyRow {
        owner_id: owner.as_str().to_owned(),
        document,
        updated_at,
    })
}

pub(super) fn row_to_topology(row: TopologyRow) -> RemoteStoreResult<BoardTopology> {
    debug!(owner = %row.owner_id, updated_at = %row.updated_at, "loaded board topology");
    serde_json::from_value(row.document).map_err(RemoteStoreError::persistence)
}

pub(super) fn task_to_row(
    task: &Task,
    updated_at: DateTime<Utc>,
) -> RemoteStoreResult<NewTaskDocumentRow> {
    let owner = task
        .owner_id()
        .ok_or_else(|| RemoteStoreError::UnownedTask(task.id().clone()))?;
    let document = serde_json::to_value(task).map_err(RemoteStoreError::persistence)?;
    Ok(NewTaskDocumentRow {
        id: task.id().as_str().to_owned(),
        owner_id: owner.as_str().to_owned(),
        document,
        updated_at,
    })
}

pub(super) fn row_to_task(row: TaskDocumentRow) -> RemoteStoreResult<Task> {
    let TaskDocumentRow {
        id,
        owner_id,
        document,
        updated_at,
    } = row;
    let task: Task = serde_json::from_value(document).map_err(RemoteStoreError::persistence)?;

    if task.id().as_str() != id {
        return Err(RemoteStoreError::persistence(DocumentMismatch::TaskId {
            row: id,
            document: task.id().to_string(),
        }));
    }
    if task.owner_id().map(OwnerId::as_str) != Some(owner_id.as_str()) {
        return Err(RemoteStoreError::persistence(DocumentMismatch::Owner {
            row: id,
            row_owner: owner_id,
            document_owner: task.owner_id().map(ToString::to_string),
        }));
    }
    debug!(task = %id, %updated_at, "loaded task document");
    Ok(task)
}
