//! Adopt-then-persist pipeline around the board engine.
//!
//! A session owns the adopted board and the current identity. Every
//! mutation computes the next board with [`BoardEngine`], adopts it, and only
//! then issues the planned writes. Write failures are logged and never undo
//! the adopted board.

use super::BoardEngine;
use crate::board::{
    domain::{
        BoardError, BoardState, ColumnId, IdAllocator, MoveDescriptor, OwnerId, RemoteSnapshot,
        WriteInstruction, plan_full_sync, plan_task_sync, plan_writes,
    },
    ports::{LocalCache, LocalCacheError, RemoteStore, RemoteStoreResult},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to session callers.
#[derive(Debug, Clone, Error)]
pub enum BoardSessionError {
    /// The requested transition was rejected; the adopted board is unchanged.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The local cache could not be read while starting the session.
    #[error("failed to read cached board: {0}")]
    CacheUnavailable(#[from] LocalCacheError),
}

/// Result type for session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// Single-writer board session bound to persistence collaborators.
pub struct BoardSession<L, R, A>
where
    L: LocalCache,
    R: RemoteStore,
    A: IdAllocator,
{
    engine: BoardEngine<A>,
    cache: Arc<L>,
    remote: Arc<R>,
    state: Arc<BoardState>,
    identity: Option<OwnerId>,
}

impl<L, R, A> BoardSession<L, R, A>
where
    L: LocalCache,
    R: RemoteStore,
    A: IdAllocator,
{
    /// Starts an anonymous session from the cached board.
    ///
    /// A missing or corrupt cache entry starts from the seed board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::CacheUnavailable`] when the cache read
    /// itself fails.
    pub async fn start(
        engine: BoardEngine<A>,
        cache: Arc<L>,
        remote: Arc<R>,
    ) -> BoardSessionResult<Self> {
        let cached = cache.get(&engine.config().cache_key).await?;
        let state = engine.load_initial(cached.as_deref());
        debug!(
            columns = state.column_order().len(),
            tasks = state.tasks().len(),
            "board session started"
        );
        Ok(Self {
            engine,
            cache,
            remote,
            state: Arc::new(state),
            identity: None,
        })
    }

    /// Returns the adopted board.
    #[must_use]
    pub fn state(&self) -> Arc<BoardState> {
        Arc::clone(&self.state)
    }

    /// Returns the current identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&OwnerId> {
        self.identity.as_ref()
    }

    /// Applies a resolved drag-and-drop move.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Board`] when the move is rejected.
    pub async fn apply_move(
        &mut self,
        descriptor: &MoveDescriptor,
    ) -> BoardSessionResult<Arc<BoardState>> {
        let next = self.engine.apply_move(&self.state, descriptor)?;
        Ok(self.adopt(next).await)
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Board`] at the column limit or for a
    /// blank title.
    pub async fn add_column(&mut self, title: &str) -> BoardSessionResult<Arc<BoardState>> {
        let next = self.engine.add_column(&self.state, title)?;
        Ok(self.adopt(next).await)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Board`] for a blank title.
    pub async fn rename_column(
        &mut self,
        column: &ColumnId,
        title: &str,
    ) -> BoardSessionResult<Arc<BoardState>> {
        let next = self.engine.rename_column(&self.state, column, title)?;
        Ok(self.adopt(next).await)
    }

    /// Deletes a column.
    pub async fn delete_column(&mut self, column: &ColumnId) -> Arc<BoardState> {
        let next = self.engine.delete_column(&self.state, column);
        self.adopt(next).await
    }

    /// Creates a task owned by the current identity, or an anonymous task
    /// when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Board`] when `title` or `description`
    /// is blank.
    pub async fn create_task(
        &mut self,
        title: &str,
        description: &str,
    ) -> BoardSessionResult<Arc<BoardState>> {
        let next =
            self.engine
                .create_task(&self.state, title, description, self.identity.clone())?;
        Ok(self.adopt(next).await)
    }

    /// Signs `owner` in: fetches its remote data, merges it and uploads the
    /// merged board.
    ///
    /// Switching directly from another identity signs that one out first. A
    /// failed fetch merges without remote data and leaves the remote layout
    /// untouched.
    pub async fn on_identity_acquired(&mut self, owner: OwnerId) -> Arc<BoardState> {
        if self.identity.as_ref() == Some(&owner) {
            return self.state();
        }
        if self.identity.is_some() {
            self.on_identity_lost().await;
        }

        let (snapshot, fetched) = match self.fetch_snapshot(&owner).await {
            Ok(snapshot) => (snapshot, true),
            Err(err) => {
                warn!(%owner, error = %err, "remote fetch failed, merging without remote data");
                (RemoteSnapshot::absent(), false)
            }
        };
        let merged = self.engine.on_identity_acquired(&self.state, snapshot);
        info!(%owner, tasks = merged.tasks().len(), "identity acquired");

        if merged != *self.state {
            self.state = Arc::new(merged);
        }
        let plan = if fetched {
            plan_full_sync(&self.state, &owner)
        } else {
            plan_task_sync(&self.state, &owner)
        };
        self.identity = Some(owner);
        self.execute(plan).await;
        self.state()
    }

    /// Signs the current identity out and drops its tasks from the board.
    pub async fn on_identity_lost(&mut self) -> Arc<BoardState> {
        if let Some(owner) = self.identity.take() {
            info!(%owner, "identity lost");
        }
        let next = self.engine.on_identity_lost(&self.state);
        self.adopt(next).await
    }

    async fn fetch_snapshot(&self, owner: &OwnerId) -> RemoteStoreResult<RemoteSnapshot> {
        let topology = self.remote.find_topology(owner).await?;
        let tasks = self.remote.find_tasks_by_owner(owner).await?;
        Ok(RemoteSnapshot::new(topology, tasks))
    }

    async fn adopt(&mut self, next: BoardState) -> Arc<BoardState> {
        if next == *self.state {
            return self.state();
        }
        let plan = plan_writes(&self.state, &next, self.identity.as_ref());
        self.state = Arc::new(next);
        self.execute(plan).await;
        self.state()
    }

    async fn execute(&self, plan: Vec<WriteInstruction>) {
        for instruction in plan {
            match instruction {
                WriteInstruction::CacheBoard(state) => self.write_cache(&state).await,
                WriteInstruction::StoreTopology { owner, topology } => {
                    if let Err(err) = self.remote.store_topology(&owner, &topology).await {
                        warn!(%owner, error = %err, "failed to store board layout");
                    }
                }
                WriteInstruction::StoreTask(task) => {
                    if let Err(err) = self.remote.store_task(&task).await {
                        warn!(task = %task.id(), error = %err, "failed to store task");
                    }
                }
                WriteInstruction::RemoveTask(task) => {
                    if let Err(err) = self.remote.remove_task(&task).await {
                        warn!(%task, error = %err, "failed to remove task");
                    }
                }
            }
        }
    }

    async fn write_cache(&self, state: &BoardState) {
        let blob = match state.to_json() {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to encode board for caching");
                return;
            }
        };
        if let Err(err) = self.cache.set(&self.engine.config().cache_key, blob).await {
            warn!(error = %err, "failed to cache board");
        }
    }
}
