//! Shared test helpers for in-memory integration tests.

use corkboard::board::{
    adapters::memory::{InMemoryLocalCache, InMemoryRemoteStore},
    domain::{BoardConfig, BoardState, ColumnId, OwnerId, SequentialIdAllocator, Task, TaskId},
    ports::LocalCache,
    services::{BoardEngine, BoardSession},
};
use rstest::fixture;
use std::sync::Arc;

/// Session type wired to in-memory adapters.
pub type MemorySession =
    BoardSession<InMemoryLocalCache, InMemoryRemoteStore, SequentialIdAllocator>;

/// Collaborators shared between a session and the assertions about it.
pub struct Stores {
    pub cache: Arc<InMemoryLocalCache>,
    pub remote: Arc<InMemoryRemoteStore>,
}

impl Stores {
    /// Starts a session with default configuration over these stores.
    pub async fn start(&self) -> Result<MemorySession, eyre::Report> {
        let engine = BoardEngine::new(
            BoardConfig::default(),
            Arc::new(SequentialIdAllocator::new()),
        );
        Ok(BoardSession::start(
            engine,
            Arc::clone(&self.cache),
            Arc::clone(&self.remote),
        )
        .await?)
    }

    /// Decodes the board currently held in the local cache.
    pub async fn cached_board(&self) -> Result<Option<BoardState>, eyre::Report> {
        let Some(blob) = self.cache.get(&BoardConfig::default().cache_key).await? else {
            return Ok(None);
        };
        Ok(Some(BoardState::from_json(&blob)?))
    }
}

/// Provides fresh, empty stores for each test.
#[fixture]
pub fn stores() -> Stores {
    Stores {
        cache: Arc::new(InMemoryLocalCache::new()),
        remote: Arc::new(InMemoryRemoteStore::new()),
    }
}

/// Builds a task owned by `owner`.
pub fn owned_task(id: &str, title: &str, owner: &str) -> Task {
    Task::new(
        TaskId::new(id),
        title,
        format!("{title} details"),
        Some(OwnerId::new(owner)),
    )
}

/// Returns the task ids of `column` as plain strings.
pub fn ids_in(state: &BoardState, column: &str) -> Vec<String> {
    state
        .column(&ColumnId::new(column))
        .map(|found| {
            found
                .task_ids()
                .iter()
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
