//! In-memory remote document store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{BoardTopology, OwnerId, Task, TaskId},
    ports::{RemoteStore, RemoteStoreError, RemoteStoreResult},
};

/// Thread-safe in-memory remote store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteStore {
    state: Arc<RwLock<InMemoryRemoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    topologies: HashMap<OwnerId, BoardTopology>,
    tasks: BTreeMap<TaskId, Task>,
}

impl InMemoryRemoteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> RemoteStoreError {
    RemoteStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn find_topology(&self, owner: &OwnerId) -> RemoteStoreResult<Option<BoardTopology>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.topologies.get(owner).cloned())
    }

    async fn store_topology(
        &self,
        owner: &OwnerId,
        topology: &BoardTopology,
    ) -> RemoteStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.topologies.insert(owner.clone(), topology.clone());
        Ok(())
    }

    async fn find_task(&self, id: &TaskId) -> RemoteStoreResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn store_task(&self, task: &Task) -> RemoteStoreResult<()> {
        if task.is_anonymous() {
            return Err(RemoteStoreError::UnownedTask(task.id().clone()));
        }
        let mut state = self.state.write().map_err(poisoned)?;
        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn remove_task(&self, id: &TaskId) -> RemoteStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.tasks.remove(id);
        Ok(())
    }

    async fn find_tasks_by_owner(&self, owner: &OwnerId) -> RemoteStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect())
    }
}
