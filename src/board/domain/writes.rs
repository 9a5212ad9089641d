//! Persistence instructions derived from a state transition.
//!
//! Planning is pure so it can be tested without collaborators; the session
//! service executes the plan after adopting the new state.

use super::{BoardState, BoardTopology, OwnerId, Task, TaskId};

/// A single write a persistence collaborator should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteInstruction {
    /// Store the full board in the local cache.
    CacheBoard(BoardState),
    /// Store the column layout for an identity in the remote store.
    StoreTopology {
        /// Identity owning the layout.
        owner: OwnerId,
        /// Layout to store.
        topology: BoardTopology,
    },
    /// Store one task document in the remote store.
    StoreTask(Task),
    /// Remove one task document from the remote store.
    RemoveTask(TaskId),
}

/// Plans the writes that follow a transition from `previous` to `next`.
///
/// The local cache always receives the new board. With an identity present,
/// the remote store receives the layout when it changed, every task the
/// identity owns that is new or different, and a removal for every owned
/// task that left the board.
#[must_use]
pub fn plan_writes(
    previous: &BoardState,
    next: &BoardState,
    identity: Option<&OwnerId>,
) -> Vec<WriteInstruction> {
    let mut plan = vec![WriteInstruction::CacheBoard(next.clone())];
    let Some(owner) = identity else {
        return plan;
    };

    if previous.columns() != next.columns() || previous.column_order() != next.column_order() {
        plan.push(WriteInstruction::StoreTopology {
            owner: owner.clone(),
            topology: next.topology(),
        });
    }
    plan.extend(
        next.tasks_owned_by(owner)
            .filter(|task| previous.task(task.id()) != Some(*task))
            .cloned()
            .map(WriteInstruction::StoreTask),
    );
    plan.extend(
        previous
            .tasks_owned_by(owner)
            .filter(|task| next.task(task.id()).is_none())
            .map(|task| WriteInstruction::RemoveTask(task.id().clone())),
    );
    plan
}

/// Plans a full upload of `state` for `owner`: cache, layout and every
/// owned task.
#[must_use]
pub fn plan_full_sync(state: &BoardState, owner: &OwnerId) -> Vec<WriteInstruction> {
    let mut plan = plan_task_sync(state, owner);
    plan.insert(
        1,
        WriteInstruction::StoreTopology {
            owner: owner.clone(),
            topology: state.topology(),
        },
    );
    plan
}

/// Plans an upload of `state` for `owner` that leaves the remote layout
/// alone: cache and every owned task.
///
/// Used when the remote layout could not be read, so the stored one is
/// unknown and must not be replaced.
#[must_use]
pub fn plan_task_sync(state: &BoardState, owner: &OwnerId) -> Vec<WriteInstruction> {
    let mut plan = vec![WriteInstruction::CacheBoard(state.clone())];
    plan.extend(
        state
            .tasks_owned_by(owner)
            .cloned()
            .map(WriteInstruction::StoreTask),
    );
    plan
}
