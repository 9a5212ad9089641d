//! Board transitions bound to configuration and an identifier source.

use crate::board::domain::{
    BoardConfig, BoardResult, BoardState, ColumnId, IdAllocator, MoveDescriptor, OwnerId,
    Reconciliation, RemoteSnapshot, TaskDraft, seed_board, seed_task_ids,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry point for every board mutation intent.
///
/// The engine is pure: each call borrows the current state and returns the
/// next one. Allocation of new task and column identifiers is delegated to
/// the injected [`IdAllocator`].
#[derive(Debug)]
pub struct BoardEngine<A>
where
    A: IdAllocator,
{
    config: BoardConfig,
    ids: Arc<A>,
}

impl<A> BoardEngine<A>
where
    A: IdAllocator,
{
    /// Creates an engine.
    #[must_use]
    pub const fn new(config: BoardConfig, ids: Arc<A>) -> Self {
        Self { config, ids }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Builds the initial board from a cached blob.
    ///
    /// An absent blob yields the seed board. A blob that cannot be decoded
    /// or breaks a board invariant is discarded in favour of the seed.
    #[must_use]
    pub fn load_initial(&self, cached: Option<&str>) -> BoardState {
        let Some(blob) = cached else {
            debug!("no cached board, starting from seed");
            return seed_board();
        };
        match BoardState::from_json(blob) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "discarding corrupt cached board");
                seed_board()
            }
        }
    }

    /// Repositions a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidMove`](crate::board::domain::BoardError::InvalidMove)
    /// when the descriptor does not match `state`.
    pub fn apply_move(
        &self,
        state: &BoardState,
        descriptor: &MoveDescriptor,
    ) -> BoardResult<BoardState> {
        let next = state.apply_move(descriptor)?;
        debug!(
            task = %descriptor.task_id,
            from = %descriptor.source_column_id,
            to = %descriptor.destination_column_id,
            index = descriptor.destination_index,
            "moved task"
        );
        Ok(next)
    }

    /// Appends a column with a freshly allocated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnLimitExceeded`](crate::board::domain::BoardError::ColumnLimitExceeded)
    /// at the configured limit, or a validation error for a blank title.
    pub fn add_column(&self, state: &BoardState, title: &str) -> BoardResult<BoardState> {
        let id = self.ids.next_column_id();
        let next = state.with_column_added(id.clone(), title, self.config.max_columns)?;
        debug!(column = %id, "added column");
        Ok(next)
    }

    /// Renames a column; unknown columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank title.
    pub fn rename_column(
        &self,
        state: &BoardState,
        column: &ColumnId,
        title: &str,
    ) -> BoardResult<BoardState> {
        let next = state.with_column_renamed(column, title)?;
        debug!(%column, "renamed column");
        Ok(next)
    }

    /// Deletes a column and relocates its tasks.
    #[must_use]
    pub fn delete_column(&self, state: &BoardState, column: &ColumnId) -> BoardState {
        let next = state.without_column(column, &self.config.default_column);
        debug!(%column, "deleted column");
        next
    }

    /// Creates a task in the filing column.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `title` or `description` is blank.
    pub fn create_task(
        &self,
        state: &BoardState,
        title: &str,
        description: &str,
        owner: Option<OwnerId>,
    ) -> BoardResult<BoardState> {
        let draft = TaskDraft::new(title, description)?;
        let id = self.ids.next_task_id();
        let next = state.with_task_created(id.clone(), draft, owner, &self.config)?;
        debug!(task = %id, "created task");
        Ok(next)
    }

    /// Merges the remote snapshot fetched for a newly acquired identity.
    #[must_use]
    pub fn on_identity_acquired(
        &self,
        state: &BoardState,
        remote: RemoteSnapshot,
    ) -> BoardState {
        let Reconciliation {
            state: merged,
            repairs,
        } = state.reconcile(remote, &self.config);
        for repair in &repairs {
            info!(?repair, "repaired merged board");
        }
        merged
    }

    /// Drops identity-owned tasks after sign-out.
    #[must_use]
    pub fn on_identity_lost(&self, state: &BoardState) -> BoardState {
        let next = state.retain_on_identity_loss(&seed_task_ids());
        info!(
            dropped = state.tasks().len().saturating_sub(next.tasks().len()),
            "purged identity-owned tasks"
        );
        next
    }
}
