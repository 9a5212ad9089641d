//! Filing newly created tasks.

use super::{BoardConfig, BoardError, BoardResult, BoardState, Column, OwnerId, Task, TaskDraft, TaskId};

impl BoardState {
    /// Inserts a task and appends it to the filing column.
    ///
    /// When the board has no columns left, the configured default column is
    /// recreated to hold the task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateIdentifier`] when `id` is taken.
    pub fn with_task_created(
        &self,
        id: TaskId,
        draft: TaskDraft,
        owner_id: Option<OwnerId>,
        config: &BoardConfig,
    ) -> BoardResult<Self> {
        if self.tasks().contains_key(&id) {
            return Err(BoardError::DuplicateIdentifier(id.to_string()));
        }

        let mut next = self.clone();
        let filing = match next.filing_column(&config.default_column).cloned() {
            Some(existing) => existing,
            None => {
                let recreated = config.default_column.clone();
                next.column_order_mut().push(recreated.clone());
                next.columns_mut().insert(
                    recreated.clone(),
                    Column::new(recreated.clone(), config.default_column_title.clone()),
                );
                recreated
            }
        };

        if let Some(column) = next.columns_mut().get_mut(&filing) {
            column.task_ids_mut().push(id.clone());
        }
        next.tasks_mut()
            .insert(id.clone(), Task::from_draft(id, draft, owner_id));
        Ok(next)
    }
}
