//! Column lifecycle: add, rename and delete.
//!
//! Deleting a column never orphans its tasks. They are appended, in their
//! existing order, to the filing column (the configured default column, or
//! the first remaining column when the default column is the one being
//! deleted). Only when no column remains are the tasks dropped with it.

use super::{BoardError, BoardResult, BoardState, Column, ColumnId};

impl BoardState {
    /// Appends an empty column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnLimitExceeded`] when the board already has
    /// `max_columns` columns, [`BoardError::Validation`] for a blank title and
    /// [`BoardError::DuplicateIdentifier`] when `id` is taken.
    pub fn with_column_added(
        &self,
        id: ColumnId,
        title: &str,
        max_columns: usize,
    ) -> BoardResult<Self> {
        if self.column_order().len() >= max_columns {
            return Err(BoardError::ColumnLimitExceeded { limit: max_columns });
        }
        let trimmed = non_blank_title(title)?;
        if self.columns().contains_key(&id) {
            return Err(BoardError::DuplicateIdentifier(id.to_string()));
        }

        let mut next = self.clone();
        next.column_order_mut().push(id.clone());
        next.columns_mut().insert(id.clone(), Column::new(id, trimmed));
        Ok(next)
    }

    /// Replaces a column title; an unknown column leaves the board as is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for a blank title.
    pub fn with_column_renamed(&self, id: &ColumnId, title: &str) -> BoardResult<Self> {
        if !self.columns().contains_key(id) {
            return Ok(self.clone());
        }
        let trimmed = non_blank_title(title)?;

        let mut next = self.clone();
        if let Some(column) = next.columns_mut().get_mut(id) {
            column.set_title(trimmed.to_owned());
        }
        Ok(next)
    }

    /// Removes a column, relocating its tasks to the filing column.
    ///
    /// An unknown column leaves the board as is.
    #[must_use]
    pub fn without_column(&self, id: &ColumnId, default_column: &ColumnId) -> Self {
        let mut next = self.clone();
        let Some(removed) = next.columns_mut().remove(id) else {
            return next;
        };
        next.column_order_mut().retain(|ordered| ordered != id);

        match next.filing_column(default_column).cloned() {
            Some(filing) => {
                if let Some(column) = next.columns_mut().get_mut(&filing) {
                    column
                        .task_ids_mut()
                        .extend(removed.task_ids().iter().cloned());
                }
            }
            None => {
                for task_id in removed.task_ids() {
                    next.tasks_mut().remove(task_id);
                }
            }
        }
        next
    }
}

fn non_blank_title(title: &str) -> BoardResult<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::validation("title"));
    }
    Ok(trimmed)
}
