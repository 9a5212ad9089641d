//! Board columns.

use super::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A column holding an ordered sequence of task references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    id: ColumnId,
    title: String,
    #[serde(default)]
    task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Replaces the task sequence.
    #[must_use]
    pub fn with_task_ids(mut self, task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.task_ids = task_ids.into_iter().collect();
        self
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ordered task references.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns `true` when the column references `task_id`.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    pub(crate) fn set_id(&mut self, id: ColumnId) {
        self.id = id;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) const fn task_ids_mut(&mut self) -> &mut Vec<TaskId> {
        &mut self.task_ids
    }
}
