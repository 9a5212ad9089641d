//! Unit tests for the board module.
//!
//! Tests are organised by transition, covering the structural invariants,
//! rejection paths and the persistence pipeline.


use crate::board::domain::{BoardState, Column, ColumnId, OwnerId, Task, TaskId};
use std::collections::BTreeMap;

/// Builds a board from `(column, [task ids])` pairs in display order.
///
/// Every referenced task is created anonymously with its id as title.
pub(super) fn board_with(layout: &[(&str, &[&str])]) -> BoardState {
    let mut tasks = BTreeMap::new();
    let mut columns = BTreeMap::new();
    let mut column_order = Vec::new();
    for (column, task_ids) in layout {
        let column_id = ColumnId::new(*column);
        for task in *task_ids {
            let task_id = TaskId::new(*task);
            tasks.insert(
                task_id.clone(),
                Task::new(task_id, *task, format!("{task} description"), None),
            );
        }
        columns.insert(
            column_id.clone(),
            Column::new(column_id.clone(), column.to_uppercase())
                .with_task_ids(task_ids.iter().map(|task| TaskId::new(*task))),
        );
        column_order.push(column_id);
    }
    BoardState::from_parts(tasks, columns, column_order)
}

/// Returns the task ids of `column` as plain strings.
pub(super) fn ids_in(state: &BoardState, column: &str) -> Vec<String> {
    state
        .column(&ColumnId::new(column))
        .map(|found| {
            found
                .task_ids()
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Replaces the owner of `task` on an existing board.
pub(super) fn with_owner(state: &BoardState, task: &str, owner: &str) -> BoardState {
    let mut next = state.clone();
    if let Some(existing) = next.tasks_mut().get_mut(&TaskId::new(task)) {
        *existing = Task::new(
            existing.id().clone(),
            existing.title(),
            existing.description(),
            Some(OwnerId::new(owner)),
        );
    }
    next
}
