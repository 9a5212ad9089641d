//! Built-in starter board.
//!
//! The seed tasks are anonymous and survive sign-out regardless of owner.

use super::{BoardState, Column, ColumnId, Task, TaskId};
use std::collections::{BTreeMap, BTreeSet};

const SEED_COLUMNS: [(&str, &str); 5] = [
    ("on-deck", "On Deck"),
    ("todo", "Todo"),
    ("development", "Development"),
    ("ready-for-qa", "Ready for QA"),
    ("on-prod", "On Prod"),
];

const SEED_TASKS: [(&str, &str, &str); 4] = [
    ("1", "Example Task", "This is a test"),
    ("2", "Another Task", "This is another test"),
    ("3", "Yet Another Task", "This is yet another test"),
    ("4", "One More Task", "This is one more test"),
];

const SEED_TASK_COLUMN: &str = "todo";

/// Returns the starter board used when nothing valid is cached.
#[must_use]
pub fn seed_board() -> BoardState {
    let tasks: BTreeMap<TaskId, Task> = SEED_TASKS
        .iter()
        .map(|(id, title, description)| {
            let task_id = TaskId::new(*id);
            (
                task_id.clone(),
                Task::new(task_id, *title, *description, None),
            )
        })
        .collect();

    let columns: BTreeMap<ColumnId, Column> = SEED_COLUMNS
        .iter()
        .map(|(id, title)| {
            let column = Column::new(ColumnId::new(*id), *title);
            let filled = if *id == SEED_TASK_COLUMN {
                column.with_task_ids(SEED_TASKS.iter().map(|(task, _, _)| TaskId::new(*task)))
            } else {
                column
            };
            (ColumnId::new(*id), filled)
        })
        .collect();

    let column_order = SEED_COLUMNS
        .iter()
        .map(|(id, _)| ColumnId::new(*id))
        .collect();

    BoardState::from_parts(tasks, columns, column_order)
}

/// Returns the identifiers of the seed tasks.
#[must_use]
pub fn seed_task_ids() -> BTreeSet<TaskId> {
    SEED_TASKS.iter().map(|(id, _, _)| TaskId::new(*id)).collect()
}
