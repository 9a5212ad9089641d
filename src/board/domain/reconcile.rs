//! Merging local board state with a remote snapshot on sign-in.
//!
//! The merge is lopsided. Tasks are a right-biased union: remote
//! task documents overwrite local tasks with the same id, and local-only
//! tasks survive. The column layout comes from the remote snapshot whenever
//! it has one, otherwise the local layout stays. The combined board is then
//! repaired, never rejected.

use super::{
    BoardConfig, BoardDocument, BoardState, BoardTopology, Column, ColumnId, Task, TaskId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Authoritative data fetched for an identity on sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
    /// Stored column layout, absent when the identity never saved one.
    pub topology: Option<BoardTopology>,
    /// Task documents owned by the identity.
    pub tasks: Vec<Task>,
}

impl RemoteSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(topology: Option<BoardTopology>, tasks: Vec<Task>) -> Self {
        Self { topology, tasks }
    }

    /// Snapshot of an identity with nothing stored remotely.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            topology: None,
            tasks: Vec::new(),
        }
    }
}

/// Deterministic fix applied while repairing a merged board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// A column stored under a different key was renamed to its key.
    NormalisedColumnId(ColumnId),
    /// A column order entry without a column, or a repeated one, was dropped.
    DroppedOrderEntry(ColumnId),
    /// A column missing from the order was appended to it.
    AppendedUnorderedColumn(ColumnId),
    /// A task stored under a different key was renamed to its key.
    NormalisedTaskId(TaskId),
    /// A reference to a task that does not exist was dropped.
    DroppedUnknownTask {
        /// Column that held the reference.
        column: ColumnId,
        /// Missing task.
        task: TaskId,
    },
    /// A second placement of an already placed task was dropped.
    DroppedDuplicatePlacement {
        /// Column that held the duplicate.
        column: ColumnId,
        /// Duplicated task.
        task: TaskId,
    },
    /// The default column was recreated to hold unplaced tasks.
    RecreatedFilingColumn(ColumnId),
    /// An unplaced task was appended to the filing column.
    FiledUnplacedTask {
        /// Column that received the task.
        column: ColumnId,
        /// Filed task.
        task: TaskId,
    },
}

/// Result of a merge or repair: a valid board and the fixes applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The adopted, invariant-respecting board.
    pub state: BoardState,
    /// Repairs applied, in the order they were made.
    pub repairs: Vec<Repair>,
}

impl BoardState {
    /// Merges `remote` into this local board.
    #[must_use]
    pub fn reconcile(&self, remote: RemoteSnapshot, config: &BoardConfig) -> Reconciliation {
        let mut tasks = self.tasks().clone();
        for task in remote.tasks {
            tasks.insert(task.id().clone(), task);
        }

        let topology = match remote.topology {
            Some(remote_topology) if !remote_topology.is_empty() => remote_topology,
            _ => self.topology(),
        };

        Self::repaired(
            BoardDocument {
                tasks,
                columns: topology.columns,
                column_order: topology.column_order,
            },
            config,
        )
    }

    /// Turns any board document into a valid board.
    ///
    /// The repair is deterministic: map keys win over embedded ids, the first
    /// occurrence of a column or task placement wins, dangling references are
    /// dropped, unordered columns are appended in id order and unplaced tasks
    /// are appended to the filing column in id order.
    #[must_use]
    pub fn repaired(document: BoardDocument, config: &BoardConfig) -> Reconciliation {
        let mut repairs = Vec::new();
        let tasks = normalise_task_keys(document.tasks, &mut repairs);
        let mut columns = normalise_column_keys(document.columns, &mut repairs);
        let mut column_order = dedupe_order(document.column_order, &columns, &mut repairs);

        let placed = prune_references(&column_order, &mut columns, &tasks, &mut repairs);
        let unplaced: Vec<TaskId> = tasks
            .keys()
            .filter(|id| !placed.contains(*id))
            .cloned()
            .collect();

        if !unplaced.is_empty() {
            let filing = if columns.contains_key(&config.default_column) {
                config.default_column.clone()
            } else if let Some(first) = column_order.first() {
                first.clone()
            } else {
                let recreated = config.default_column.clone();
                columns.insert(
                    recreated.clone(),
                    Column::new(recreated.clone(), config.default_column_title.clone()),
                );
                column_order.push(recreated.clone());
                repairs.push(Repair::RecreatedFilingColumn(recreated.clone()));
                recreated
            };
            if let Some(column) = columns.get_mut(&filing) {
                for task in unplaced {
                    repairs.push(Repair::FiledUnplacedTask {
                        column: filing.clone(),
                        task: task.clone(),
                    });
                    column.task_ids_mut().push(task);
                }
            }
        }

        Reconciliation {
            state: Self::from_parts(tasks, columns, column_order),
            repairs,
        }
    }
}

fn normalise_task_keys(
    tasks: BTreeMap<TaskId, Task>,
    repairs: &mut Vec<Repair>,
) -> BTreeMap<TaskId, Task> {
    tasks
        .into_iter()
        .map(|(key, task)| {
            if task.id() == &key {
                return (key, task);
            }
            repairs.push(Repair::NormalisedTaskId(key.clone()));
            let rebuilt = Task::new(
                key.clone(),
                task.title(),
                task.description(),
                task.owner_id().cloned(),
            );
            (key, rebuilt)
        })
        .collect()
}

fn normalise_column_keys(
    columns: BTreeMap<ColumnId, Column>,
    repairs: &mut Vec<Repair>,
) -> BTreeMap<ColumnId, Column> {
    columns
        .into_iter()
        .map(|(key, mut column)| {
            if column.id() != &key {
                repairs.push(Repair::NormalisedColumnId(key.clone()));
                column.set_id(key.clone());
            }
            (key, column)
        })
        .collect()
}

fn dedupe_order(
    order: Vec<ColumnId>,
    columns: &BTreeMap<ColumnId, Column>,
    repairs: &mut Vec<Repair>,
) -> Vec<ColumnId> {
    let mut seen = BTreeSet::new();
    let mut kept = Vec::with_capacity(order.len());
    for id in order {
        if columns.contains_key(&id) && seen.insert(id.clone()) {
            kept.push(id);
        } else {
            repairs.push(Repair::DroppedOrderEntry(id));
        }
    }
    for id in columns.keys() {
        if !seen.contains(id) {
            repairs.push(Repair::AppendedUnorderedColumn(id.clone()));
            kept.push(id.clone());
        }
    }
    kept
}

fn prune_references(
    order: &[ColumnId],
    columns: &mut BTreeMap<ColumnId, Column>,
    tasks: &BTreeMap<TaskId, Task>,
    repairs: &mut Vec<Repair>,
) -> BTreeSet<TaskId> {
    let mut placed = BTreeSet::new();
    for column_id in order {
        let Some(column) = columns.get_mut(column_id) else {
            continue;
        };
        column.task_ids_mut().retain(|task_id| {
            if !tasks.contains_key(task_id) {
                repairs.push(Repair::DroppedUnknownTask {
                    column: column_id.clone(),
                    task: task_id.clone(),
                });
                return false;
            }
            if !placed.insert(task_id.clone()) {
                repairs.push(Repair::DroppedDuplicatePlacement {
                    column: column_id.clone(),
                    task: task_id.clone(),
                });
                return false;
            }
            true
        });
    }
    placed
}
