//! Board state value and its structural invariants.
//!
//! A [`BoardState`] is a complete snapshot of tasks, columns and column
//! order. Transitions borrow a state and build a new one, so a failed
//! transition leaves the caller's state untouched. States decoded from
//! storage pass through [`BoardState::try_from`], which enforces:
//!
//! 1. the column order and the column map name the same columns;
//! 2. every task reference resolves to a task;
//! 3. every task is placed in exactly one column.

use super::{BoardError, BoardResult, Column, ColumnId, OwnerId, Task, TaskId, Violation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable snapshot of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    tasks: BTreeMap<TaskId, Task>,
    columns: BTreeMap<ColumnId, Column>,
    column_order: Vec<ColumnId>,
}

/// Unvalidated board payload as read from a cache or remote document.
///
/// Field names match the persisted shape (`tasks`, `columns`,
/// `columnOrder`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    /// Tasks keyed by identifier.
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, Task>,
    /// Columns keyed by identifier.
    #[serde(default)]
    pub columns: BTreeMap<ColumnId, Column>,
    /// Display order of the columns.
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
}

/// Board layout without task bodies: the part a remote store keeps per owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTopology {
    /// Columns keyed by identifier.
    #[serde(default)]
    pub columns: BTreeMap<ColumnId, Column>,
    /// Display order of the columns.
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
}

impl BoardTopology {
    /// Returns `true` when the topology carries no columns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.column_order.is_empty()
    }
}

impl BoardState {
    /// Builds a state from parts the caller has already checked.
    pub(crate) const fn from_parts(
        tasks: BTreeMap<TaskId, Task>,
        columns: BTreeMap<ColumnId, Column>,
        column_order: Vec<ColumnId>,
    ) -> Self {
        Self {
            tasks,
            columns,
            column_order,
        }
    }

    /// Decodes and validates a JSON board payload.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CorruptState`] when the payload cannot be decoded
    /// or violates a board invariant.
    pub fn from_json(payload: &str) -> BoardResult<Self> {
        let document: BoardDocument = serde_json::from_str(payload)
            .map_err(|err| Violation::Undecodable(err.to_string()))?;
        Self::try_from(document)
    }

    /// Encodes the state in its persisted JSON shape.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoder error; string-keyed maps of plain
    /// values do not fail in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns all tasks keyed by identifier.
    #[must_use]
    pub const fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    /// Returns all columns keyed by identifier.
    #[must_use]
    pub const fn columns(&self) -> &BTreeMap<ColumnId, Column> {
        &self.columns
    }

    /// Returns the display order of the columns.
    #[must_use]
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Returns the column currently holding `task_id`.
    #[must_use]
    pub fn column_of(&self, task_id: &TaskId) -> Option<&Column> {
        self.ordered_columns()
            .find(|column| column.contains(task_id))
    }

    /// Iterates columns in display order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
    }

    /// Iterates tasks owned by `owner`.
    pub fn tasks_owned_by<'a>(&'a self, owner: &'a OwnerId) -> impl Iterator<Item = &'a Task> {
        self.tasks.values().filter(move |task| task.is_owned_by(owner))
    }

    /// Returns the column layout without task bodies.
    #[must_use]
    pub fn topology(&self) -> BoardTopology {
        BoardTopology {
            columns: self.columns.clone(),
            column_order: self.column_order.clone(),
        }
    }

    /// Returns the unvalidated document form of this state.
    #[must_use]
    pub fn to_document(&self) -> BoardDocument {
        BoardDocument {
            tasks: self.tasks.clone(),
            columns: self.columns.clone(),
            column_order: self.column_order.clone(),
        }
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found.
    pub fn validate(&self) -> Result<(), Violation> {
        validate_parts(&self.tasks, &self.columns, &self.column_order)
    }

    /// Column that new and relocated tasks are filed into: `preferred` when
    /// it exists, otherwise the first column in display order.
    #[must_use]
    pub fn filing_column<'a>(&'a self, preferred: &'a ColumnId) -> Option<&'a ColumnId> {
        if self.columns.contains_key(preferred) {
            return Some(preferred);
        }
        self.column_order.first()
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut BTreeMap<TaskId, Task> {
        &mut self.tasks
    }

    pub(crate) const fn columns_mut(&mut self) -> &mut BTreeMap<ColumnId, Column> {
        &mut self.columns
    }

    pub(crate) const fn column_order_mut(&mut self) -> &mut Vec<ColumnId> {
        &mut self.column_order
    }
}

impl TryFrom<BoardDocument> for BoardState {
    type Error = BoardError;

    fn try_from(document: BoardDocument) -> Result<Self, Self::Error> {
        validate_parts(&document.tasks, &document.columns, &document.column_order)?;
        Ok(Self::from_parts(
            document.tasks,
            document.columns,
            document.column_order,
        ))
    }
}

fn validate_parts(
    tasks: &BTreeMap<TaskId, Task>,
    columns: &BTreeMap<ColumnId, Column>,
    column_order: &[ColumnId],
) -> Result<(), Violation> {
    validate_topology(columns, column_order)?;

    if let Some((key, task)) = tasks.iter().find(|(key, task)| *key != task.id()) {
        return Err(Violation::TaskKeyMismatch {
            key: key.clone(),
            id: task.id().clone(),
        });
    }

    let mut placed = BTreeSet::new();
    for column_id in column_order {
        let Some(column) = columns.get(column_id) else {
            continue;
        };
        for task_id in column.task_ids() {
            if !tasks.contains_key(task_id) {
                return Err(Violation::UnknownTaskReference {
                    column: column_id.clone(),
                    task: task_id.clone(),
                });
            }
            if !placed.insert(task_id) {
                return Err(Violation::DuplicatePlacement(task_id.clone()));
            }
        }
    }

    match tasks.keys().find(|id| !placed.contains(id)) {
        Some(unplaced) => Err(Violation::UnplacedTask(unplaced.clone())),
        None => Ok(()),
    }
}

fn validate_topology(
    columns: &BTreeMap<ColumnId, Column>,
    column_order: &[ColumnId],
) -> Result<(), Violation> {
    let mut ordered = BTreeSet::new();
    for column_id in column_order {
        if !columns.contains_key(column_id) {
            return Err(Violation::OrderedColumnMissing(column_id.clone()));
        }
        if !ordered.insert(column_id) {
            return Err(Violation::DuplicateOrderEntry(column_id.clone()));
        }
    }

    for (key, column) in columns {
        if key != column.id() {
            return Err(Violation::ColumnKeyMismatch {
                key: key.clone(),
                id: column.id().clone(),
            });
        }
        if !ordered.contains(key) {
            return Err(Violation::UnorderedColumn(key.clone()));
        }
    }
    Ok(())
}
