//! Single-task repositioning within or across columns.
//!
//! Indices follow list-splice semantics: the task is removed from the source
//! sequence first and the destination index is read against the sequence
//! that results. Moving the first of `[A, B, C, D]` to index 2 therefore
//! yields `[B, C, A, D]`.

use super::{BoardResult, BoardState, ColumnId, MoveRejection, TaskId};
use serde::{Deserialize, Serialize};

/// A resolved drag-and-drop intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDescriptor {
    /// Column the task is dragged out of.
    pub source_column_id: ColumnId,
    /// Index of the task within the source column.
    pub source_index: usize,
    /// Column the task is dropped into.
    pub destination_column_id: ColumnId,
    /// Index within the destination sequence after removal from the source.
    pub destination_index: usize,
    /// Task being moved.
    pub task_id: TaskId,
}

/// A droppable location reported by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    /// Column the location belongs to.
    pub column_id: ColumnId,
    /// Index within that column.
    pub index: usize,
}

impl DragLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(column_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

impl MoveDescriptor {
    /// Creates a descriptor from explicit coordinates.
    #[must_use]
    pub fn new(
        task_id: impl Into<TaskId>,
        source: DragLocation,
        destination: DragLocation,
    ) -> Self {
        Self {
            source_column_id: source.column_id,
            source_index: source.index,
            destination_column_id: destination.column_id,
            destination_index: destination.index,
            task_id: task_id.into(),
        }
    }

    /// Converts a completed drag gesture into a move.
    ///
    /// Returns `None` when the drop landed outside every column; such a
    /// gesture is not a move at all and must not reach the engine.
    #[must_use]
    pub fn from_drop(
        task_id: impl Into<TaskId>,
        source: DragLocation,
        destination: Option<DragLocation>,
    ) -> Option<Self> {
        destination.map(|target| Self::new(task_id, source, target))
    }

    /// Returns `true` when the task would land where it already is.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source_column_id == self.destination_column_id
            && self.source_index == self.destination_index
    }
}

impl BoardState {
    /// Repositions a single task.
    ///
    /// Only the touched column or columns are replaced; tasks and column
    /// order are carried over as they are. A move onto its own position
    /// returns a state equal to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidMove`](super::BoardError::InvalidMove)
    /// when a column is unknown, the source index is out of range, the task
    /// at the source index is not `task_id`, or the destination index lies
    /// past the end of the destination sequence.
    pub fn apply_move(&self, descriptor: &MoveDescriptor) -> BoardResult<Self> {
        let source = self
            .column(&descriptor.source_column_id)
            .ok_or_else(|| {
                MoveRejection::UnknownSourceColumn(descriptor.source_column_id.clone())
            })?;
        let destination = self
            .column(&descriptor.destination_column_id)
            .ok_or_else(|| {
                MoveRejection::UnknownDestinationColumn(descriptor.destination_column_id.clone())
            })?;

        let found = source.task_ids().get(descriptor.source_index).ok_or_else(|| {
            MoveRejection::SourceIndexOutOfRange {
                column: source.id().clone(),
                index: descriptor.source_index,
                len: source.len(),
            }
        })?;
        if found != &descriptor.task_id {
            return Err(MoveRejection::TaskMismatch {
                expected: descriptor.task_id.clone(),
                found: found.clone(),
            }
            .into());
        }

        if descriptor.is_noop() {
            return Ok(self.clone());
        }

        let mut source_ids = source.task_ids().to_vec();
        source_ids.remove(descriptor.source_index);

        let mut next = self.clone();
        if source.id() == destination.id() {
            splice_in(&mut source_ids, descriptor, source.id())?;
            replace_task_ids(&mut next, source.id(), source_ids);
            return Ok(next);
        }

        let mut destination_ids = destination.task_ids().to_vec();
        splice_in(&mut destination_ids, descriptor, destination.id())?;
        replace_task_ids(&mut next, source.id(), source_ids);
        replace_task_ids(&mut next, destination.id(), destination_ids);
        Ok(next)
    }
}

fn splice_in(
    sequence: &mut Vec<TaskId>,
    descriptor: &MoveDescriptor,
    column: &ColumnId,
) -> Result<(), MoveRejection> {
    if descriptor.destination_index > sequence.len() {
        return Err(MoveRejection::DestinationIndexOutOfRange {
            column: column.clone(),
            index: descriptor.destination_index,
            len: sequence.len(),
        });
    }
    sequence.insert(descriptor.destination_index, descriptor.task_id.clone());
    Ok(())
}

fn replace_task_ids(state: &mut BoardState, column: &ColumnId, task_ids: Vec<TaskId>) {
    if let Some(target) = state.columns_mut().get_mut(column) {
        *target.task_ids_mut() = task_ids;
    }
}
