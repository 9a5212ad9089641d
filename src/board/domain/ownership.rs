//! Task retention across identity loss.

use super::{BoardState, TaskId};
use std::collections::BTreeSet;

impl BoardState {
    /// Drops identity-owned tasks when the identity signs out.
    ///
    /// A task survives when its id belongs to `seed_task_ids` or when it has
    /// no owner. Column sequences lose references to dropped tasks and keep
    /// the relative order of the survivors. Applying the purge twice yields
    /// the same board as applying it once.
    #[must_use]
    pub fn retain_on_identity_loss(&self, seed_task_ids: &BTreeSet<TaskId>) -> Self {
        let mut next = self.clone();
        next.tasks_mut()
            .retain(|id, task| seed_task_ids.contains(id) || task.is_anonymous());

        let kept: BTreeSet<TaskId> = next.tasks().keys().cloned().collect();
        for column in next.columns_mut().values_mut() {
            column.task_ids_mut().retain(|id| kept.contains(id));
        }
        next
    }
}
