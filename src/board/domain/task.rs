//! Task cards and validated task input.

use super::{BoardError, BoardResult, OwnerId, TaskId};
use serde::{Deserialize, Serialize};

/// A task card on the board.
///
/// An absent owner marks a session-scoped (anonymous) task; a present owner
/// binds the task to that authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner_id: Option<OwnerId>,
}

impl Task {
    /// Creates a task from already validated parts.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        owner_id: Option<OwnerId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            owner_id,
        }
    }

    /// Creates a task from a validated draft.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, owner_id: Option<OwnerId>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            owner_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning identity, if any.
    #[must_use]
    pub const fn owner_id(&self) -> Option<&OwnerId> {
        self.owner_id.as_ref()
    }

    /// Returns `true` when the task is owned by `owner`.
    #[must_use]
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        self.owner_id.as_ref() == Some(owner)
    }

    /// Returns `true` when no identity owns the task.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.owner_id.is_none()
    }
}

/// Title and description for a task that has not been filed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
}

impl TaskDraft {
    /// Creates a draft with trimmed title and description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] when either field is empty after
    /// trimming.
    pub fn new(title: impl AsRef<str>, description: impl AsRef<str>) -> BoardResult<Self> {
        let trimmed_title = title.as_ref().trim();
        if trimmed_title.is_empty() {
            return Err(BoardError::validation("title"));
        }
        let trimmed_description = description.as_ref().trim();
        if trimmed_description.is_empty() {
            return Err(BoardError::validation("description"));
        }
        Ok(Self {
            title: trimmed_title.to_owned(),
            description: trimmed_description.to_owned(),
        })
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
