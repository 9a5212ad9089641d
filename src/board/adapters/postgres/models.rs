//! Diesel row models for remote board documents.

use super::schema::{board_topologies, task_documents};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for layout documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_topologies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TopologyRow {
    /// Owning identity.
    pub owner_id: String,
    /// Layout JSON payload.
    pub document: Value,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for layout documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_topologies)]
pub struct NewTopologyRow {
    /// Owning identity.
    pub owner_id: String,
    /// Layout JSON payload.
    pub document: Value,
    /// Write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskDocumentRow {
    /// Task identifier.
    pub id: String,
    /// Owning identity.
    pub owner_id: String,
    /// Task JSON payload.
    pub document: Value,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_documents)]
pub struct NewTaskDocumentRow {
    /// Task identifier.
    pub id: String,
    /// Owning identity.
    pub owner_id: String,
    /// Task JSON payload.
    pub document: Value,
    /// Write timestamp.
    pub updated_at: DateTime<Utc>,
}
