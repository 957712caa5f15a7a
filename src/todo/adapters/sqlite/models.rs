//! Diesel row models for TODO persistence.

use super::schema::{list_messages, todos};
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TodoRow {
    /// Task identifier.
    pub id: i64,
    /// Owning channel.
    pub channel_id: String,
    /// Creation artifact identifier.
    pub message_id: String,
    /// Task text.
    pub content: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
}

/// Insert model for task records; the identifier is assigned by `SQLite`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Owning channel.
    pub channel_id: String,
    /// Creation artifact identifier.
    pub message_id: String,
    /// Task text.
    pub content: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
}

/// Query result row for list snapshots.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = list_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListMessageRow {
    /// Channel of the list artifact.
    pub channel_id: String,
    /// List artifact identifier.
    pub message_id: String,
    /// Publish timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
}

/// Insert model for list snapshots.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = list_messages)]
pub struct NewListMessageRow {
    /// Channel of the list artifact.
    pub channel_id: String,
    /// List artifact identifier.
    pub message_id: String,
    /// Publish timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
}
