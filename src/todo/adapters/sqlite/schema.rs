//! Diesel schema for TODO persistence.

diesel::table! {
    /// Task records, one per creation artifact.
    todos (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Channel the task belongs to.
        channel_id -> Text,
        /// Creation artifact identifier.
        message_id -> Text,
        /// Task text.
        content -> Text,
        /// Completion flag; never reset once set.
        completed -> Bool,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Published list artifacts awaiting reset cleanup.
    list_messages (id) {
        /// Row identifier.
        id -> BigInt,
        /// Channel of the list artifact.
        channel_id -> Text,
        /// List artifact identifier.
        message_id -> Text,
        /// Publish timestamp (UTC).
        created_at -> Timestamp,
    }
}

/// DDL applied when a store is opened.
pub(super) const CREATE_TABLES: &str = concat!(
    "CREATE TABLE IF NOT EXISTS todos (",
    "id INTEGER PRIMARY KEY AUTOINCREMENT, ",
    "channel_id TEXT NOT NULL, ",
    "message_id TEXT NOT NULL, ",
    "content TEXT NOT NULL, ",
    "completed BOOLEAN NOT NULL DEFAULT 0, ",
    "created_at TIMESTAMP NOT NULL",
    "); ",
    "CREATE INDEX IF NOT EXISTS idx_todos_channel ON todos (channel_id, created_at); ",
    "CREATE TABLE IF NOT EXISTS list_messages (",
    "id INTEGER PRIMARY KEY AUTOINCREMENT, ",
    "channel_id TEXT NOT NULL, ",
    "message_id TEXT NOT NULL, ",
    "created_at TIMESTAMP NOT NULL",
    "); ",
    "CREATE INDEX IF NOT EXISTS idx_list_messages_channel ON list_messages (channel_id);",
);
