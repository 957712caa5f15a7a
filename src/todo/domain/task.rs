//! Task record and list-snapshot types.

use super::{ChannelId, MessageId, TaskId, TodoDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated free-text description of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskContent(String);

impl TaskContent {
    /// Largest accepted content length, matching the platform's embed
    /// description limit.
    pub const MAX_CHARS: usize = 4096;

    /// Creates validated task content.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyContent`] when nothing remains after
    /// trimming, or [`TodoDomainError::ContentTooLong`] when the text exceeds
    /// [`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyContent);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_CHARS {
            return Err(TodoDomainError::ContentTooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable TODO item owned by a channel.
///
/// The record is the source of truth; the chat message identified by
/// [`Task::message_id`] is a projection of it that may lag or disappear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    channel_id: ChannelId,
    message_id: MessageId,
    content: TaskContent,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Owning channel.
    pub channel_id: ChannelId,
    /// Creation artifact bound to the task.
    pub message_id: MessageId,
    /// Task description.
    pub content: TaskContent,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            channel_id: data.channel_id,
            message_id: data.message_id,
            content: data.content,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning channel.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the creation artifact identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns the task description.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the task as completed.
    ///
    /// Completion is terminal; there is no way back to pending. Returns
    /// `true` when the state changed and `false` when the task was already
    /// completed.
    pub const fn mark_completed(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }
}

/// Reference to a published list artifact, kept so reset can remove it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    channel_id: ChannelId,
    message_id: MessageId,
    created_at: DateTime<Utc>,
}

impl ListSnapshot {
    /// Creates a snapshot reference.
    #[must_use]
    pub const fn new(channel_id: ChannelId, message_id: MessageId, created_at: DateTime<Utc>) -> Self {
        Self {
            channel_id,
            message_id,
            created_at,
        }
    }

    /// Returns the channel the list was published in.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the list artifact identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns when the snapshot was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
