//! Store port for task records and list snapshots.

use crate::todo::domain::{ChannelId, ListSnapshot, MessageId, Task, TaskContent, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Durable storage for task records and list snapshots.
///
/// Every channel-keyed operation only observes or mutates rows of that
/// channel.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task record and returns the identifier the store assigned.
    ///
    /// The record starts out pending and is stamped with the store's clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store is unavailable.
    async fn insert_task(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        content: &TaskContent,
    ) -> TaskStoreResult<TaskId>;

    /// Returns the channel's tasks, newest first.
    ///
    /// Ties on the creation timestamp are ordered by descending identifier.
    async fn list_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<Task>>;

    /// Returns the creation artifact identifiers of the channel's tasks.
    async fn list_task_message_ids(&self, channel_id: &ChannelId)
    -> TaskStoreResult<Vec<MessageId>>;

    /// Marks a task as completed and returns the number of rows changed.
    ///
    /// Completing an already completed task returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no task has the identifier.
    async fn set_completed(&self, task_id: TaskId) -> TaskStoreResult<u64>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Deletes every task of the channel and returns the number removed.
    async fn delete_all_tasks(&self, channel_id: &ChannelId) -> TaskStoreResult<u64>;

    /// Records a published list artifact.
    async fn insert_list_snapshot(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> TaskStoreResult<()>;

    /// Returns the channel's recorded list artifacts, oldest first.
    async fn list_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<Vec<ListSnapshot>>;

    /// Deletes every list snapshot of the channel and returns the number
    /// removed.
    async fn delete_all_snapshots(&self, channel_id: &ChannelId) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
