//! Completion trigger routing.

use mockable::Clock;
use std::sync::Arc;

use super::{MessageBinder, TodoLifecycleResult};
use crate::todo::{
    domain::{CompletionTrigger, Task, TaskId},
    ports::{MessagingSurface, SyncIncident, SyncObserver, TaskStore, TaskStoreError},
};

/// Why a completion trigger was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The identifier is not a well-formed completion trigger.
    MalformedTrigger(String),
    /// The control still carries the placeholder trigger.
    ProvisionalTrigger,
    /// No task has the identifier, usually because the channel was reset.
    UnknownTask(TaskId),
}

/// Result of handling a completion trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The task is completed.
    Completed {
        /// Task state after the update.
        task: Task,
        /// Whether the artifact now shows the completed view.
        rendered: bool,
    },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Routes completion triggers to task state changes and re-renders.
pub struct CompletionRouter<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    binder: MessageBinder<M, C>,
    observer: Arc<dyn SyncObserver>,
}

impl<S, M, C> CompletionRouter<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    /// Creates a router.
    #[must_use]
    pub fn new(store: Arc<S>, binder: MessageBinder<M, C>, observer: Arc<dyn SyncObserver>) -> Self {
        Self {
            store,
            binder,
            observer,
        }
    }

    /// Handles an activated control identifier.
    ///
    /// Completion is idempotent: an already completed task is re-rendered
    /// without changing state. Malformed, provisional, and unknown
    /// identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns a store error when the update or re-fetch fails for a reason
    /// other than the task being missing.
    pub async fn complete(&self, custom_id: &str) -> TodoLifecycleResult<CompletionOutcome> {
        let task_id = match CompletionTrigger::parse(custom_id) {
            Ok(CompletionTrigger::Bound(task_id)) => task_id,
            Ok(CompletionTrigger::Provisional) => {
                tracing::debug!(custom_id, "ignoring provisional completion trigger");
                return Ok(CompletionOutcome::Ignored(IgnoreReason::ProvisionalTrigger));
            }
            Err(err) => {
                tracing::warn!(custom_id, error = %err, "ignoring malformed completion trigger");
                return Ok(CompletionOutcome::Ignored(IgnoreReason::MalformedTrigger(
                    custom_id.to_owned(),
                )));
            }
        };

        match self.store.set_completed(task_id).await {
            Ok(changed) => tracing::debug!(%task_id, changed, "completion stored"),
            Err(TaskStoreError::NotFound(_)) => return Ok(unknown(task_id)),
            Err(err) => {
                tracing::error!(%task_id, error = %err, "failed to complete task");
                return Err(err.into());
            }
        }

        let Some(task) = self.store.find_task(task_id).await? else {
            return Ok(unknown(task_id));
        };

        let rendered = match self.binder.render_completed(&task).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    %task_id,
                    message_id = %task.message_id(),
                    error = %err,
                    "failed to render completed task"
                );
                self.observer.record(&SyncIncident::CompletionRenderFailed {
                    task_id,
                    message_id: task.message_id().clone(),
                    reason: err.to_string(),
                });
                false
            }
        };

        Ok(CompletionOutcome::Completed { task, rendered })
    }
}

fn unknown(task_id: TaskId) -> CompletionOutcome {
    tracing::debug!(%task_id, "ignoring completion of unknown task");
    CompletionOutcome::Ignored(IgnoreReason::UnknownTask(task_id))
}
