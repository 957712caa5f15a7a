//! Add, list, and reset orchestration for channel TODOs.

use mockable::Clock;
use std::sync::Arc;

use super::{ArtifactRemoval, MessageBinder, ResetSummary, TodoLifecycleResult};
use crate::todo::{
    domain::{ChannelId, CreationArtifact, MessageId, TaskContent, TaskId},
    ports::{MessagingSurface, ResetPass, SyncIncident, SyncObserver, TaskStore},
};

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Identifier assigned by the store.
    pub task_id: TaskId,
    /// Published creation artifact; still provisional when the bind patch
    /// failed.
    pub artifact: CreationArtifact,
}

/// Result of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The channel has no tasks; nothing was published or recorded.
    Empty,
    /// A list artifact was published.
    Published {
        /// Published list artifact.
        message_id: MessageId,
        /// Number of rows rendered.
        task_count: usize,
    },
}

/// Orchestrates task creation, listing, and channel teardown.
///
/// Holds no per-invocation state; every operation reads what it needs from
/// the store.
pub struct LifecycleOrchestrator<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    binder: MessageBinder<M, C>,
    observer: Arc<dyn SyncObserver>,
}

impl<S, M, C> LifecycleOrchestrator<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(store: Arc<S>, binder: MessageBinder<M, C>, observer: Arc<dyn SyncObserver>) -> Self {
        Self {
            store,
            binder,
            observer,
        }
    }

    /// Returns the binder used for artifacts.
    #[must_use]
    pub const fn binder(&self) -> &MessageBinder<M, C> {
        &self.binder
    }

    /// Creates a task: publish with a placeholder trigger, insert the record,
    /// then patch the artifact with the real trigger.
    ///
    /// A failed patch is reported to the observer and does not fail the add.
    ///
    /// # Errors
    ///
    /// Returns a messaging error when the publish fails (no record is
    /// written) and a store error when the insert fails (the orphaned
    /// artifact is deleted best-effort).
    pub async fn add(
        &self,
        channel_id: &ChannelId,
        content: TaskContent,
    ) -> TodoLifecycleResult<AddOutcome> {
        let mut artifact = self.binder.publish_creation(channel_id, &content).await?;

        let task_id = match self
            .store
            .insert_task(channel_id, artifact.message_id(), &content)
            .await
        {
            Ok(task_id) => task_id,
            Err(err) => {
                tracing::error!(
                    %channel_id,
                    message_id = %artifact.message_id(),
                    error = %err,
                    "failed to store task"
                );
                self.observer.record(&SyncIncident::OrphanedArtifact {
                    channel_id: channel_id.clone(),
                    message_id: artifact.message_id().clone(),
                    reason: err.to_string(),
                });
                self.remove_artifact(channel_id, artifact.message_id()).await;
                return Err(err.into());
            }
        };

        if let Err(err) = self.binder.bind_creation(&mut artifact, task_id).await {
            tracing::warn!(
                %channel_id,
                %task_id,
                message_id = %artifact.message_id(),
                error = %err,
                "failed to bind completion trigger"
            );
            self.observer.record(&SyncIncident::BindPatchFailed {
                task_id,
                channel_id: channel_id.clone(),
                message_id: artifact.message_id().clone(),
                reason: err.to_string(),
            });
        }

        tracing::debug!(%channel_id, %task_id, bound = artifact.trigger().is_bound(), "task added");
        Ok(AddOutcome { task_id, artifact })
    }

    /// Publishes a snapshot of the channel's tasks, newest first, and records
    /// it for later cleanup.
    ///
    /// # Errors
    ///
    /// Returns store, render, or messaging errors raised before the list was
    /// published. A failure to record the snapshot is only reported.
    pub async fn list(&self, channel_id: &ChannelId) -> TodoLifecycleResult<ListOutcome> {
        let tasks = self.store.list_tasks(channel_id).await?;
        if tasks.is_empty() {
            return Ok(ListOutcome::Empty);
        }

        let message_id = self.binder.publish_list(channel_id, &tasks).await?;
        if let Err(err) = self.store.insert_list_snapshot(channel_id, &message_id).await {
            tracing::warn!(%channel_id, %message_id, error = %err, "failed to record list snapshot");
            self.observer.record(&SyncIncident::SnapshotNotRecorded {
                channel_id: channel_id.clone(),
                message_id: message_id.clone(),
                reason: err.to_string(),
            });
        }

        Ok(ListOutcome::Published {
            message_id,
            task_count: tasks.len(),
        })
    }

    /// Removes every task artifact, every list artifact, and every task
    /// record of the channel.
    ///
    /// Artifact passes are independent of each other and of the record
    /// purge; individual deletion failures are tallied, not raised.
    ///
    /// # Errors
    ///
    /// Returns a store error only when the task record purge fails.
    pub async fn reset(&self, channel_id: &ChannelId) -> TodoLifecycleResult<ResetSummary> {
        let mut summary = ResetSummary::default();

        match self.store.list_task_message_ids(channel_id).await {
            Ok(message_ids) => {
                self.remove_all(channel_id, &message_ids, &mut summary).await;
            }
            Err(err) => self.pass_failed(channel_id, ResetPass::TaskArtifacts, &err),
        }

        match self.store.list_snapshots(channel_id).await {
            Ok(snapshots) => {
                let message_ids: Vec<MessageId> = snapshots
                    .iter()
                    .map(|snapshot| snapshot.message_id().clone())
                    .collect();
                self.remove_all(channel_id, &message_ids, &mut summary).await;
            }
            Err(err) => self.pass_failed(channel_id, ResetPass::SnapshotArtifacts, &err),
        }

        summary.records_removed = self
            .store
            .delete_all_tasks(channel_id)
            .await
            .inspect_err(|err| {
                tracing::error!(%channel_id, error = %err, "failed to purge task records");
            })?;

        if let Err(err) = self.store.delete_all_snapshots(channel_id).await {
            self.pass_failed(channel_id, ResetPass::SnapshotRecords, &err);
        }

        tracing::info!(
            %channel_id,
            records_removed = summary.records_removed,
            messages_removed = summary.messages_removed,
            already_gone = summary.already_gone,
            failed = summary.failed,
            "channel reset"
        );
        Ok(summary)
    }

    async fn remove_all(
        &self,
        channel_id: &ChannelId,
        message_ids: &[MessageId],
        summary: &mut ResetSummary,
    ) {
        for message_id in message_ids {
            match self.remove_artifact(channel_id, message_id).await {
                ArtifactRemoval::Deleted => summary.messages_removed += 1,
                ArtifactRemoval::AlreadyGone => summary.already_gone += 1,
                ArtifactRemoval::Failed(_) => summary.failed += 1,
            }
        }
    }

    async fn remove_artifact(&self, channel_id: &ChannelId, message_id: &MessageId) -> ArtifactRemoval {
        let removal = self.binder.delete_artifact(channel_id, message_id).await;
        match &removal {
            ArtifactRemoval::Deleted => {}
            ArtifactRemoval::AlreadyGone => {
                self.observer.record(&SyncIncident::ArtifactAlreadyGone {
                    channel_id: channel_id.clone(),
                    message_id: message_id.clone(),
                });
            }
            ArtifactRemoval::Failed(err) => {
                tracing::warn!(%channel_id, %message_id, error = %err, "failed to delete artifact");
                self.observer.record(&SyncIncident::ArtifactDeleteFailed {
                    channel_id: channel_id.clone(),
                    message_id: message_id.clone(),
                    reason: err.to_string(),
                });
            }
        }
        removal
    }

    fn pass_failed(&self, channel_id: &ChannelId, pass: ResetPass, err: &impl std::fmt::Display) {
        tracing::warn!(%channel_id, %pass, error = %err, "reset pass failed");
        self.observer.record(&SyncIncident::ResetPassFailed {
            channel_id: channel_id.clone(),
            pass,
            reason: err.to_string(),
        });
    }
}
