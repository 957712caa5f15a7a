//! Projection of task records onto messaging surface artifacts.

use mockable::Clock;
use std::sync::Arc;

use super::{ArtifactRenderer, ResetSummary, TodoLifecycleResult};
use crate::todo::{
    domain::{
        ArtifactBody, ChannelId, CompletionTrigger, CreationArtifact, MessageId, Task,
        TaskContent, TaskId,
    },
    ports::{MessageHandle, MessagingError, MessagingResult, MessagingSurface},
};

/// Outcome of a best-effort artifact deletion.
#[derive(Debug, Clone)]
pub enum ArtifactRemoval {
    /// The artifact was deleted.
    Deleted,
    /// The artifact no longer existed.
    AlreadyGone,
    /// The platform refused or failed the deletion.
    Failed(MessagingError),
}

/// Publishes, patches, and deletes the chat artifacts that mirror tasks.
pub struct MessageBinder<M, C>
where
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    surface: Arc<M>,
    renderer: ArtifactRenderer<C>,
}

impl<M, C> Clone for MessageBinder<M, C>
where
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            renderer: self.renderer.clone(),
        }
    }
}

impl<M, C> MessageBinder<M, C>
where
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    /// Creates a binder.
    #[must_use]
    pub const fn new(surface: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            surface,
            renderer: ArtifactRenderer::new(clock),
        }
    }

    /// Returns the renderer used for artifact bodies.
    #[must_use]
    pub const fn renderer(&self) -> &ArtifactRenderer<C> {
        &self.renderer
    }

    /// Publishes a creation artifact carrying the placeholder trigger.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the publish fails; nothing was
    /// published in that case.
    pub async fn publish_creation(
        &self,
        channel_id: &ChannelId,
        content: &TaskContent,
    ) -> MessagingResult<CreationArtifact> {
        let published_at = self.renderer.now();
        let body = self
            .renderer
            .creation(content, CompletionTrigger::Provisional, published_at);
        let message_id = self.surface.publish(channel_id, &body).await?;
        Ok(CreationArtifact::provisional(
            channel_id.clone(),
            message_id,
            content.clone(),
            published_at,
        ))
    }

    /// Patches a provisional creation artifact in place with the real
    /// trigger. The artifact is marked bound only when the edit lands.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the edit fails; the artifact stays
    /// provisional.
    pub async fn bind_creation(
        &self,
        artifact: &mut CreationArtifact,
        task_id: TaskId,
    ) -> MessagingResult<()> {
        let body = self.renderer.creation(
            artifact.content(),
            CompletionTrigger::Bound(task_id),
            artifact.published_at(),
        );
        self.surface
            .edit(artifact.channel_id(), artifact.message_id(), &body)
            .await?;
        artifact.bind(task_id);
        Ok(())
    }

    /// Renders and publishes a list artifact for `tasks`.
    ///
    /// # Errors
    ///
    /// Returns render or surface errors; nothing was published in either
    /// case.
    pub async fn publish_list(
        &self,
        channel_id: &ChannelId,
        tasks: &[Task],
    ) -> TodoLifecycleResult<MessageId> {
        let body = self.renderer.list(tasks)?;
        Ok(self.surface.publish(channel_id, &body).await?)
    }

    /// Replaces a task's creation artifact with its completed view.
    ///
    /// # Errors
    ///
    /// Returns render or surface errors.
    pub async fn render_completed(&self, task: &Task) -> TodoLifecycleResult<()> {
        let body = self.renderer.completed(task)?;
        self.surface
            .edit(task.channel_id(), task.message_id(), &body)
            .await?;
        Ok(())
    }

    /// Renders a reset acknowledgment body.
    #[must_use]
    pub fn reset_summary(&self, summary: &ResetSummary) -> ArtifactBody {
        self.renderer.reset_summary(summary)
    }

    /// Deletes an artifact if it still exists.
    pub async fn delete_artifact(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ArtifactRemoval {
        let handle = match self.surface.fetch(channel_id, message_id).await {
            Ok(Some(handle)) => handle,
            Ok(None) => return ArtifactRemoval::AlreadyGone,
            Err(err) => return classify_failure(err),
        };
        self.delete_handle(&handle).await
    }

    async fn delete_handle(&self, handle: &MessageHandle) -> ArtifactRemoval {
        match self.surface.delete(handle).await {
            Ok(()) => ArtifactRemoval::Deleted,
            Err(err) => classify_failure(err),
        }
    }
}

fn classify_failure(err: MessagingError) -> ArtifactRemoval {
    if err.is_unknown_message() {
        ArtifactRemoval::AlreadyGone
    } else {
        ArtifactRemoval::Failed(err)
    }
}
