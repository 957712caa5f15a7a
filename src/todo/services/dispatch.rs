//! Routes platform interactions to the TODO services and acknowledges them.

use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

use super::{
    CompletionOutcome, CompletionRouter, LifecycleOrchestrator, ListOutcome, MessageBinder,
};
use crate::todo::{
    domain::{ArtifactBody, ChannelId, CompletionTrigger, MessageId, TodoCommand},
    ports::{MessagingSurface, SyncObserver, TaskStore},
};

/// Reply shown when a channel has no tasks.
pub const EMPTY_LIST_NOTICE: &str = "No tasks in this channel!";
/// Reply shown when listing fails.
pub const LIST_FAILED_NOTICE: &str = "Failed to fetch tasks!";
/// Reply shown when a reset fails.
pub const RESET_FAILED_NOTICE: &str = "Failed to reset tasks!";
/// Reply shown when a task cannot be created.
pub const ADD_FAILED_NOTICE: &str = "Failed to create task!";

/// An event delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A `/todo` command invoked in a channel.
    Command {
        /// Channel the command was invoked in.
        channel_id: ChannelId,
        /// Validated command.
        command: TodoCommand,
    },
    /// An interactive control was activated.
    Component {
        /// Identifier of the activated control.
        custom_id: String,
    },
}

/// Response to an interaction. Commands always receive exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Acknowledgment {
    /// The reply is a published artifact.
    Artifact {
        /// Published artifact.
        message_id: MessageId,
    },
    /// The reply is a standalone embed.
    Embed {
        /// Embed body.
        body: ArtifactBody,
    },
    /// A plain text reply.
    Notice {
        /// Reply text.
        content: String,
        /// Whether only the invoker sees the reply.
        ephemeral: bool,
    },
    /// The activated control's message was updated in place.
    Updated {
        /// Updated artifact.
        message_id: MessageId,
    },
    /// The interaction was ignored.
    Silent,
}

impl Acknowledgment {
    fn ephemeral(content: &str) -> Self {
        Self::Notice {
            content: content.to_owned(),
            ephemeral: true,
        }
    }
}

/// Entry point for platform interactions.
pub struct InteractionDispatcher<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    lifecycle: LifecycleOrchestrator<S, M, C>,
    completion: CompletionRouter<S, M, C>,
}

impl<S, M, C> InteractionDispatcher<S, M, C>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
{
    /// Wires the orchestrator and router around one shared store and surface.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        surface: Arc<M>,
        clock: Arc<C>,
        observer: Arc<dyn SyncObserver>,
    ) -> Self {
        let binder = MessageBinder::new(surface, clock);
        Self {
            lifecycle: LifecycleOrchestrator::new(
                Arc::clone(&store),
                binder.clone(),
                Arc::clone(&observer),
            ),
            completion: CompletionRouter::new(store, binder, observer),
        }
    }

    /// Returns the lifecycle orchestrator.
    #[must_use]
    pub const fn lifecycle(&self) -> &LifecycleOrchestrator<S, M, C> {
        &self.lifecycle
    }

    /// Returns the completion router.
    #[must_use]
    pub const fn completion(&self) -> &CompletionRouter<S, M, C> {
        &self.completion
    }

    /// Handles any interaction.
    pub async fn dispatch(&self, interaction: Interaction) -> Acknowledgment {
        match interaction {
            Interaction::Command {
                channel_id,
                command,
            } => self.handle_command(&channel_id, command).await,
            Interaction::Component { custom_id } => self.handle_component(&custom_id).await,
        }
    }

    /// Runs a `/todo` command; failures become notices.
    pub async fn handle_command(
        &self,
        channel_id: &ChannelId,
        command: TodoCommand,
    ) -> Acknowledgment {
        let name = command.name();
        tracing::debug!(%channel_id, command = name, "handling command");
        match command {
            TodoCommand::Add { task } => match self.lifecycle.add(channel_id, task).await {
                Ok(outcome) => Acknowledgment::Artifact {
                    message_id: outcome.artifact.message_id().clone(),
                },
                Err(err) => {
                    tracing::error!(%channel_id, error = %err, "add failed");
                    Acknowledgment::ephemeral(ADD_FAILED_NOTICE)
                }
            },
            TodoCommand::List => match self.lifecycle.list(channel_id).await {
                Ok(ListOutcome::Empty) => Acknowledgment::ephemeral(EMPTY_LIST_NOTICE),
                Ok(ListOutcome::Published { message_id, .. }) => {
                    Acknowledgment::Artifact { message_id }
                }
                Err(err) => {
                    tracing::error!(%channel_id, error = %err, "list failed");
                    Acknowledgment::ephemeral(LIST_FAILED_NOTICE)
                }
            },
            TodoCommand::Reset => match self.lifecycle.reset(channel_id).await {
                Ok(summary) => Acknowledgment::Embed {
                    body: self.lifecycle.binder().reset_summary(&summary),
                },
                Err(err) => {
                    tracing::error!(%channel_id, error = %err, "reset failed");
                    Acknowledgment::ephemeral(RESET_FAILED_NOTICE)
                }
            },
        }
    }

    /// Handles an activated control; only completion triggers are routed.
    pub async fn handle_component(&self, custom_id: &str) -> Acknowledgment {
        if !CompletionTrigger::matches(custom_id) {
            tracing::debug!(custom_id, "ignoring unrelated component");
            return Acknowledgment::Silent;
        }

        match self.completion.complete(custom_id).await {
            Ok(CompletionOutcome::Completed {
                task,
                rendered: true,
            }) => Acknowledgment::Updated {
                message_id: task.message_id().clone(),
            },
            Ok(_) => Acknowledgment::Silent,
            Err(err) => {
                tracing::error!(custom_id, error = %err, "completion failed");
                Acknowledgment::Silent
            }
        }
    }
}
