//! Rendered chat artifacts that project task state onto a channel.

use super::{ChannelId, CompletionTrigger, MessageId, TaskContent, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Interactive control that completes a task when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionControl {
    /// Identifier delivered back when the control is activated.
    pub trigger: CompletionTrigger,
    /// Button label.
    pub label: String,
}

/// Message body published to, or edited on, the messaging surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactBody {
    /// Heading line.
    pub title: String,
    /// Main text.
    pub description: String,
    /// Accent colour as `0xRRGGBB`.
    pub colour: u32,
    /// Render timestamp.
    pub timestamp: DateTime<Utc>,
    /// Interactive controls; empty for terminal or read-only artifacts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<CompletionControl>,
}

impl ArtifactBody {
    /// Creates a body without controls.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        colour: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            timestamp,
            controls: Vec::new(),
        }
    }

    /// Adds a completion control.
    #[must_use]
    pub fn with_control(mut self, control: CompletionControl) -> Self {
        self.controls.push(control);
        self
    }

    /// Returns the trigger of the first completion control, if any.
    #[must_use]
    pub fn completion_trigger(&self) -> Option<CompletionTrigger> {
        self.controls.first().map(|control| control.trigger)
    }
}

/// Creation artifact published for a task, tracked through its two-phase
/// binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationArtifact {
    channel_id: ChannelId,
    message_id: MessageId,
    content: TaskContent,
    published_at: DateTime<Utc>,
    trigger: CompletionTrigger,
}

impl CreationArtifact {
    /// Describes an artifact that was just published with a placeholder
    /// trigger.
    #[must_use]
    pub const fn provisional(
        channel_id: ChannelId,
        message_id: MessageId,
        content: TaskContent,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            channel_id,
            message_id,
            content,
            published_at,
            trigger: CompletionTrigger::Provisional,
        }
    }

    /// Returns the channel the artifact lives in.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the platform message identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns the task text shown by the artifact.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the timestamp shown by the artifact.
    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Returns the trigger currently rendered on the artifact.
    #[must_use]
    pub const fn trigger(&self) -> CompletionTrigger {
        self.trigger
    }

    /// Records that the artifact now carries the real trigger for `task_id`.
    pub const fn bind(&mut self, task_id: TaskId) {
        self.trigger = CompletionTrigger::Bound(task_id);
    }
}
