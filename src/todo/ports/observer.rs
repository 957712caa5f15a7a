//! Observability hook for non-fatal drift between records and artifacts.
//!
//! Several failures leave a task record and its chat projection out of step
//! without failing the invocation (a patch that did not land, an artifact that
//! could not be removed). They are reported here so the drift is diagnosable.

use crate::todo::domain::{ChannelId, MessageId, TaskId};
use std::fmt;

/// Reset cleanup pass that could not run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPass {
    /// Looking up task artifact identifiers.
    TaskArtifacts,
    /// Looking up list snapshot artifact identifiers.
    SnapshotArtifacts,
    /// Purging list snapshot records.
    SnapshotRecords,
}

impl fmt::Display for ResetPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TaskArtifacts => "task_artifacts",
            Self::SnapshotArtifacts => "snapshot_artifacts",
            Self::SnapshotRecords => "snapshot_records",
        };
        f.write_str(label)
    }
}

/// A recoverable inconsistency between persisted and rendered state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncIncident {
    /// The creation artifact kept its placeholder trigger; the completion
    /// control is inert.
    BindPatchFailed {
        /// Task whose trigger could not be embedded.
        task_id: TaskId,
        /// Channel of the artifact.
        channel_id: ChannelId,
        /// Artifact left provisional.
        message_id: MessageId,
        /// Failure description.
        reason: String,
    },
    /// A creation artifact was published but its record could not be stored.
    OrphanedArtifact {
        /// Channel of the artifact.
        channel_id: ChannelId,
        /// Artifact without a record.
        message_id: MessageId,
        /// Failure description.
        reason: String,
    },
    /// A list artifact was published but not recorded, so reset will not
    /// remove it.
    SnapshotNotRecorded {
        /// Channel of the artifact.
        channel_id: ChannelId,
        /// Untracked list artifact.
        message_id: MessageId,
        /// Failure description.
        reason: String,
    },
    /// A completed task's artifact still shows the pending view.
    CompletionRenderFailed {
        /// Completed task.
        task_id: TaskId,
        /// Artifact left stale.
        message_id: MessageId,
        /// Failure description.
        reason: String,
    },
    /// An artifact had already been removed from the channel.
    ArtifactAlreadyGone {
        /// Channel of the artifact.
        channel_id: ChannelId,
        /// Missing artifact.
        message_id: MessageId,
    },
    /// An artifact could not be removed from the channel.
    ArtifactDeleteFailed {
        /// Channel of the artifact.
        channel_id: ChannelId,
        /// Artifact left behind.
        message_id: MessageId,
        /// Failure description.
        reason: String,
    },
    /// A reset pass was skipped because the store failed.
    ResetPassFailed {
        /// Channel being reset.
        channel_id: ChannelId,
        /// Pass that failed.
        pass: ResetPass,
        /// Failure description.
        reason: String,
    },
}

/// Receiver of [`SyncIncident`]s.
pub trait SyncObserver: Send + Sync {
    /// Records an incident. Must not block.
    fn record(&self, incident: &SyncIncident);
}
