//! Observer that reports sync incidents as `tracing` events.

use crate::todo::ports::{SyncIncident, SyncObserver};

/// Default observer: one `warn` event per incident, `debug` for messages
/// that were already gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSyncObserver;

impl SyncObserver for TracingSyncObserver {
    fn record(&self, incident: &SyncIncident) {
        match incident {
            SyncIncident::BindPatchFailed {
                task_id,
                channel_id,
                message_id,
                reason,
            } => tracing::warn!(
                %task_id,
                %channel_id,
                %message_id,
                %reason,
                "completion control left provisional"
            ),
            SyncIncident::OrphanedArtifact {
                channel_id,
                message_id,
                reason,
            } => tracing::warn!(
                %channel_id,
                %message_id,
                %reason,
                "creation artifact has no task record"
            ),
            SyncIncident::SnapshotNotRecorded {
                channel_id,
                message_id,
                reason,
            } => tracing::warn!(
                %channel_id,
                %message_id,
                %reason,
                "list artifact not recorded; reset will not remove it"
            ),
            SyncIncident::CompletionRenderFailed {
                task_id,
                message_id,
                reason,
            } => tracing::warn!(
                %task_id,
                %message_id,
                %reason,
                "completed task still rendered as pending"
            ),
            SyncIncident::ArtifactAlreadyGone {
                channel_id,
                message_id,
            } => tracing::debug!(%channel_id, %message_id, "artifact already removed"),
            SyncIncident::ArtifactDeleteFailed {
                channel_id,
                message_id,
                reason,
            } => tracing::warn!(
                %channel_id,
                %message_id,
                %reason,
                "artifact could not be removed"
            ),
            SyncIncident::ResetPassFailed {
                channel_id,
                pass,
                reason,
            } => tracing::warn!(%channel_id, %pass, %reason, "reset pass skipped"),
        }
    }
}
