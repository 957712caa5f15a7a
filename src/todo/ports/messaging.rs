//! Messaging surface port for publishing and managing channel artifacts.

use crate::todo::domain::{ArtifactBody, ChannelId, MessageId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for messaging surface operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Handle to a message that was confirmed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    channel_id: ChannelId,
    message_id: MessageId,
}

impl MessageHandle {
    /// Creates a handle.
    #[must_use]
    pub const fn new(channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }

    /// Returns the channel holding the message.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }
}

/// Chat platform operations used to project task state.
///
/// Every operation is fallible. Callers await a publish before editing the
/// message it produced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingSurface: Send + Sync {
    /// Publishes a message and returns its identifier.
    async fn publish(
        &self,
        channel_id: &ChannelId,
        body: &ArtifactBody,
    ) -> MessagingResult<MessageId>;

    /// Replaces the content of an existing message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UnknownMessage`] when the message is gone.
    async fn edit(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        body: &ArtifactBody,
    ) -> MessagingResult<()>;

    /// Looks a message up.
    ///
    /// Returns `None` when the message no longer exists.
    async fn fetch(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> MessagingResult<Option<MessageHandle>>;

    /// Deletes a fetched message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::UnknownMessage`] when the message vanished
    /// after it was fetched.
    async fn delete(&self, handle: &MessageHandle) -> MessagingResult<()>;
}

/// Errors returned by messaging surface adapters.
#[derive(Debug, Clone, Error)]
pub enum MessagingError {
    /// The message does not exist, usually because it was deleted.
    #[error("unknown message {0}")]
    UnknownMessage(MessageId),

    /// The platform refused the call because of rate limiting.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay requested by the platform.
        retry_after: Duration,
    },

    /// The bot lacks access to the channel.
    #[error("missing access to channel {0}")]
    Forbidden(ChannelId),

    /// Transport or platform failure.
    #[error("messaging transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessagingError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` when the error means the message is already gone.
    #[must_use]
    pub const fn is_unknown_message(&self) -> bool {
        matches!(self, Self::UnknownMessage(_))
    }
}
