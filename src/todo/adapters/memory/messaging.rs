//! In-memory messaging surface for tests and the console driver.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::todo::{
    domain::{ArtifactBody, ChannelId, MessageId},
    ports::{MessageHandle, MessagingError, MessagingResult, MessagingSurface},
};

/// A message held by [`InMemoryMessagingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    /// Channel the message was published in.
    pub channel_id: ChannelId,
    /// Current body.
    pub body: ArtifactBody,
    /// Number of successful edits since publishing.
    pub edit_count: usize,
}

/// In-memory messaging surface.
///
/// Models message lifecycle without a platform connection and lets tests
/// inject failures: refused publishes or edits, per-message delete failures,
/// and messages removed behind the engine's back.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessagingSurface {
    state: Arc<RwLock<InMemorySurfaceState>>,
}

#[derive(Debug, Default)]
struct InMemorySurfaceState {
    messages: HashMap<MessageId, StoredMessage>,
    publish_order: Vec<MessageId>,
    failing_publishes: bool,
    failing_edits: bool,
    failing_deletes: HashSet<MessageId>,
}

impl InMemorySurfaceState {
    fn forget(&mut self, message_id: &MessageId) -> bool {
        self.publish_order.retain(|id| id != message_id);
        self.messages.remove(message_id).is_some()
    }
}

fn lock_error(err: impl ToString) -> MessagingError {
    MessagingError::transport(std::io::Error::other(err.to_string()))
}

fn injected_failure(operation: &str) -> MessagingError {
    MessagingError::transport(std::io::Error::other(format!(
        "injected {operation} failure"
    )))
}

impl InMemoryMessagingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a message by identifier, if it still exists.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn message(&self, message_id: &MessageId) -> MessagingResult<Option<StoredMessage>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.messages.get(message_id).cloned())
    }

    /// Returns the live messages of a channel in publish order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn channel_messages(
        &self,
        channel_id: &ChannelId,
    ) -> MessagingResult<Vec<(MessageId, StoredMessage)>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .publish_order
            .iter()
            .filter_map(|message_id| {
                state
                    .messages
                    .get(message_id)
                    .filter(|message| &message.channel_id == channel_id)
                    .map(|message| (message_id.clone(), message.clone()))
            })
            .collect())
    }

    /// Removes a message as if a user had deleted it manually.
    ///
    /// Returns `true` when the message existed.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn remove_externally(&self, message_id: &MessageId) -> MessagingResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.forget(message_id))
    }

    /// Makes every publish fail until switched back.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_publishes(&self, failing: bool) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_publishes = failing;
        Ok(())
    }

    /// Makes every edit fail until switched back.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_edits(&self, failing: bool) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_edits = failing;
        Ok(())
    }

    /// Makes deletion of one message fail.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_delete_of(&self, message_id: MessageId) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_deletes.insert(message_id);
        Ok(())
    }
}

#[async_trait]
impl MessagingSurface for InMemoryMessagingSurface {
    async fn publish(
        &self,
        channel_id: &ChannelId,
        body: &ArtifactBody,
    ) -> MessagingResult<MessageId> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.failing_publishes {
            return Err(injected_failure("publish"));
        }

        let message_id =
            MessageId::new(Uuid::new_v4().simple().to_string()).map_err(MessagingError::transport)?;
        state.messages.insert(
            message_id.clone(),
            StoredMessage {
                channel_id: channel_id.clone(),
                body: body.clone(),
                edit_count: 0,
            },
        );
        state.publish_order.push(message_id.clone());
        Ok(message_id)
    }

    async fn edit(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        body: &ArtifactBody,
    ) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.failing_edits {
            return Err(injected_failure("edit"));
        }

        let message = state
            .messages
            .get_mut(message_id)
            .filter(|message| &message.channel_id == channel_id)
            .ok_or_else(|| MessagingError::UnknownMessage(message_id.clone()))?;
        message.body = body.clone();
        message.edit_count += 1;
        Ok(())
    }

    async fn fetch(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> MessagingResult<Option<MessageHandle>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .messages
            .get(message_id)
            .filter(|message| &message.channel_id == channel_id)
            .map(|_| MessageHandle::new(channel_id.clone(), message_id.clone())))
    }

    async fn delete(&self, handle: &MessageHandle) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.failing_deletes.contains(handle.message_id()) {
            return Err(injected_failure("delete"));
        }

        if state.forget(handle.message_id()) {
            Ok(())
        } else {
            Err(MessagingError::UnknownMessage(handle.message_id().clone()))
        }
    }
}
