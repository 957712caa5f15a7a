//! Line-oriented console front end for local runs.
//!
//! Commands arrive as text lines and every artifact change is echoed to a
//! writer as one JSON object per line.

use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

use super::memory::InMemoryMessagingSurface;
use crate::todo::{
    domain::{ArtifactBody, ChannelId, CommandDefinition, CommandError, MessageId},
    ports::{MessageHandle, MessagingError, MessagingResult, MessagingSurface},
    services::Interaction,
};

/// Prefix of console lines that activate a control.
pub const COMPLETE_DIRECTIVE: &str = "!complete";

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum SurfaceEvent<'a> {
    Published {
        channel_id: &'a ChannelId,
        message_id: &'a MessageId,
        body: &'a ArtifactBody,
    },
    Edited {
        channel_id: &'a ChannelId,
        message_id: &'a MessageId,
        body: &'a ArtifactBody,
    },
    Deleted {
        channel_id: &'a ChannelId,
        message_id: &'a MessageId,
    },
}

/// Messaging surface that keeps messages in memory and writes every change
/// to `W`.
pub struct ConsoleMessagingSurface<W>
where
    W: Write + Send,
{
    messages: InMemoryMessagingSurface,
    sink: Mutex<W>,
}

impl<W> ConsoleMessagingSurface<W>
where
    W: Write + Send,
{
    /// Creates a surface writing to `sink`.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            messages: InMemoryMessagingSurface::new(),
            sink: Mutex::new(sink),
        }
    }

    /// Returns the backing in-memory surface.
    #[must_use]
    pub const fn messages(&self) -> &InMemoryMessagingSurface {
        &self.messages
    }

    /// Consumes the surface and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the sink lock was poisoned.
    pub fn into_sink(self) -> MessagingResult<W> {
        self.sink
            .into_inner()
            .map_err(|err| MessagingError::transport(std::io::Error::other(err.to_string())))
    }

    /// Echoes `event` to the sink.
    ///
    /// The in-memory change has already been applied when this runs, so a
    /// sink failure is logged and the operation still reports success.
    fn emit(&self, event: &SurfaceEvent<'_>) {
        if let Err(err) = self.write_event(event) {
            tracing::warn!(error = %err, ?event, "console sink rejected surface event");
        }
    }

    fn write_event(&self, event: &SurfaceEvent<'_>) -> MessagingResult<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|err| MessagingError::transport(std::io::Error::other(err.to_string())))?;
        serde_json::to_writer(&mut *sink, event).map_err(MessagingError::transport)?;
        writeln!(sink).map_err(MessagingError::transport)?;
        sink.flush().map_err(MessagingError::transport)
    }
}

#[async_trait]
impl<W> MessagingSurface for ConsoleMessagingSurface<W>
where
    W: Write + Send,
{
    async fn publish(
        &self,
        channel_id: &ChannelId,
        body: &ArtifactBody,
    ) -> MessagingResult<MessageId> {
        let message_id = self.messages.publish(channel_id, body).await?;
        self.emit(&SurfaceEvent::Published {
            channel_id,
            message_id: &message_id,
            body,
        });
        Ok(message_id)
    }

    async fn edit(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        body: &ArtifactBody,
    ) -> MessagingResult<()> {
        self.messages.edit(channel_id, message_id, body).await?;
        self.emit(&SurfaceEvent::Edited {
            channel_id,
            message_id,
            body,
        });
        Ok(())
    }

    async fn fetch(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> MessagingResult<Option<MessageHandle>> {
        self.messages.fetch(channel_id, message_id).await
    }

    async fn delete(&self, handle: &MessageHandle) -> MessagingResult<()> {
        self.messages.delete(handle).await?;
        self.emit(&SurfaceEvent::Deleted {
            channel_id: handle.channel_id(),
            message_id: handle.message_id(),
        });
        Ok(())
    }
}

/// Parses one console line into an interaction.
///
/// Blank lines yield `None`. `!complete <custom_id>` activates a control;
/// anything else is parsed as a `/todo` command in `channel_id`.
///
/// # Errors
///
/// Returns [`CommandError`] when the line is not a valid command.
pub fn parse_console_line(
    line: &str,
    channel_id: &ChannelId,
    definition: &CommandDefinition,
) -> Result<Option<Interaction>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let directive = trimmed
        .strip_prefix(COMPLETE_DIRECTIVE)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
    if let Some(rest) = directive {
        return Ok(Some(Interaction::Component {
            custom_id: rest.trim().to_owned(),
        }));
    }

    let command = definition.parse(trimmed)?;
    Ok(Some(Interaction::Command {
        channel_id: channel_id.clone(),
        command,
    }))
}
