//! Domain model for channel TODO tracking.
//!
//! Task records, their rendered artifacts, completion triggers, and the
//! `/todo` command schema. Nothing here knows about storage or the chat
//! platform.

mod artifact;
pub mod command;
mod error;
mod ids;
mod task;
mod trigger;

pub use artifact::{ArtifactBody, CompletionControl, CreationArtifact};
pub use command::{CommandDefinition, CommandError, TodoCommand};
pub use error::{TodoDomainError, TriggerParseError};
pub use ids::{ChannelId, MessageId, TaskId};
pub use task::{ListSnapshot, PersistedTaskData, Task, TaskContent};
pub use trigger::{COMPLETION_TRIGGER_PREFIX, CompletionTrigger};
