//! Typed TODO commands.

use crate::todo::domain::TaskContent;

/// A validated `/todo` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    /// Create a task and publish its creation artifact.
    Add {
        /// Task description.
        task: TaskContent,
    },
    /// Publish a snapshot of the channel's tasks.
    List,
    /// Remove every task record and artifact from the channel.
    Reset,
}

impl TodoCommand {
    /// Returns the subcommand name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Reset => "reset",
        }
    }
}
