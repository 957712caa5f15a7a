//! Error types for command parsing and resolution.

use thiserror::Error;

use crate::todo::domain::TodoDomainError;

/// Errors for command parsing, schema validation, and resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The input was empty after trimming.
    #[error("command input is empty")]
    EmptyInput,

    /// Commands must start with `/`.
    #[error("command input must start with '/'")]
    MissingLeadingSlash,

    /// The command name contains unsupported characters.
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),

    /// The command name does not match the declared schema.
    #[error("unknown command '/{0}'")]
    UnknownCommand(String),

    /// No subcommand was given.
    #[error("command '/{command}' requires a subcommand")]
    MissingSubcommand {
        /// Command name.
        command: String,
    },

    /// The subcommand is not declared by the schema.
    #[error("unknown subcommand '{subcommand}' for '/{command}'")]
    UnknownSubcommand {
        /// Command name.
        command: String,
        /// Rejected subcommand.
        subcommand: String,
    },

    /// A parameter token is not a `key=value` pair.
    #[error("invalid parameter token '{token}'")]
    InvalidParameterToken {
        /// Offending token.
        token: String,
    },

    /// A parameter was given more than once.
    #[error("duplicate parameter '{0}'")]
    DuplicateParameter(String),

    /// The parameter is not declared for the subcommand.
    #[error("unknown parameter '{parameter}' for subcommand '{subcommand}'")]
    UnknownParameter {
        /// Subcommand name.
        subcommand: String,
        /// Rejected parameter.
        parameter: String,
    },

    /// A required parameter is missing.
    #[error("missing required parameter '{parameter}' for subcommand '{subcommand}'")]
    MissingRequiredParameter {
        /// Subcommand name.
        subcommand: String,
        /// Missing parameter.
        parameter: String,
    },

    /// A quoted value was not terminated.
    #[error("unterminated quoted value")]
    UnterminatedQuotedValue,

    /// The task text failed domain validation.
    #[error("invalid task: {0}")]
    InvalidTask(#[from] TodoDomainError),
}
