//! Error types for TODO domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain TODO values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// Task identifiers are assigned by the store and are always positive.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The channel identifier is empty or contains whitespace.
    #[error("invalid channel identifier '{0}'")]
    InvalidChannelId(String),

    /// The message identifier is empty or contains whitespace.
    #[error("invalid message identifier '{0}'")]
    InvalidMessageId(String),

    /// The task text is empty after trimming.
    #[error("task content must not be empty")]
    EmptyContent,

    /// The task text exceeds the rendered description limit.
    #[error("task content is {length} characters long, maximum is {max}")]
    ContentTooLong {
        /// Length of the rejected content in characters.
        length: usize,
        /// Maximum accepted length in characters.
        max: usize,
    },
}

/// Error returned when a completion trigger identifier cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriggerParseError {
    /// The identifier does not carry the completion prefix.
    #[error("'{0}' is not a completion trigger")]
    NotACompletionTrigger(String),

    /// The suffix after the prefix is not a valid task identifier.
    #[error("completion trigger '{0}' does not carry a valid task identifier")]
    InvalidTaskId(String),
}
