//! Completion trigger identifiers carried by interactive controls.

use super::{TaskId, TriggerParseError};
use serde::{Serialize, Serializer};
use std::fmt;

/// Prefix shared by every completion control identifier.
pub const COMPLETION_TRIGGER_PREFIX: &str = "complete_todo_";

const PROVISIONAL_SUFFIX: &str = "temp";

/// Identifier attached to a task's completion control.
///
/// A creation artifact is published before the store has assigned the task
/// identifier, so its control starts out [`Provisional`](Self::Provisional)
/// and is patched to [`Bound`](Self::Bound) once the identifier is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionTrigger {
    /// Placeholder rendered before the task identifier exists.
    Provisional,
    /// Trigger bound to a stored task.
    Bound(TaskId),
}

impl CompletionTrigger {
    /// Returns `true` when the raw identifier uses the completion prefix.
    #[must_use]
    pub fn matches(raw: &str) -> bool {
        raw.starts_with(COMPLETION_TRIGGER_PREFIX)
    }

    /// Parses a control identifier of the form `complete_todo_<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerParseError::NotACompletionTrigger`] when the prefix is
    /// missing and [`TriggerParseError::InvalidTaskId`] when the suffix is
    /// neither the placeholder nor a positive decimal integer.
    pub fn parse(raw: &str) -> Result<Self, TriggerParseError> {
        let suffix = raw
            .strip_prefix(COMPLETION_TRIGGER_PREFIX)
            .ok_or_else(|| TriggerParseError::NotACompletionTrigger(raw.to_owned()))?;

        if suffix == PROVISIONAL_SUFFIX {
            return Ok(Self::Provisional);
        }

        if suffix.is_empty() || !suffix.chars().all(|character| character.is_ascii_digit()) {
            return Err(TriggerParseError::InvalidTaskId(raw.to_owned()));
        }

        suffix
            .parse::<i64>()
            .ok()
            .and_then(|value| TaskId::new(value).ok())
            .map(Self::Bound)
            .ok_or_else(|| TriggerParseError::InvalidTaskId(raw.to_owned()))
    }

    /// Returns the bound task identifier, if any.
    #[must_use]
    pub const fn task_id(self) -> Option<TaskId> {
        match self {
            Self::Provisional => None,
            Self::Bound(task_id) => Some(task_id),
        }
    }

    /// Returns `true` once the trigger carries a real task identifier.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl fmt::Display for CompletionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provisional => write!(f, "{COMPLETION_TRIGGER_PREFIX}{PROVISIONAL_SUFFIX}"),
            Self::Bound(task_id) => write!(f, "{COMPLETION_TRIGGER_PREFIX}{task_id}"),
        }
    }
}

impl Serialize for CompletionTrigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
