//! Raw command-line parser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CommandError;

/// A parsed, not yet schema-validated, command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    command: String,
    subcommand: Option<String>,
    parameters: BTreeMap<String, String>,
}

impl CommandInvocation {
    /// Parses `/<command> <subcommand> key=value key2="quoted value"` input.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the input is empty or malformed.
    pub fn parse(raw_input: &str) -> Result<Self, CommandError> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Err(CommandError::EmptyInput);
        }

        let tokens = tokenize(trimmed)?;
        let mut remaining = tokens.iter();
        let command_token = remaining.next().ok_or(CommandError::EmptyInput)?;
        let command = parse_command_token(command_token)?;

        let mut subcommand = None;
        let mut parameters = BTreeMap::new();
        for token in remaining {
            let Some((key, value)) = token.split_once('=') else {
                if subcommand.is_none() && parameters.is_empty() && is_valid_identifier(token) {
                    subcommand = Some(token.to_ascii_lowercase());
                    continue;
                }
                return Err(CommandError::InvalidParameterToken {
                    token: token.to_owned(),
                });
            };

            if key.is_empty() || !is_valid_identifier(key) {
                return Err(CommandError::InvalidParameterToken {
                    token: token.to_owned(),
                });
            }

            let normalized_key = key.to_ascii_lowercase();
            if parameters
                .insert(normalized_key.clone(), value.to_owned())
                .is_some()
            {
                return Err(CommandError::DuplicateParameter(normalized_key));
            }
        }

        Ok(Self {
            command,
            subcommand,
            parameters,
        })
    }

    /// Returns the command name without the leading slash.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the subcommand name, if one was given.
    #[must_use]
    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    /// Returns parsed parameter values as raw strings.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

fn parse_command_token(token: &str) -> Result<String, CommandError> {
    let command = token
        .strip_prefix('/')
        .ok_or(CommandError::MissingLeadingSlash)?;
    if command.is_empty() || !is_valid_identifier(command) {
        return Err(CommandError::InvalidCommandName(command.to_owned()));
    }
    Ok(command.to_ascii_lowercase())
}

fn tokenize(input: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes: Option<char> = None;
    let mut escaped = false;

    for character in input.chars() {
        if let Some(quote_char) = in_quotes {
            if escaped {
                current.push(character);
                escaped = false;
                continue;
            }

            match character {
                '\\' => escaped = true,
                _ if character == quote_char => in_quotes = None,
                _ => current.push(character),
            }
            continue;
        }

        match character {
            '"' | '\'' => in_quotes = Some(character),
            _ if character.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(character),
        }
    }

    if in_quotes.is_some() || escaped {
        return Err(CommandError::UnterminatedQuotedValue);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

fn is_valid_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
}
