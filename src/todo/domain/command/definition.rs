//! Declarative command schema and resolution into typed commands.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{CommandError, CommandInvocation, TodoCommand};
use crate::todo::domain::TaskContent;

/// String parameter accepted by a subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the parameter is required.
    pub required: bool,
}

impl CommandParameterSpec {
    /// Creates a parameter specification.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            description: description.into(),
            required,
        }
    }
}

/// Subcommand declared by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandDefinition {
    /// Subcommand name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Parameter definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<CommandParameterSpec>,
}

impl SubcommandDefinition {
    /// Creates a subcommand definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter specification.
    #[must_use]
    pub fn with_parameter(mut self, parameter: CommandParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Checks raw parameters against the declared ones.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when a parameter is unknown or a required one
    /// is missing.
    pub fn validate_parameters(
        &self,
        provided: &BTreeMap<String, String>,
    ) -> Result<(), CommandError> {
        if let Some(unknown) = provided
            .keys()
            .find(|key| !self.parameters.iter().any(|parameter| parameter.name == **key))
        {
            return Err(CommandError::UnknownParameter {
                subcommand: self.name.clone(),
                parameter: unknown.clone(),
            });
        }

        if let Some(missing) = self
            .parameters
            .iter()
            .find(|parameter| parameter.required && !provided.contains_key(&parameter.name))
        {
            return Err(CommandError::MissingRequiredParameter {
                subcommand: self.name.clone(),
                parameter: missing.name.clone(),
            });
        }

        Ok(())
    }
}

/// Command schema as registered with the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command name without the leading slash.
    pub command: String,
    /// Human-readable description.
    pub description: String,
    /// Declared subcommands.
    pub subcommands: Vec<SubcommandDefinition>,
}

impl CommandDefinition {
    /// Name of the built-in TODO command.
    pub const TODO_COMMAND: &'static str = "todo";

    /// Creates an empty command definition.
    #[must_use]
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into().to_ascii_lowercase(),
            description: description.into(),
            subcommands: Vec::new(),
        }
    }

    /// Adds a subcommand.
    #[must_use]
    pub fn with_subcommand(mut self, subcommand: SubcommandDefinition) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Returns the built-in `/todo` schema with `add`, `list` and `reset`.
    #[must_use]
    pub fn todo() -> Self {
        Self::new(Self::TODO_COMMAND, "Manage TODO items")
            .with_subcommand(
                SubcommandDefinition::new("add", "Add a new task").with_parameter(
                    CommandParameterSpec::new("task", "Task description", true),
                ),
            )
            .with_subcommand(SubcommandDefinition::new(
                "list",
                "Show every task in this channel",
            ))
            .with_subcommand(SubcommandDefinition::new(
                "reset",
                "Remove every task from this channel",
            ))
    }

    /// Finds a subcommand by name.
    #[must_use]
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandDefinition> {
        self.subcommands
            .iter()
            .find(|subcommand| subcommand.name.eq_ignore_ascii_case(name))
    }

    /// Checks that subcommand and parameter names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::DuplicateParameter`] naming the first
    /// duplicated subcommand or parameter.
    pub fn validate_schema(&self) -> Result<(), CommandError> {
        let mut subcommand_names = HashSet::new();
        for subcommand in &self.subcommands {
            if !subcommand_names.insert(subcommand.name.as_str()) {
                return Err(CommandError::DuplicateParameter(subcommand.name.clone()));
            }
            let mut parameter_names = HashSet::new();
            for parameter in &subcommand.parameters {
                if !parameter_names.insert(parameter.name.as_str()) {
                    return Err(CommandError::DuplicateParameter(parameter.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Parses raw input and resolves it against this schema.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when parsing, validation, or resolution fails.
    pub fn parse(&self, raw_input: &str) -> Result<TodoCommand, CommandError> {
        let invocation = CommandInvocation::parse(raw_input)?;
        self.resolve(&invocation)
    }

    /// Resolves a parsed invocation into a typed command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the command or subcommand is unknown,
    /// parameters do not match the schema, or the task text is invalid.
    pub fn resolve(&self, invocation: &CommandInvocation) -> Result<TodoCommand, CommandError> {
        if invocation.command() != self.command {
            return Err(CommandError::UnknownCommand(invocation.command().to_owned()));
        }

        let subcommand_name =
            invocation
                .subcommand()
                .ok_or_else(|| CommandError::MissingSubcommand {
                    command: self.command.clone(),
                })?;
        let subcommand = self.find_subcommand(subcommand_name).ok_or_else(|| {
            CommandError::UnknownSubcommand {
                command: self.command.clone(),
                subcommand: subcommand_name.to_owned(),
            }
        })?;
        subcommand.validate_parameters(invocation.parameters())?;

        match subcommand.name.as_str() {
            "add" => {
                let raw_task = invocation.parameters().get("task").ok_or_else(|| {
                    CommandError::MissingRequiredParameter {
                        subcommand: subcommand.name.clone(),
                        parameter: "task".to_owned(),
                    }
                })?;
                Ok(TodoCommand::Add {
                    task: TaskContent::new(raw_task.as_str())?,
                })
            }
            "list" => Ok(TodoCommand::List),
            "reset" => Ok(TodoCommand::Reset),
            other => Err(CommandError::UnknownSubcommand {
                command: self.command.clone(),
                subcommand: other.to_owned(),
            }),
        }
    }
}
