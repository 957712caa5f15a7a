//! `/todo` command schema and parsing.

mod definition;
mod error;
mod parser;
mod todo;

pub use definition::{CommandDefinition, CommandParameterSpec, SubcommandDefinition};
pub use error::CommandError;
pub use parser::CommandInvocation;
pub use todo::TodoCommand;
