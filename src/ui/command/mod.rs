//! An interface to the preamble inspector.
//!
//! Contains commands and corresponding command handlers. Command is a
//! request to the inspector that defines an action and a list of input
//! arguments. A command handler validates the command, decides what
//! exactly the debugger must do and returns the result of it.

pub mod argument;
pub mod r#break;
pub mod r#continue;
pub mod parser;
pub mod receiver;
pub mod selector;
pub mod visualize;

use crate::debugger::Error;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Parsing(String),
    #[error(transparent)]
    Handle(#[from] Error),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// External commands that can be processed by the inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PrintReceiver,
    PrintSelector,
    PrintArgument(argument::Command),
    Visualize(visualize::Command),
    Breakpoint(r#break::Command),
    Continue,
    Help {
        command: Option<String>,
        reason: Option<String>,
    },
}
