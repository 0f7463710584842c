use crate::debugger::{ArgumentValue, Debugger};
use crate::ui::command::CommandResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// One argument by index, with an optional explicit type that
    /// short-circuits the runtime signature query.
    One {
        index: usize,
        type_name: Option<String>,
    },
    /// Every argument the current selector accepts.
    All,
}

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

pub type ExecutionResult = Vec<ArgumentValue>;

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    pub fn handle(self, cmd: &Command) -> CommandResult<ExecutionResult> {
        match cmd {
            Command::One { index, type_name } => {
                let argument = self.dbg.argument(*index, type_name.as_deref())?;
                Ok(vec![argument])
            }
            Command::All => Ok(self.dbg.arguments()?),
        }
    }
}
