use crate::debugger::Debugger;
use crate::ui::command::CommandResult;

/// A method symbol pattern, `-[UIView setFrame:]` or any substring.
#[derive(Debug, Clone, PartialEq)]
pub struct Command(pub String);

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    /// Plant a one-shot breakpoint, returns the matched symbol name.
    pub fn handle(self, cmd: &Command) -> CommandResult<String> {
        Ok(self.dbg.plant_method_breakpoint(&cmd.0)?)
    }
}
