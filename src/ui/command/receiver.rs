use crate::debugger::Debugger;
use crate::ui::command::CommandResult;

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    /// Object description of `self`, if the host can produce one.
    pub fn handle(self) -> CommandResult<Option<String>> {
        Ok(self.dbg.receiver_description()?)
    }
}
