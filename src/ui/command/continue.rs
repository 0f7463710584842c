use crate::debugger::Debugger;
use crate::ui::command::CommandResult;

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    /// Resume the target, returns on the next stop.
    pub fn handle(self) -> CommandResult<()> {
        Ok(self.dbg.resume()?)
    }
}
