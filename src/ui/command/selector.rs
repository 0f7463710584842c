use crate::debugger::Debugger;
use crate::ui::command::CommandResult;

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    pub fn handle(self) -> CommandResult<String> {
        Ok(self.dbg.selector()?)
    }
}
