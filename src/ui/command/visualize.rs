use crate::debugger::Debugger;
use crate::ui::command::CommandResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Overlay a rect given in the coordinate system of a reference view.
    Rect { rect: String, view: String },
    /// Overlay a marker on a point given in the coordinate system of a
    /// reference view.
    Point { point: String, view: String },
}

/// What was drawn and the overlay it lives in, for the final report.
pub struct Visualized {
    pub geometry: String,
    pub overlay: String,
}

pub struct Handler<'a> {
    dbg: &'a Debugger,
}

impl<'a> Handler<'a> {
    pub fn new(debugger: &'a Debugger) -> Self {
        Self { dbg: debugger }
    }

    pub fn handle(self, cmd: &Command) -> CommandResult<Visualized> {
        match cmd {
            Command::Rect { rect, view } => {
                let overlay = self.dbg.visualize_rect(rect, view)?;
                Ok(Visualized {
                    geometry: rect.clone(),
                    overlay,
                })
            }
            Command::Point { point, view } => {
                let overlay = self.dbg.visualize_point(point, view)?;
                Ok(Visualized {
                    geometry: point.clone(),
                    overlay,
                })
            }
        }
    }
}
