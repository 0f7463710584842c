use crate::debugger::{Debugger, Error};
use crate::ui::command::{
    argument, r#break, r#continue, receiver, selector, visualize, Command, CommandError,
};
use crate::ui::console::editor::{create_editor, RLHelper};
use crate::ui::console::help::help_for_command;
use crate::ui::console::print::style::{
    AddressView, DescriptionView, ErrorView, FunctionNameView, SelectorView, TypeNameView,
};
use crate::ui::console::print::ConsolePrinter;
use rustyline::error::ReadlineError;
use rustyline::history::MemHistory;
use rustyline::Editor;

mod editor;
mod help;
pub mod print;

const WELCOME_TEXT: &str = r#"
MsgTap greets
Plant a breakpoint on a method (`break`), `continue` into its preamble,
then inspect it. Type `help` for the command list.
"#;
const PROMT: &str = "(mtap) ";

type MTEditor = Editor<RLHelper, MemHistory>;

pub struct AppBuilder;

impl AppBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(self, debugger: Debugger) -> anyhow::Result<TerminalApplication> {
        let editor = create_editor(PROMT)?;
        Ok(TerminalApplication {
            debugger,
            editor,
            printer: ConsolePrinter,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TerminalApplication {
    debugger: Debugger,
    editor: MTEditor,
    printer: ConsolePrinter,
}

impl TerminalApplication {
    /// One command runs to completion before the next is read, the
    /// session is cooperative with the host debugger's own state.
    pub fn run(mut self) -> anyhow::Result<()> {
        println!("{WELCOME_TEXT}");

        loop {
            match self.editor.readline(PROMT) {
                Ok(input) => {
                    let input = input.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if input == "q" || input == "quit" {
                        break;
                    }

                    _ = self.editor.add_history_entry(input);
                    if let Err(e) = self.handle_command(input) {
                        match e {
                            CommandError::Parsing(_) => {
                                self.printer.print(ErrorView::from(e));
                            }
                            CommandError::Handle(ref err) if err.is_fatal() => {
                                self.printer
                                    .print(ErrorView::from(format!("fatal error: {e:#}")));
                                return Err(e.into());
                            }
                            CommandError::Handle(_) => {
                                self.printer.print(ErrorView::from(format!("error: {e:#}")));
                            }
                        }
                    }
                }
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
                Err(err) => {
                    self.printer.print(ErrorView::from(format!("error: {err:#}")));
                    break;
                }
            }
        }

        if let Err(e) = self.debugger.detach() {
            log::warn!(target: "session", "detach: {e:#}");
        }
        Ok(())
    }

    fn handle_command(&mut self, cmd: &str) -> Result<(), CommandError> {
        match Command::parse(cmd)? {
            Command::PrintReceiver => {
                let description = receiver::Handler::new(&self.debugger).handle()?;
                self.printer.print(DescriptionView::from(description));
            }
            Command::PrintSelector => {
                // an unknown architecture aborts psel with a dedicated
                // message instead of a generic error
                match selector::Handler::new(&self.debugger).handle() {
                    Ok(sel) => self.printer.print(SelectorView::from(sel)),
                    Err(CommandError::Handle(Error::UnsupportedArchitecture(arch))) => {
                        self.printer.print(format!(
                            "psel is not implemented for the {arch} architecture."
                        ));
                    }
                    Err(e) => return Err(e),
                }
            }
            Command::PrintArgument(arg_cmd) => {
                let arguments = argument::Handler::new(&self.debugger).handle(&arg_cmd)?;
                match arg_cmd {
                    argument::Command::All => {
                        let last = arguments.len().saturating_sub(1);
                        for (position, arg) in arguments.iter().enumerate() {
                            self.printer.print(format!(
                                "---------- ARG #{} ({}) ----------",
                                arg.index,
                                TypeNameView::from(&arg.type_name)
                            ));
                            self.printer
                                .print(DescriptionView::from(arg.rendition.clone()));
                            if position < last {
                                self.printer.print("");
                            }
                        }
                    }
                    argument::Command::One { .. } => {
                        for arg in arguments {
                            self.printer.print(DescriptionView::from(arg.rendition));
                        }
                    }
                }
            }
            Command::Visualize(vis_cmd) => {
                let visualized = visualize::Handler::new(&self.debugger).handle(&vis_cmd)?;
                self.printer.print(format!(
                    "Visualized {} using {}",
                    visualized.geometry,
                    AddressView::from(visualized.overlay)
                ));
            }
            Command::Breakpoint(brkpt_cmd) => {
                let symbol = r#break::Handler::new(&self.debugger).handle(&brkpt_cmd)?;
                self.printer.print(format!(
                    "One-shot breakpoint at {}",
                    FunctionNameView::from(symbol)
                ));
            }
            Command::Continue => {
                r#continue::Handler::new(&self.debugger).handle()?;
                self.printer.print("Target stopped");
            }
            Command::Help { command, reason } => {
                if let Some(reason) = reason {
                    self.printer.print(reason);
                }
                self.printer.print(help_for_command(command.as_deref()));
            }
        }

        Ok(())
    }
}
