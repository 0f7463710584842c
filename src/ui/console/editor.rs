use crate::ui::command::parser::{
    ARG_COMMAND, BREAK_COMMAND, BREAK_COMMAND_SHORT, CONTINUE_COMMAND, CONTINUE_COMMAND_SHORT,
    HELP_COMMAND, HELP_COMMAND_SHORT, SELECTOR_COMMAND, SELF_COMMAND, VISUALIZE_POINT_COMMAND,
    VISUALIZE_RECT_COMMAND,
};
use crossterm::style::{Color, Stylize};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::MemHistory;
use rustyline::{CompletionType, Config, Context, Editor};
use rustyline_derive::{Helper, Hinter, Validator};
use std::borrow::Cow;
use std::borrow::Cow::{Borrowed, Owned};

struct CommandHint {
    short: Option<String>,
    long: String,
}

impl CommandHint {
    fn long(&self) -> String {
        self.long.clone()
    }

    fn display_with_short(&self) -> String {
        if let Some(ref short) = self.short {
            if self.long.starts_with(short) {
                format!(
                    "{}{}",
                    short.clone().bold().underlined(),
                    &self.long[short.len()..]
                )
            } else {
                format!("{}|{}", &self.long, short.clone().bold().underlined())
            }
        } else {
            self.long()
        }
    }
}

impl From<&str> for CommandHint {
    fn from(value: &str) -> Self {
        CommandHint {
            short: None,
            long: value.to_string(),
        }
    }
}

impl From<(&str, &str)> for CommandHint {
    fn from((short, long): (&str, &str)) -> Self {
        CommandHint {
            short: Some(short.to_string()),
            long: long.to_string(),
        }
    }
}

pub struct CommandCompleter {
    commands: Vec<CommandHint>,
}

impl CommandCompleter {
    fn new(commands: impl IntoIterator<Item = CommandHint>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let pairs = self
            .commands
            .iter()
            .filter(|&cmd| cmd.long.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.display_with_short(),
                replacement: cmd.long(),
            })
            .collect();
        Ok((0, pairs))
    }
}

#[derive(Helper, Hinter, Validator)]
pub struct RLHelper {
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    colored_prompt: String,
}

impl Completer for RLHelper {
    type Candidate = <CommandCompleter as Completer>::Candidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for RLHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(format!("{}", hint.with(Color::Grey)))
    }
}

pub fn create_editor(promt: &str) -> anyhow::Result<Editor<RLHelper, MemHistory>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let commands = [
        SELF_COMMAND.into(),
        SELECTOR_COMMAND.into(),
        ARG_COMMAND.into(),
        VISUALIZE_RECT_COMMAND.into(),
        VISUALIZE_POINT_COMMAND.into(),
        (BREAK_COMMAND_SHORT, BREAK_COMMAND).into(),
        (CONTINUE_COMMAND_SHORT, CONTINUE_COMMAND).into(),
        (HELP_COMMAND_SHORT, HELP_COMMAND).into(),
        ("q", "quit").into(),
    ];

    let h = RLHelper {
        completer: CommandCompleter::new(commands),
        hinter: HistoryHinter {},
        colored_prompt: format!("{}", promt.with(Color::DarkGreen)),
    };

    let mut editor = Editor::with_history(config, MemHistory::new())?;
    editor.set_helper(Some(h));
    Ok(editor)
}
