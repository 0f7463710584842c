use super::{argument, r#break, visualize, Command, CommandError, CommandResult};

pub const SELF_COMMAND: &str = "pself";
pub const SELECTOR_COMMAND: &str = "psel";
pub const ARG_COMMAND: &str = "parg";
pub const ARG_ALL_KEY: &str = "all";
pub const ARG_ALL_FLAG: &str = "--all";
pub const ARG_ALL_FLAG_SHORT: &str = "-a";
pub const VISUALIZE_RECT_COMMAND: &str = "vrect";
pub const VISUALIZE_POINT_COMMAND: &str = "vpoint";
pub const BREAK_COMMAND: &str = "break";
pub const BREAK_COMMAND_SHORT: &str = "b";
pub const CONTINUE_COMMAND: &str = "continue";
pub const CONTINUE_COMMAND_SHORT: &str = "c";
pub const HELP_COMMAND: &str = "help";
pub const HELP_COMMAND_SHORT: &str = "h";

/// Separator between the geometry and reference view operands of the
/// visualize commands, both of which are free-form host expressions.
pub const VISUALIZE_SEPARATOR: char = ';';

use chumsky::error::Rich;
use chumsky::prelude::{any, choice, end, just};
use chumsky::text::Char;
use chumsky::{extra, text, Boxed, Parser};

type Err<'a> = extra::Err<Rich<'a, char>>;

fn command<'a, I>(ctx: &'static str, inner: I) -> Boxed<'a, 'a, &'a str, Command, Err<'a>>
where
    I: chumsky::Parser<'a, &'a str, Command, Err<'a>> + 'a,
{
    inner.then_ignore(end()).labelled(ctx).boxed()
}

/// Two free-form expressions split on the first separator character.
fn expression_pair<'a>() -> impl chumsky::Parser<'a, &'a str, (String, String), Err<'a>> {
    any()
        .filter(|c: &char| c.to_char() != VISUALIZE_SEPARATOR)
        .repeated()
        .at_least(1)
        .to_slice()
        .then_ignore(just(VISUALIZE_SEPARATOR))
        .then(any().repeated().at_least(1).to_slice())
        .map(|(geometry, view): (&str, &str)| {
            (geometry.trim().to_string(), view.trim().to_string())
        })
}

impl Command {
    /// Parse input string into command.
    pub fn parse(input: &str) -> CommandResult<Command> {
        Self::parser()
            .parse(input)
            .into_result()
            .map_err(|e| CommandError::Parsing(e[0].to_string()))
    }

    fn parser<'a>() -> impl chumsky::Parser<'a, &'a str, Command, Err<'a>> {
        let op = |sym| just(sym).padded();
        let op2 = |full, short| op(full).or(op(short));

        let print_receiver = op(SELF_COMMAND).to(Command::PrintReceiver);
        let print_selector = op(SELECTOR_COMMAND).to(Command::PrintSelector);

        let arg_all = op(ARG_COMMAND)
            .ignore_then(choice((
                op(ARG_ALL_KEY),
                op(ARG_ALL_FLAG),
                op(ARG_ALL_FLAG_SHORT),
            )))
            .to(Command::PrintArgument(argument::Command::All));
        let arg_one = op(ARG_COMMAND)
            .ignore_then(text::int(10).from_str().unwrapped().padded())
            .then(any().repeated().at_least(1).to_slice().or_not())
            .map(|(index, type_name): (usize, Option<&str>)| {
                Command::PrintArgument(argument::Command::One {
                    index,
                    type_name: type_name
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty()),
                })
            });
        // a bare `parg` reads the first argument, like the original command default
        let arg_first = op(ARG_COMMAND).to(Command::PrintArgument(argument::Command::One {
            index: 0,
            type_name: None,
        }));
        let print_argument = choice((arg_all, arg_one, arg_first)).boxed();

        let visualize_rect = op(VISUALIZE_RECT_COMMAND)
            .ignore_then(expression_pair())
            .map(|(rect, view)| Command::Visualize(visualize::Command::Rect { rect, view }))
            .boxed();
        let visualize_point = op(VISUALIZE_POINT_COMMAND)
            .ignore_then(expression_pair())
            .map(|(point, view)| Command::Visualize(visualize::Command::Point { point, view }))
            .boxed();

        let r#break = op2(BREAK_COMMAND, BREAK_COMMAND_SHORT)
            .ignore_then(any().repeated().at_least(1).to_slice())
            .map(|pattern: &str| Command::Breakpoint(r#break::Command(pattern.trim().to_string())))
            .boxed();

        let r#continue = op2(CONTINUE_COMMAND, CONTINUE_COMMAND_SHORT).to(Command::Continue);

        let help = op2(HELP_COMMAND, HELP_COMMAND_SHORT)
            .ignore_then(text::ident().or_not())
            .map(|s| Command::Help {
                command: s.map(ToOwned::to_owned),
                reason: None,
            })
            .padded()
            .boxed();

        choice((
            command(SELF_COMMAND, print_receiver),
            command(SELECTOR_COMMAND, print_selector),
            command(ARG_COMMAND, print_argument),
            command(VISUALIZE_RECT_COMMAND, visualize_rect),
            command(VISUALIZE_POINT_COMMAND, visualize_point),
            command(BREAK_COMMAND, r#break),
            command(CONTINUE_COMMAND, r#continue),
            command(HELP_COMMAND, help),
        ))
        .map_err(|e| {
            let span = e.span();
            if span.start == 0 && span.end == 0 {
                Rich::custom(*e.span(), "type help for list of commands")
            } else {
                e
            }
        })
    }
}

#[test]
fn test_parser() {
    struct TestCase {
        inputs: Vec<&'static str>,
        command_matcher: fn(result: CommandResult<Command>),
    }
    let cases = vec![
        TestCase {
            inputs: vec!["pself", "  pself "],
            command_matcher: |result| {
                assert!(matches!(result.unwrap(), Command::PrintReceiver));
            },
        },
        TestCase {
            inputs: vec!["psel"],
            command_matcher: |result| {
                assert!(matches!(result.unwrap(), Command::PrintSelector));
            },
        },
        TestCase {
            inputs: vec!["pselx", "pselfs"],
            command_matcher: |result| assert!(result.is_err()),
        },
        TestCase {
            inputs: vec!["parg"],
            command_matcher: |result| {
                assert!(matches!(
                    result.unwrap(),
                    Command::PrintArgument(argument::Command::One {
                        index: 0,
                        type_name: None,
                    })
                ));
            },
        },
        TestCase {
            inputs: vec!["parg 2", " parg  2 "],
            command_matcher: |result| {
                assert!(matches!(
                    result.unwrap(),
                    Command::PrintArgument(argument::Command::One {
                        index: 2,
                        type_name: None,
                    })
                ));
            },
        },
        TestCase {
            inputs: vec!["parg 1 CGRect"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::PrintArgument(argument::Command::One {
                        index: 1,
                        type_name: Some("CGRect".to_string()),
                    })
                );
            },
        },
        TestCase {
            inputs: vec!["parg 0 unsigned long long"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::PrintArgument(argument::Command::One {
                        index: 0,
                        type_name: Some("unsigned long long".to_string()),
                    })
                );
            },
        },
        TestCase {
            inputs: vec!["parg all", "parg --all", "parg -a"],
            command_matcher: |result| {
                assert!(matches!(
                    result.unwrap(),
                    Command::PrintArgument(argument::Command::All)
                ));
            },
        },
        TestCase {
            inputs: vec!["parg x"],
            command_matcher: |result| assert!(result.is_err()),
        },
        TestCase {
            inputs: vec!["vrect CGRectMake(0, 0, 10, 10) ; self.view"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::Visualize(visualize::Command::Rect {
                        rect: "CGRectMake(0, 0, 10, 10)".to_string(),
                        view: "self.view".to_string(),
                    })
                );
            },
        },
        TestCase {
            inputs: vec!["vpoint CGPointMake(66, 42);[[UIApplication sharedApplication] keyWindow]"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::Visualize(visualize::Command::Point {
                        point: "CGPointMake(66, 42)".to_string(),
                        view: "[[UIApplication sharedApplication] keyWindow]".to_string(),
                    })
                );
            },
        },
        TestCase {
            inputs: vec!["vrect CGRectMake(0, 0, 10, 10)"],
            command_matcher: |result| assert!(result.is_err()),
        },
        TestCase {
            inputs: vec!["break -[UIView setFrame:]", "b -[UIView setFrame:]"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::Breakpoint(r#break::Command("-[UIView setFrame:]".to_string()))
                );
            },
        },
        TestCase {
            inputs: vec!["break"],
            command_matcher: |result| assert!(result.is_err()),
        },
        TestCase {
            inputs: vec!["continue", "c"],
            command_matcher: |result| {
                assert!(matches!(result.unwrap(), Command::Continue));
            },
        },
        TestCase {
            inputs: vec!["help", "h"],
            command_matcher: |result| {
                assert!(matches!(
                    result.unwrap(),
                    Command::Help {
                        command: None,
                        reason: None,
                    }
                ));
            },
        },
        TestCase {
            inputs: vec!["help parg", "h parg"],
            command_matcher: |result| {
                let cmd = result.unwrap();
                assert_eq!(
                    cmd,
                    Command::Help {
                        command: Some("parg".to_string()),
                        reason: None,
                    }
                );
            },
        },
        TestCase {
            inputs: vec!["das"],
            command_matcher: |result| assert!(result.is_err()),
        },
        TestCase {
            inputs: vec![""],
            command_matcher: |result| assert!(result.is_err()),
        },
    ];

    for tc in cases {
        for input in tc.inputs {
            (tc.command_matcher)(Command::parse(input));
        }
    }
}
