use crate::ui::command::parser;

pub const HELP: &str = r#"
Available commands:

pself                                   -- print the receiver of the current method
psel                                    -- print the selector of the current method
parg <index> <type>|all                 -- print explicit arguments of the current method
vrect <rect> ; <view>                   -- visualize a CGRect in a view
vpoint <point> ; <view>                 -- visualize a CGPoint in a view
b, break <method>                       -- plant a one-shot breakpoint on a method symbol
c, continue                             -- resume the target until the next stop
h, help <>|<command>                    -- show help
q, quit                                 -- detach from the target and exit MsgTap
"#;

pub const HELP_PSELF: &str = "\
\x1b[32;1mpself\x1b[0m
Print the value of `self` while the target is stopped in a method preamble.
The receiver is read from its calling convention slot and shown through its
object description.
";

pub const HELP_PSEL: &str = "\
\x1b[32;1mpsel\x1b[0m
Print the selector of the method the target is stopped in. Only usable in a
method preamble, before the method body has clobbered its argument slots.
";

pub const HELP_PARG: &str = "\
\x1b[32;1mparg\x1b[0m
Print an explicit argument of the method the target is stopped in. The first
argument is at index 0.

Available subcomands:
parg - print argument at index 0
parg <index> - print argument at index, typed from the runtime method signature
parg <index> <type> - print argument at index with an explicit type, e.g. CGRect or SEL
parg all - print all arguments (flag spellings -a and --all are accepted)

When no type is given the runtime signature is queried for the encoded type of
the argument. Encodings the decoder cannot name (pointer to pointer among them)
abort the command, pass an explicit type instead.
";

pub const HELP_VRECT: &str = "\
\x1b[32;1mvrect\x1b[0m
Draw a bordered overlay over a rect inside the running application.

vrect <rect> ; <view>

<rect> is an expression producing a CGRect, <view> an expression producing the
UIView whose coordinate system the rect is specified in. The operands are
separated by `;` since both are free-form expressions.

Example:
vrect CGRectMake(0, 0, 50, 50) ; self.view
";

pub const HELP_VPOINT: &str = "\
\x1b[32;1mvpoint\x1b[0m
Draw a small marker centered on a point inside the running application.

vpoint <point> ; <view>

<point> is an expression producing a CGPoint, <view> an expression producing
the UIView whose coordinate system the point is specified in.

Example:
vpoint CGPointMake(66, 42) ; self.view
";

pub const HELP_BREAK: &str = "\
\x1b[32;1mb, break\x1b[0m
Plant a one-shot breakpoint at the first symbol whose name contains the given
pattern, then use `continue` to run into it.

Examples:
break -[UIViewController viewDidAppear:]
b setFrame:
";

pub const HELP_CONTINUE: &str = "\
\x1b[32;1mc, continue\x1b[0m
Resume the target. The command returns on the next stop, usually a breakpoint
planted with `break`.
";

pub const HELP_QUIT: &str = "\
\x1b[32;1mq, quit\x1b[0m
Detach from the target, letting it run on, and exit MsgTap.
";

pub fn help_for_command(command: Option<&str>) -> &str {
    match command {
        None => HELP,
        Some(parser::SELF_COMMAND) => HELP_PSELF,
        Some(parser::SELECTOR_COMMAND) => HELP_PSEL,
        Some(parser::ARG_COMMAND) => HELP_PARG,
        Some(parser::VISUALIZE_RECT_COMMAND) => HELP_VRECT,
        Some(parser::VISUALIZE_POINT_COMMAND) => HELP_VPOINT,
        Some(parser::BREAK_COMMAND) | Some(parser::BREAK_COMMAND_SHORT) => HELP_BREAK,
        Some(parser::CONTINUE_COMMAND) | Some(parser::CONTINUE_COMMAND_SHORT) => HELP_CONTINUE,
        Some("q") | Some("quit") => HELP_QUIT,
        _ => "unknown command",
    }
}
