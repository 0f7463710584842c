use std::fmt::Display;

/// Prints inspector output to stdout. The console loop is synchronous,
/// so plain stdout is enough.
pub struct ConsolePrinter;

impl ConsolePrinter {
    pub fn print(&self, msg: impl Display) {
        println!("{msg}")
    }
}

pub mod style {
    use crossterm::style::{Color, Stylize};
    use std::fmt::{Display, Formatter};

    const UNKNOWN_PLACEHOLDER: &str = "???";

    struct View<T: Display> {
        inner: Option<T>,
        color: Color,
    }

    impl<T: Display> Display for View<T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            let value = self
                .inner
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string());

            f.write_fmt(format_args!("{}", value.with(self.color)))
        }
    }

    /// Construct structure declaration to display data of the same type
    /// (addresses, type names, etc.).
    macro_rules! view_struct {
        ($name: ident, $color: expr) => {
            pub struct $name<T: Display>(View<T>);

            impl<T: Display> From<T> for $name<T> {
                fn from(value: T) -> Self {
                    Self(View {
                        inner: Some(value),
                        color: $color,
                    })
                }
            }

            impl<T: Display> From<Option<T>> for $name<T> {
                fn from(value: Option<T>) -> Self {
                    Self(View {
                        inner: value,
                        color: $color,
                    })
                }
            }

            impl<T: Display> Display for $name<T> {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    self.0.fmt(f)
                }
            }
        };
    }

    view_struct!(AddressView, Color::Blue);
    view_struct!(FunctionNameView, Color::Yellow);
    view_struct!(TypeNameView, Color::Green);
    view_struct!(SelectorView, Color::Magenta);
    view_struct!(DescriptionView, Color::Reset);
    view_struct!(ErrorView, Color::Red);
}
