//! Calling convention tables for a method preamble.
//!
//! At the first instruction of an Objective-C method the implicit
//! receiver and selector occupy the first two integer argument slots of
//! the platform convention, explicit parameters the slots after them.
//! This module maps an argument to its slot and renders the slot as a
//! host debugger expression, it never reads the target itself.

use crate::debugger::arch::Architecture;
use crate::debugger::error::Error;

/// An implicit or explicit argument of the intercepted method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    /// Implicit `self`, first integer argument slot.
    ReceiverSelf,
    /// Implicit `_cmd`, second integer argument slot.
    SelectorArgument,
    /// Explicit parameter with a zero based index.
    ExplicitParameter(usize),
}

/// Explicit parameter registers of the System V AMD64 convention,
/// after `rdi`/`rsi` are burned by the implicit pair.
const X86_64_PARAMETER_REGISTERS: [&str; 4] = ["rdx", "rcx", "r8", "r9"];

/// Highest addressable explicit parameter index per register convention.
const ARM64_PARAMETER_LIMIT: usize = 5;
const ARM32_PARAMETER_LIMIT: usize = 3;

/// i386 pushes arguments right to left, return address and the implicit
/// pair sit below, so the first explicit parameter starts at `$esp+12`.
const I386_PARAMETER_BASE_OFFSET: usize = 12;
const I386_WORD_SIZE: usize = 4;

/// Storage of a single argument at function entry time.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Register(String),
    Stack { pointer: &'static str, offset: usize },
}

impl Slot {
    /// Render the slot as a host expression reading the argument as `type_name`.
    fn render(&self, type_name: &str) -> String {
        match self {
            Slot::Register(name) => format!("({type_name})${name}"),
            Slot::Stack { pointer, offset } => {
                format!("*({type_name}*)(${pointer}+{offset})")
            }
        }
    }
}

fn slot_of(role: ArgumentRole, arch: Architecture) -> Result<Slot, Error> {
    let register = |name: &str| Slot::Register(name.to_string());

    match role {
        ArgumentRole::ReceiverSelf => Ok(match arch {
            Architecture::I386 => Slot::Stack {
                pointer: "esp",
                offset: 4,
            },
            Architecture::X86_64 => register("rdi"),
            Architecture::Arm64 => register("x0"),
            Architecture::Arm32 => register("r0"),
        }),
        ArgumentRole::SelectorArgument => Ok(match arch {
            Architecture::I386 => Slot::Stack {
                pointer: "esp",
                offset: 8,
            },
            Architecture::X86_64 => register("rsi"),
            Architecture::Arm64 => register("x1"),
            Architecture::Arm32 => register("r1"),
        }),
        ArgumentRole::ExplicitParameter(index) => match arch {
            Architecture::I386 => Ok(Slot::Stack {
                pointer: "esp",
                offset: I386_PARAMETER_BASE_OFFSET + index * I386_WORD_SIZE,
            }),
            Architecture::X86_64 => X86_64_PARAMETER_REGISTERS
                .get(index)
                .map(|name| register(name))
                .ok_or(Error::UnsupportedIndex {
                    index,
                    limit: X86_64_PARAMETER_REGISTERS.len() - 1,
                    arch,
                }),
            Architecture::Arm64 => {
                if index > ARM64_PARAMETER_LIMIT {
                    return Err(Error::UnsupportedIndex {
                        index,
                        limit: ARM64_PARAMETER_LIMIT,
                        arch,
                    });
                }
                Ok(register(&format!("x{}", index + 2)))
            }
            Architecture::Arm32 => {
                if index > ARM32_PARAMETER_LIMIT {
                    return Err(Error::UnsupportedIndex {
                        index,
                        limit: ARM32_PARAMETER_LIMIT,
                        arch,
                    });
                }
                Ok(register(&format!("r{}", index + 2)))
            }
        },
    }
}

/// Build a host expression that reads an argument of the current method
/// as `type_name`, valid while the target is stopped at the preamble.
/// The expression is data, evaluation happens in the host debugger.
pub fn location_of(
    role: ArgumentRole,
    arch: Architecture,
    type_name: &str,
) -> Result<String, Error> {
    slot_of(role, arch).map(|slot| slot.render(type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugger::arch::Architecture::*;

    #[test]
    fn test_implicit_argument_locations() {
        struct TestCase {
            role: ArgumentRole,
            arch: Architecture,
            type_name: &'static str,
            expected: &'static str,
        }
        let cases = [
            TestCase {
                role: ArgumentRole::ReceiverSelf,
                arch: I386,
                type_name: "id",
                expected: "*(id*)($esp+4)",
            },
            TestCase {
                role: ArgumentRole::ReceiverSelf,
                arch: X86_64,
                type_name: "id",
                expected: "(id)$rdi",
            },
            TestCase {
                role: ArgumentRole::ReceiverSelf,
                arch: Arm64,
                type_name: "id",
                expected: "(id)$x0",
            },
            TestCase {
                role: ArgumentRole::ReceiverSelf,
                arch: Arm32,
                type_name: "id",
                expected: "(id)$r0",
            },
            TestCase {
                role: ArgumentRole::SelectorArgument,
                arch: I386,
                type_name: "SEL",
                expected: "*(SEL*)($esp+8)",
            },
            TestCase {
                role: ArgumentRole::SelectorArgument,
                arch: X86_64,
                type_name: "SEL",
                expected: "(SEL)$rsi",
            },
            TestCase {
                role: ArgumentRole::SelectorArgument,
                arch: Arm64,
                type_name: "SEL",
                expected: "(SEL)$x1",
            },
            TestCase {
                role: ArgumentRole::SelectorArgument,
                arch: Arm32,
                type_name: "SEL",
                expected: "(SEL)$r1",
            },
        ];

        for tc in cases {
            let location = location_of(tc.role, tc.arch, tc.type_name).unwrap();
            assert_eq!(location, tc.expected);
        }
    }

    #[test]
    fn test_explicit_parameter_locations() {
        struct TestCase {
            arch: Architecture,
            index: usize,
            expected: &'static str,
        }
        let cases = [
            TestCase {
                arch: I386,
                index: 0,
                expected: "*(CGRect*)($esp+12)",
            },
            TestCase {
                arch: I386,
                index: 3,
                expected: "*(CGRect*)($esp+24)",
            },
            // stack convention is unbounded by register count
            TestCase {
                arch: I386,
                index: 9,
                expected: "*(CGRect*)($esp+48)",
            },
            TestCase {
                arch: X86_64,
                index: 0,
                expected: "(CGRect)$rdx",
            },
            TestCase {
                arch: X86_64,
                index: 3,
                expected: "(CGRect)$r9",
            },
            TestCase {
                arch: Arm64,
                index: 0,
                expected: "(CGRect)$x2",
            },
            TestCase {
                arch: Arm64,
                index: 5,
                expected: "(CGRect)$x7",
            },
            TestCase {
                arch: Arm32,
                index: 0,
                expected: "(CGRect)$r2",
            },
            TestCase {
                arch: Arm32,
                index: 3,
                expected: "(CGRect)$r5",
            },
        ];

        for tc in cases {
            let location =
                location_of(ArgumentRole::ExplicitParameter(tc.index), tc.arch, "CGRect").unwrap();
            assert_eq!(location, tc.expected);
        }
    }

    #[test]
    fn test_register_conventions_reject_high_indexes() {
        struct TestCase {
            arch: Architecture,
            index: usize,
            limit: usize,
        }
        let cases = [
            TestCase {
                arch: X86_64,
                index: 4,
                limit: 3,
            },
            TestCase {
                arch: Arm64,
                index: 6,
                limit: 5,
            },
            TestCase {
                arch: Arm32,
                index: 4,
                limit: 3,
            },
        ];

        for tc in cases {
            let result = location_of(ArgumentRole::ExplicitParameter(tc.index), tc.arch, "id");
            assert!(matches!(
                result,
                Err(Error::UnsupportedIndex { index, limit, arch })
                    if index == tc.index && limit == tc.limit && arch == tc.arch
            ));
        }
    }
}
