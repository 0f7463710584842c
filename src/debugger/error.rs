use crate::debugger::arch::Architecture;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- preamble decoding errors ----------------------------------
    #[error("parameter index {index} out of bounds, the current method accepts {arity} argument(s)")]
    IndexOutOfRange { index: usize, arity: usize },
    #[error("no register or stack mapping known for architecture `{0}`")]
    UnsupportedArchitecture(String),
    #[error("{arch} calling convention cannot address argument at index {index} (maximum is {limit})")]
    UnsupportedIndex {
        index: usize,
        limit: usize,
        arch: Architecture,
    },
    #[error("type encoding `{0}` is not decodable, pass an explicit type")]
    UnsupportedEncoding(String),
    #[error("the current method does not accept any arguments")]
    NoArguments,
    #[error("selector readout has no summary, is the target stopped at a method preamble?")]
    SelectorUnavailable,

    // --------------------------------- session errors --------------------------------------------
    #[error("expression `{expr}` evaluation error: {reason}")]
    Evaluation { expr: String, reason: String },
    #[error("no stopped frame in the target, plant a breakpoint and wait for a stop")]
    NoStoppedFrame,
    #[error("no symbol matched `{0}` in the target modules")]
    SymbolNotFound(String),
    #[error("symbol `{0}` has no resolvable address")]
    SymbolAddress(String),
    #[error("target resume error: {0}")]
    Resume(String),

    // --------------------------------- attach errors ---------------------------------------------
    #[error("attach a running process: {0}")]
    Attach(String),
    #[error("detach from process: {0}")]
    Detach(String),
}

impl Error {
    /// Return a hint to an interface - continue the session after error or stop whole process.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::IndexOutOfRange { .. } => false,
            Error::UnsupportedArchitecture(_) => false,
            Error::UnsupportedIndex { .. } => false,
            Error::UnsupportedEncoding(_) => false,
            Error::NoArguments => false,
            Error::SelectorUnavailable => false,
            Error::Evaluation { .. } => false,
            Error::NoStoppedFrame => false,
            Error::SymbolNotFound(_) => false,
            Error::SymbolAddress(_) => false,
            Error::Resume(_) => false,

            // currently fatal errors
            Error::Attach(_) => true,
            Error::Detach(_) => true,
        }
    }
}
