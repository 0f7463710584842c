use crate::debugger::error::Error;

/// A single value readout from the host debugger.
///
/// Each rendition is optional, the host provides what the value's type
/// affords: raw register contents for scalars, a quoted summary for
/// selectors and strings, an object description for `id`.
#[derive(Debug, Clone, Default)]
pub struct Evaluated {
    pub value: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

/// Fixed contract with the host debugger session.
///
/// Process state is observed and mutated exclusively through
/// [`Session::evaluate`]; the remaining methods read target metadata or
/// drive execution between stops. The seam exists so command handlers
/// can run against a scripted session in tests.
pub trait Session {
    /// Target triple of the attached process (`arm64-apple-ios` etc).
    fn triple(&self) -> Result<String, Error>;

    /// Evaluate an expression on the currently stopped frame.
    fn evaluate(&self, expr: &str) -> Result<Evaluated, Error>;

    /// Plant a one-shot breakpoint at the first symbol whose name
    /// contains `pattern`, returning the matched symbol name.
    fn plant_oneshot(&self, pattern: &str) -> Result<String, Error>;

    /// Resume the target and block until the next stop.
    fn resume(&self) -> Result<(), Error>;

    /// Release the target and let it run on.
    fn detach(&mut self) -> Result<(), Error>;
}
