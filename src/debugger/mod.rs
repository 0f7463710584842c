//! Method preamble inspection over a host debugger session.
//!
//! [`Debugger`] is the facade command handlers talk to. It owns the
//! session, derives the calling convention from the target triple on
//! every call, composes host expressions out of preamble locations and
//! type names, and reads values back through the expression channel.

pub mod arch;
mod encoding;
pub mod error;
pub mod lldb;
mod preamble;
pub mod process;
mod session;

pub use error::Error;
pub use session::{Evaluated, Session};

use crate::debugger::arch::Architecture;
use crate::debugger::preamble::ArgumentRole;

/// One explicit argument of the intercepted method, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentValue {
    pub index: usize,
    pub type_name: String,
    /// Host rendition chosen by type: object description for `id`,
    /// summary for `SEL`, raw value otherwise. Absent when the host
    /// could not produce one.
    pub rendition: Option<String>,
}

pub struct Debugger {
    session: Box<dyn Session>,
}

impl Debugger {
    pub fn new(session: impl Session + 'static) -> Self {
        Self {
            session: Box::new(session),
        }
    }

    /// The architecture is session state owned by the host, re-read on
    /// every call instead of cached.
    fn architecture(&self) -> Result<Architecture, Error> {
        let triple = self.session.triple()?;
        Architecture::from_triple(&triple).ok_or_else(|| {
            Error::UnsupportedArchitecture(
                triple.split('-').next().unwrap_or_default().to_string(),
            )
        })
    }

    /// Object description of the method receiver (`pself`).
    pub fn receiver_description(&self) -> Result<Option<String>, Error> {
        let arch = self.architecture()?;
        let expr = preamble::location_of(ArgumentRole::ReceiverSelf, arch, "id")?;
        Ok(self.session.evaluate(&expr)?.description)
    }

    /// Selector of the intercepted method (`psel`), without the quotes
    /// the host wraps summaries in.
    pub fn selector(&self) -> Result<String, Error> {
        let arch = self.architecture()?;
        let expr = preamble::location_of(ArgumentRole::SelectorArgument, arch, "SEL")?;
        let summary = self
            .session
            .evaluate(&expr)?
            .summary
            .ok_or(Error::SelectorUnavailable)?;
        Ok(summary.trim_matches('"').to_string())
    }

    /// Read one explicit argument (`parg <index> [type]`).
    pub fn argument(
        &self,
        index: usize,
        explicit_type: Option<&str>,
    ) -> Result<ArgumentValue, Error> {
        let arch = self.architecture()?;
        let selector = self.selector()?;
        let arity = selector_arity(&selector);
        if arity == 0 {
            return Err(Error::NoArguments);
        }
        if index >= arity {
            return Err(Error::IndexOutOfRange { index, arity });
        }

        let type_name = self.argument_type(arch, &selector, index, explicit_type)?;
        self.read_argument(arch, index, type_name)
    }

    /// Read every explicit argument of the current method (`parg all`).
    pub fn arguments(&self) -> Result<Vec<ArgumentValue>, Error> {
        let arch = self.architecture()?;
        let selector = self.selector()?;
        let arity = selector_arity(&selector);
        if arity == 0 {
            return Err(Error::NoArguments);
        }

        (0..arity)
            .map(|index| {
                let type_name = self.argument_type(arch, &selector, index, None)?;
                self.read_argument(arch, index, type_name)
            })
            .collect()
    }

    /// Pick the display type: an explicit name wins, otherwise the
    /// runtime signature token is decoded. An undecodable token is
    /// surfaced so the caller can ask for an explicit type.
    fn argument_type(
        &self,
        arch: Architecture,
        selector: &str,
        index: usize,
        explicit_type: Option<&str>,
    ) -> Result<String, Error> {
        if let Some(type_name) = explicit_type {
            return Ok(type_name.to_string());
        }

        let receiver = preamble::location_of(ArgumentRole::ReceiverSelf, arch, "id")?;
        let token = self.encoded_type(&receiver, selector, index)?;
        encoding::display_type_name(&token).ok_or(Error::UnsupportedEncoding(token))
    }

    /// Ask the live runtime for the encoded type of one argument.
    /// Slots 0 and 1 of the signature hold the implicit pair, explicit
    /// parameters start at slot 2.
    fn encoded_type(
        &self,
        receiver_expr: &str,
        selector: &str,
        index: usize,
    ) -> Result<String, Error> {
        let expr = format!(
            "(const char *)[[{receiver_expr} methodSignatureForSelector:\
             (SEL)NSSelectorFromString(@\"{selector}\")] getArgumentTypeAtIndex:{}]",
            index + 2
        );
        let summary = self
            .session
            .evaluate(&expr)?
            .summary
            .ok_or_else(|| Error::Evaluation {
                expr,
                reason: "signature query produced no summary".to_string(),
            })?;
        Ok(summary.trim_matches('"').to_string())
    }

    fn read_argument(
        &self,
        arch: Architecture,
        index: usize,
        type_name: String,
    ) -> Result<ArgumentValue, Error> {
        let expr =
            preamble::location_of(ArgumentRole::ExplicitParameter(index), arch, &type_name)?;
        let evaluated = self.session.evaluate(&expr)?;
        let rendition = match type_name.as_str() {
            "id" => evaluated.description,
            "SEL" => evaluated.summary,
            _ => evaluated.value,
        };
        Ok(ArgumentValue {
            index,
            type_name,
            rendition,
        })
    }

    /// Draw a bordered overlay over `rect`, given in the coordinate
    /// system of `view`. Returns the overlay address.
    pub fn visualize_rect(&self, rect: &str, view: &str) -> Result<String, Error> {
        let ref_view = self.object_expression(&format!("(id)({view})"))?;
        let target_rect = format!(
            "(CGRect)[(UIView *){ref_view} convertRect:(CGRect)({rect}) \
             toView:(UIView *)[(UIView *){ref_view} window]]"
        );
        let overlay = self.object_expression(&format!(
            "(UIView *)[[UIView alloc] initWithFrame:{target_rect}]"
        ))?;
        self.mount_overlay(&ref_view, &overlay)?;
        Ok(overlay)
    }

    /// Draw a small marker centered on `point`, given in the coordinate
    /// system of `view`. Returns the overlay address.
    pub fn visualize_point(&self, point: &str, view: &str) -> Result<String, Error> {
        let ref_view = self.object_expression(&format!("(id)({view})"))?;
        let target_point = format!(
            "(CGPoint)[(UIView *){ref_view} convertPoint:(CGPoint)({point}) \
             toView:(UIView *)[(UIView *){ref_view} window]]"
        );
        let overlay = self.object_expression(
            "(UIView *)[[UIView alloc] initWithFrame:(CGRect)CGRectMake(0, 0, 4, 4)]",
        )?;
        self.session.evaluate(&format!(
            "(void)[(UIView *){overlay} setCenter:{target_point}]"
        ))?;
        self.mount_overlay(&ref_view, &overlay)?;
        Ok(overlay)
    }

    /// Attach the overlay to the window of the reference view and make
    /// it visible but inert. All mutation goes through plain
    /// expressions, no host helper commands are assumed.
    fn mount_overlay(&self, ref_view: &str, overlay: &str) -> Result<(), Error> {
        let mounting = [
            format!(
                "(void)[(UIView *)[(UIView *){ref_view} window] addSubview:(UIView *){overlay}]"
            ),
            format!("(void)[(UIView *){overlay} setUserInteractionEnabled:NO]"),
            format!("(void)[[(UIView *){overlay} layer] setBorderWidth:(CGFloat)2]"),
            format!(
                "(void)[[(UIView *){overlay} layer] setBorderColor:\
                 (CGColorRef)[(UIColor *)[UIColor redColor] CGColor]]"
            ),
            "(void)[CATransaction flush]".to_string(),
        ];
        for expr in mounting {
            self.session.evaluate(&expr)?;
        }
        Ok(())
    }

    /// Evaluate an expression expected to produce an object pointer and
    /// return its address rendition for reuse in later expressions.
    fn object_expression(&self, expr: &str) -> Result<String, Error> {
        self.session
            .evaluate(expr)?
            .value
            .ok_or_else(|| Error::Evaluation {
                expr: expr.to_string(),
                reason: "expression produced no addressable value".to_string(),
            })
    }

    /// Plant a one-shot breakpoint on a method symbol, returns the
    /// matched symbol name.
    pub fn plant_method_breakpoint(&self, pattern: &str) -> Result<String, Error> {
        self.session.plant_oneshot(pattern)
    }

    /// Resume the target until the next stop.
    pub fn resume(&self) -> Result<(), Error> {
        self.session.resume()
    }

    /// Release the target and let it run on.
    pub fn detach(&mut self) -> Result<(), Error> {
        self.session.detach()
    }
}

/// Number of explicit arguments, one per colon delimited segment.
fn selector_arity(selector: &str) -> usize {
    selector.matches(':').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TRIPLE: &str = "x86_64-apple-ios-simulator";
    const SELECTOR_READ: &str = "(SEL)$rsi";

    struct ScriptedSession {
        triple: &'static str,
        responses: HashMap<String, Evaluated>,
    }

    impl ScriptedSession {
        fn new(triple: &'static str) -> Self {
            Self {
                triple,
                responses: HashMap::new(),
            }
        }

        fn on(mut self, expr: impl Into<String>, evaluated: Evaluated) -> Self {
            self.responses.insert(expr.into(), evaluated);
            self
        }
    }

    impl Session for ScriptedSession {
        fn triple(&self) -> Result<String, Error> {
            Ok(self.triple.to_string())
        }

        fn evaluate(&self, expr: &str) -> Result<Evaluated, Error> {
            // void expressions evaluate to nothing, every other
            // expression must be scripted by the test
            if expr.starts_with("(void)") {
                return Ok(Evaluated::default());
            }
            self.responses
                .get(expr)
                .cloned()
                .ok_or_else(|| Error::Evaluation {
                    expr: expr.to_string(),
                    reason: "unexpected expression".to_string(),
                })
        }

        fn plant_oneshot(&self, pattern: &str) -> Result<String, Error> {
            Ok(pattern.to_string())
        }

        fn resume(&self) -> Result<(), Error> {
            Ok(())
        }

        fn detach(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    fn value(s: &str) -> Evaluated {
        Evaluated {
            value: Some(s.to_string()),
            ..Default::default()
        }
    }

    fn summary(s: &str) -> Evaluated {
        Evaluated {
            summary: Some(s.to_string()),
            ..Default::default()
        }
    }

    fn description(s: &str) -> Evaluated {
        Evaluated {
            description: Some(s.to_string()),
            ..Default::default()
        }
    }

    fn signature_query(selector: &str, index: usize) -> String {
        format!(
            "(const char *)[[(id)$rdi methodSignatureForSelector:\
             (SEL)NSSelectorFromString(@\"{selector}\")] getArgumentTypeAtIndex:{}]",
            index + 2
        )
    }

    #[test]
    fn test_receiver_description() {
        let session = ScriptedSession::new(TRIPLE)
            .on("(id)$rdi", description("<UIView: 0x7fd0a1d0a2c0; frame = (0 0; 320 480)>"));
        let debugger = Debugger::new(session);

        let readout = debugger.receiver_description().unwrap();
        assert_eq!(
            readout.as_deref(),
            Some("<UIView: 0x7fd0a1d0a2c0; frame = (0 0; 320 480)>")
        );
    }

    #[test]
    fn test_selector_summary_unquoted() {
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"setTitle:forState:\""));
        let debugger = Debugger::new(session);

        assert_eq!(debugger.selector().unwrap(), "setTitle:forState:");
    }

    #[test]
    fn test_unknown_architecture_is_reported() {
        let session = ScriptedSession::new("riscv64-unknown-none");
        let debugger = Debugger::new(session);

        let result = debugger.selector();
        assert!(matches!(
            result,
            Err(Error::UnsupportedArchitecture(arch)) if arch == "riscv64"
        ));
    }

    #[test]
    fn test_argument_index_bounds() {
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"setTitle:forState:\""))
            .on(signature_query("setTitle:forState:", 1), summary("\"Q\""))
            .on("(unsigned long long)$rcx", value("4"));
        let debugger = Debugger::new(session);

        // arity 2: index 1 succeeds, index 2 reports the valid bound
        let argument = debugger.argument(1, None).unwrap();
        assert_eq!(argument.type_name, "unsigned long long");
        assert_eq!(argument.rendition.as_deref(), Some("4"));

        let result = debugger.argument(2, None);
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 2, arity: 2 })
        ));
    }

    #[test]
    fn test_zero_arity_method_has_no_arguments() {
        let session =
            ScriptedSession::new(TRIPLE).on(SELECTOR_READ, summary("\"description\""));
        let debugger = Debugger::new(session);

        assert!(matches!(debugger.argument(0, None), Err(Error::NoArguments)));
        assert!(matches!(debugger.arguments(), Err(Error::NoArguments)));
    }

    #[test]
    fn test_rendition_follows_type_name() {
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"performAction:withSender:\""))
            .on(signature_query("performAction:withSender:", 0), summary("\":\""))
            .on(
                "(SEL)$rdx",
                Evaluated {
                    value: Some("0x00007fff8a4b2d10".to_string()),
                    summary: Some("\"copy:\"".to_string()),
                    description: None,
                },
            )
            .on(
                signature_query("performAction:withSender:", 1),
                summary("\"@\""),
            )
            .on(
                "(id)$rcx",
                Evaluated {
                    value: Some("0x0000600000f0aa00".to_string()),
                    summary: None,
                    description: Some("<UIMenuController: 0x600000f0aa00>".to_string()),
                },
            );
        let debugger = Debugger::new(session);

        // SEL renders through the summary, id through the description
        let sel_arg = debugger.argument(0, None).unwrap();
        assert_eq!(sel_arg.type_name, "SEL");
        assert_eq!(sel_arg.rendition.as_deref(), Some("\"copy:\""));

        let id_arg = debugger.argument(1, None).unwrap();
        assert_eq!(id_arg.type_name, "id");
        assert_eq!(
            id_arg.rendition.as_deref(),
            Some("<UIMenuController: 0x600000f0aa00>")
        );
    }

    #[test]
    fn test_explicit_type_skips_signature_query() {
        // no signature expression scripted: an explicit type must not ask the runtime
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"setFrame:\""))
            .on("(CGRect)$rdx", value("(origin = (0, 0), size = (100, 50))"));
        let debugger = Debugger::new(session);

        let argument = debugger.argument(0, Some("CGRect")).unwrap();
        assert_eq!(argument.type_name, "CGRect");
        assert_eq!(
            argument.rendition.as_deref(),
            Some("(origin = (0, 0), size = (100, 50))")
        );
    }

    #[test]
    fn test_undecodable_encoding_asks_for_explicit_type() {
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"setTransform:\""))
            .on(
                signature_query("setTransform:", 0),
                summary("\"^^{CGRect=dddd}\""),
            );
        let debugger = Debugger::new(session);

        let result = debugger.argument(0, None);
        assert!(matches!(
            result,
            Err(Error::UnsupportedEncoding(token)) if token == "^^{CGRect=dddd}"
        ));
    }

    #[test]
    fn test_all_arguments_in_index_order() {
        let session = ScriptedSession::new(TRIPLE)
            .on(SELECTOR_READ, summary("\"setTitle:forState:\""))
            .on(signature_query("setTitle:forState:", 0), summary("\"@\""))
            .on("(id)$rdx", description("Buy"))
            .on(signature_query("setTitle:forState:", 1), summary("\"Q\""))
            .on("(unsigned long long)$rcx", value("0"));
        let debugger = Debugger::new(session);

        let arguments = debugger.arguments().unwrap();
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].type_name, "id");
        assert_eq!(arguments[0].rendition.as_deref(), Some("Buy"));
        assert_eq!(arguments[1].type_name, "unsigned long long");
        assert_eq!(arguments[1].rendition.as_deref(), Some("0"));
    }

    #[test]
    fn test_visualize_rect_flow() {
        let session = ScriptedSession::new(TRIPLE)
            .on("(id)(self.view)", value("0x7fd0a1d0a2c0"))
            .on(
                "(UIView *)[[UIView alloc] initWithFrame:(CGRect)[(UIView *)0x7fd0a1d0a2c0 \
                 convertRect:(CGRect)(CGRectMake(10, 10, 50, 50)) \
                 toView:(UIView *)[(UIView *)0x7fd0a1d0a2c0 window]]]",
                value("0x7fd0a1e00420"),
            );
        let debugger = Debugger::new(session);

        let overlay = debugger
            .visualize_rect("CGRectMake(10, 10, 50, 50)", "self.view")
            .unwrap();
        assert_eq!(overlay, "0x7fd0a1e00420");
    }

    #[test]
    fn test_visualize_point_flow() {
        let session = ScriptedSession::new(TRIPLE)
            .on("(id)(self.view)", value("0x7fd0a1d0a2c0"))
            .on(
                "(UIView *)[[UIView alloc] initWithFrame:(CGRect)CGRectMake(0, 0, 4, 4)]",
                value("0x7fd0a1e00b80"),
            );
        let debugger = Debugger::new(session);

        let overlay = debugger
            .visualize_point("CGPointMake(66, 42)", "self.view")
            .unwrap();
        assert_eq!(overlay, "0x7fd0a1e00b80");
    }
}
