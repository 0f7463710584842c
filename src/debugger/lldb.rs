//! Production [`Session`] over the LLDB C++ API bindings.

use crate::debugger::error::Error;
use crate::debugger::session::{Evaluated, Session};
use lldb::{
    lldb_pid_t, SBAttachInfo, SBDebugger, SBExpressionOptions, SBFrame, SBProcess, SBTarget,
};

// lldb reports kNoResult for well-formed expressions of type void,
// see lldb/include/lldb/Expression/UserExpression.h
const K_NO_RESULT: u32 = 0x1001;

pub struct LldbSession {
    debugger: SBDebugger,
    target: SBTarget,
    process: SBProcess,
}

impl LldbSession {
    /// Attach to a running process and leave it stopped.
    pub fn attach(pid: lldb_pid_t) -> Result<Self, Error> {
        SBDebugger::initialize();

        let debugger = SBDebugger::create(false);
        debugger.set_asynchronous(false);

        // an empty target skips symbol table preloading, modules arrive
        // with the attach
        let target = debugger
            .create_target("", None, None, false)
            .map_err(|e| Error::Attach(format!("{e:?}")))?;

        let attach_info = SBAttachInfo::new_with_pid(pid);
        let process = target
            .attach(attach_info)
            .map_err(|e| Error::Attach(format!("{e:?}")))?;

        log::info!(target: "session", "attached to pid {pid}");

        Ok(Self {
            debugger,
            target,
            process,
        })
    }

    fn stopped_frame(&self) -> Result<SBFrame, Error> {
        let thread = self.process.selected_thread();
        thread.frames().next().ok_or(Error::NoStoppedFrame)
    }
}

impl Session for LldbSession {
    fn triple(&self) -> Result<String, Error> {
        Ok(self.target.triple().to_string())
    }

    fn evaluate(&self, expr: &str) -> Result<Evaluated, Error> {
        fn non_empty(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }

        let frame = self.stopped_frame()?;
        let options = SBExpressionOptions::new();
        let result = frame.evaluate_expression(expr, &options);

        if let Some(error) = result.error() {
            if error.is_failure() && error.error() != K_NO_RESULT {
                return Err(Error::Evaluation {
                    expr: expr.to_string(),
                    reason: format!("{error:?}"),
                });
            }
        }

        Ok(Evaluated {
            value: non_empty(result.value()),
            summary: non_empty(result.summary()),
            description: non_empty(result.object_description()),
        })
    }

    fn plant_oneshot(&self, pattern: &str) -> Result<String, Error> {
        let mut matched = None;
        'modules: for module in self.target.modules() {
            for symbol in module.symbols() {
                if symbol.name().contains(pattern) {
                    matched = Some((symbol.name().to_string(), symbol.start_address()));
                    break 'modules;
                }
            }
        }

        let (name, address) =
            matched.ok_or_else(|| Error::SymbolNotFound(pattern.to_string()))?;
        let address = address.ok_or_else(|| Error::SymbolAddress(name.clone()))?;

        let breakpoint = self.target.breakpoint_create_by_sbaddress(address);
        breakpoint.set_oneshot(true);
        breakpoint.set_enabled(true);

        log::debug!(target: "session", "one-shot breakpoint at `{name}`");

        Ok(name)
    }

    fn resume(&self) -> Result<(), Error> {
        // synchronous mode, returns on the next stop
        self.process
            .continue_execution()
            .map_err(|e| Error::Resume(format!("{e:?}")))
    }

    fn detach(&mut self) -> Result<(), Error> {
        // a synchronous detach can freeze the target, resume it in
        // asynchronous mode first
        self.debugger.set_asynchronous(true);
        _ = self.process.continue_execution();

        self.process
            .detach()
            .map_err(|e| Error::Detach(format!("{e:?}")))?;

        SBDebugger::terminate();
        Ok(())
    }
}
