//! Per-execution-context mutable state
//!
//! One `RequestContext` belongs to one execution context (worker task,
//! connection handler). Workers are reused cooperatively across requests,
//! so `reset` must run on every exit path - success, failure, or abort -
//! or one request's payload and timing leak into the next request's log
//! lines.

use rpclog_core::CallerInfo;

use super::payload::PayloadCapture;
use super::stopwatch::Stopwatch;

/// State scoped to a single request-handling lifecycle
#[derive(Debug, Default)]
pub struct RequestContext {
    pub stopwatch: Stopwatch,
    pub payload: PayloadCapture,
    pub caller: CallerInfo,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal hook: return the context to its pristine state
    ///
    /// The response-sending hook calls this unconditionally; hosts that
    /// abort requests early must call it themselves before reusing the
    /// worker.
    pub fn reset(&mut self) {
        self.stopwatch.reset();
        self.payload.clear();
        self.caller = CallerInfo::default();
    }
}
