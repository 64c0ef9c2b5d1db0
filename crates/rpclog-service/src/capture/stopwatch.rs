//! Per-request stopwatch
//!
//! One instance lives inside each `RequestContext`: started at
//! RequestStart, read at the terminal event, reset at end-of-request.
//! Not safe for overlapping measurements; contexts are never shared
//! between in-flight requests.

use std::time::Instant;

const MEASUREMENT_LABEL: &str = "json-rpc-logger";

/// Measured duration plus its human-readable summary
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Summary for quick operator inspection, e.g. `json-rpc-logger: 12.34ms`
    pub summary: String,
}

/// Single-measurement stopwatch scoped to one request lifecycle
#[derive(Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin the measurement; a second call restarts it
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Read the elapsed time since `start`
    ///
    /// Returns `None` when `start` never fired (an upstream short-circuit
    /// skipped the request-start event); callers simply omit timing from
    /// the record in that case.
    pub fn measure(&self) -> Option<Timing> {
        let started = self.started?;
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        Some(Timing {
            duration_ms,
            summary: format!("{MEASUREMENT_LABEL}: {duration_ms:.2}ms"),
        })
    }

    /// Discard any in-flight measurement
    pub fn reset(&mut self) {
        self.started = None;
    }
}
