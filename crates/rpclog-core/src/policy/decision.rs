//! Marker, decision, and the policy rule set

use crate::events::Outcome;

/// Per-method static declaration that invocations should be audit-logged
///
/// Meant for write operations and anything whose timing matters; read-only
/// methods usually go unmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggableMarker {
    /// Capture the request envelope
    pub capture_request: bool,
    /// Capture the success response body
    pub capture_response: bool,
}

impl LoggableMarker {
    pub const fn new(capture_request: bool, capture_response: bool) -> Self {
        Self {
            capture_request,
            capture_response,
        }
    }
}

impl Default for LoggableMarker {
    /// A bare marker captures both sides
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Per-invocation capture decision; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDecision {
    pub should_log: bool,
    pub include_request: bool,
    pub include_response: bool,
}

impl LogDecision {
    /// Do not produce a record at all
    pub const fn skip() -> Self {
        Self {
            should_log: false,
            include_request: false,
            include_response: false,
        }
    }

    /// Record with both payloads captured
    pub const fn full() -> Self {
        Self {
            should_log: true,
            include_request: true,
            include_response: true,
        }
    }
}

/// The decision engine
pub struct LogPolicy;

impl LogPolicy {
    /// Evaluate the rule set, in order:
    ///
    /// 1. An unexpected failure is always logged with both payloads,
    ///    regardless of any marker.
    /// 2. A method without a marker is not logged.
    /// 3. Otherwise the marker's flags are honored.
    pub fn decide(marker: Option<&LoggableMarker>, outcome: Outcome) -> LogDecision {
        if outcome == Outcome::UnexpectedFailure {
            return LogDecision::full();
        }

        match marker {
            None => LogDecision::skip(),
            Some(marker) => LogDecision {
                should_log: true,
                include_request: marker.capture_request,
                include_response: marker.capture_response,
            },
        }
    }
}
