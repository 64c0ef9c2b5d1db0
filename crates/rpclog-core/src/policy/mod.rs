//! Log capture policy
//!
//! Decides, per invocation, whether a record is written and which payloads
//! it carries. Pure function of (marker, outcome) - no side effects.

mod decision;

pub use decision::{LogDecision, LogPolicy, LoggableMarker};
