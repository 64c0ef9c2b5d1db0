//! Per-request capture machinery
//!
//! `Stopwatch` and `PayloadCapture` are mutable per-execution-context
//! state, bundled in `RequestContext` and reset by a terminal hook on
//! every exit path. `LogCapture` is the stateless engine that consumes
//! lifecycle events against one such context.

mod context;
mod payload;
mod stopwatch;
mod subscriber;

pub use context::RequestContext;
pub use payload::{CapturedPayload, PayloadCapture};
pub use stopwatch::{Stopwatch, Timing};
pub use subscriber::LogCapture;
