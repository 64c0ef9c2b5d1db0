//! # rpclog-service
//!
//! Application layer of the audit log subsystem: the per-request capture
//! engine (stopwatch, payload slot, record assembly), the asynchronous
//! persistence sink, the retention sweeper, and the read-side query
//! service backing the admin surface.

pub mod builder;
pub mod capture;
pub mod dto;
pub mod query;
pub mod sink;
pub mod sweeper;

// Re-export commonly used types at crate root
pub use builder::LogRecordBuilder;
pub use capture::{LogCapture, PayloadCapture, RequestContext, Stopwatch, Timing};
pub use dto::{PaginatedLogs, PaginationMeta, RequestLogDetail, RequestLogSummary};
pub use query::LogQueryService;
pub use sink::{spawn_writer, LogSink, LogWriter};
pub use sweeper::{DailySchedule, RetentionSweeper, ScheduleError};
