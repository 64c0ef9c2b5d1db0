//! DTOs for the administrative read surface

mod responses;

pub use responses::{PaginatedLogs, PaginationMeta, RequestLogDetail, RequestLogSummary};
