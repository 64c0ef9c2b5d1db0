//! Database models - SQLx-compatible structs for PostgreSQL tables

mod request_log;

pub use request_log::RequestLogModel;
