//! Repository implementations

mod error;
mod request_log;

pub use request_log::PgRequestLogRepository;
