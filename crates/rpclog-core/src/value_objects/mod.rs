//! Value objects for the domain layer

mod log_id;

pub use log_id::{LogId, LogIdGenerator, LogIdParseError};
