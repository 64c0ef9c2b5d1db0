//! Entity ↔ model mappers

mod request_log;
