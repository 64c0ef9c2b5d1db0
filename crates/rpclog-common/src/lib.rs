//! # rpclog-common
//!
//! Shared utilities: environment-based configuration, error handling,
//! telemetry setup, and small text helpers.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod text;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, CaptureConfig, ConfigError, DatabaseConfig, Environment,
    RetentionConfig, ServerConfig, WorkerConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
pub use text::truncate_middle;
