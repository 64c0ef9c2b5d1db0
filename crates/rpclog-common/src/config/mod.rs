//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CaptureConfig, ConfigError, DatabaseConfig, Environment,
    RetentionConfig, ServerConfig, WorkerConfig,
};
