//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub admin: ServerConfig,
    pub database: DatabaseConfig,
    pub capture: CaptureConfig,
    pub retention: RetentionConfig,
    pub worker: WorkerConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Admin server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Log capture configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Bound of the persistence queue; enqueues beyond it are dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Max length of payload/result excerpts attached to ambient log lines
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
    /// Address stored in each record's server_ip field
    #[serde(default)]
    pub server_ip: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            max_field_length: default_max_field_length(),
            server_ip: None,
        }
    }
}

/// Retention sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionConfig {
    /// Records older than this many days are deleted by the sweeper
    #[serde(default = "default_retention_days")]
    pub days: i64,
    /// Daily schedule expression, "M H * * *" form
    #[serde(default = "default_sweep_schedule")]
    pub schedule: String,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: default_retention_days(),
            schedule: default_sweep_schedule(),
        }
    }
}

/// Log id generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "rpclog".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_max_field_length() -> usize {
    1000
}

fn default_retention_days() -> i64 {
    180
}

fn default_sweep_schedule() -> String {
    "41 1 * * *".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            admin: ServerConfig {
                host: env::var("ADMIN_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("ADMIN_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("ADMIN_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            capture: CaptureConfig {
                queue_capacity: env::var("LOG_QUEUE_CAPACITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_queue_capacity),
                max_field_length: env::var("LOG_MAX_FIELD_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_field_length),
                server_ip: env::var("SERVER_IP").ok(),
            },
            retention: RetentionConfig {
                days: env::var("LOG_RETENTION_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_retention_days),
                schedule: env::var("LOG_SWEEP_SCHEDULE")
                    .unwrap_or_else(|_| default_sweep_schedule()),
            },
            worker: WorkerConfig {
                worker_id: env::var("WORKER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
