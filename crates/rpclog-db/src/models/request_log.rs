//! Request log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the request_logs table
#[derive(Debug, Clone, FromRow)]
pub struct RequestLogModel {
    pub id: i64,
    pub description: Option<String>,
    pub request: Option<String>,
    pub response: Option<String>,
    pub exception: Option<String>,
    pub server_ip: Option<String>,
    pub stopwatch_result: Option<String>,
    pub stopwatch_duration: Option<f64>,
    pub api_name: String,
    pub created_from_ip: Option<String>,
    pub created_from_ua: Option<String>,
    pub created_by: Option<String>,
    /// Stamped by the column default at insert
    pub create_time: DateTime<Utc>,
}
