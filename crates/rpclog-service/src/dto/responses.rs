//! Response DTOs for the admin endpoints
//!
//! Log ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rpclog_core::entities::RequestLog;

/// One row in the admin listing
#[derive(Debug, Clone, Serialize)]
pub struct RequestLogSummary {
    pub id: String,
    pub api_name: String,
    /// "success" or "error", derived from the exception field
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwatch_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

impl From<&RequestLog> for RequestLogSummary {
    fn from(log: &RequestLog) -> Self {
        Self {
            id: log.id.to_string(),
            api_name: log.api_name.clone(),
            status: log.status_label(),
            description: log.description.clone(),
            created_from_ip: log.created_from_ip.clone(),
            created_by: log.created_by.clone(),
            stopwatch_duration: log.stopwatch_duration,
            create_time: log.create_time,
        }
    }
}

/// Full record view for the detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RequestLogDetail {
    pub id: String,
    pub api_name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwatch_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwatch_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from_ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
}

impl From<RequestLog> for RequestLogDetail {
    fn from(log: RequestLog) -> Self {
        let status = log.status_label();
        Self {
            id: log.id.to_string(),
            api_name: log.api_name,
            status,
            description: log.description,
            request: log.request,
            response: log.response,
            exception: log.exception,
            server_ip: log.server_ip,
            stopwatch_result: log.stopwatch_result,
            stopwatch_duration: log.stopwatch_duration,
            created_from_ip: log.created_from_ip,
            created_from_ua: log.created_from_ua,
            created_by: log.created_by,
            create_time: log.create_time,
        }
    }
}

/// Listing page with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedLogs {
    pub data: Vec<RequestLogSummary>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}
