//! Request log entity - one persisted audit record per logged invocation
//!
//! Records are append-only: everything except `create_time` is fixed when
//! the record is assembled, and `create_time` is stamped exactly once by
//! the persistence layer at insert. Nothing mutates a record afterwards.

use chrono::{DateTime, Utc};

use crate::value_objects::LogId;

/// Persisted audit record for a single JSON-RPC method invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLog {
    pub id: LogId,
    /// Optional human-readable summary produced by a per-method formatter
    pub description: Option<String>,
    /// Serialized request envelope `{id, jsonrpc, method, params}`
    pub request: Option<String>,
    /// Serialized result on success, or the failure message on error
    pub response: Option<String>,
    /// Rendered error chain; present only for failed invocations
    pub exception: Option<String>,
    pub server_ip: Option<String>,
    /// Human-readable timing summary, e.g. `json-rpc-logger: 12.34ms`
    pub stopwatch_result: Option<String>,
    /// Execution duration in milliseconds
    pub stopwatch_duration: Option<f64>,
    /// Fully-qualified method identifier, e.g. `user.login`
    pub api_name: String,
    pub created_from_ip: Option<String>,
    pub created_from_ua: Option<String>,
    pub created_by: Option<String>,
    /// Assigned by the database at insert; `None` until persisted
    pub create_time: Option<DateTime<Utc>>,
}

impl RequestLog {
    /// Create an empty record for the given method
    pub fn new(id: LogId, api_name: impl Into<String>) -> Self {
        Self {
            id,
            description: None,
            request: None,
            response: None,
            exception: None,
            server_ip: None,
            stopwatch_result: None,
            stopwatch_duration: None,
            api_name: api_name.into(),
            created_from_ip: None,
            created_from_ua: None,
            created_by: None,
            create_time: None,
        }
    }

    /// A record with an exception is a failed invocation
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.exception.is_some()
    }

    /// Display status derived from the exception field
    pub fn status_label(&self) -> &'static str {
        if self.is_failure() {
            "error"
        } else {
            "success"
        }
    }
}
