//! Lifecycle event payloads
//!
//! Within one request the order is strict: RequestStart, then Success or
//! Failure, then the response-sending terminal hook. Across requests no
//! ordering is implied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::method_error::MethodError;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Request id; `null` for notifications
    pub id: Option<Value>,
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl RpcRequest {
    /// Build an envelope with the given method and params
    pub fn new(id: Option<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
        }
    }
}

/// Identity of the caller, captured when the request arrives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallerInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    /// Authenticated actor, when the host server knows one
    pub actor: Option<String>,
}

/// Fired when a raw request payload has been received, before dispatch
#[derive(Debug, Clone)]
pub struct RequestStartEvent {
    /// Raw request body as received on the wire
    pub payload: String,
    pub caller: CallerInfo,
}

impl RequestStartEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            caller: CallerInfo::default(),
        }
    }

    pub fn with_caller(mut self, caller: CallerInfo) -> Self {
        self.caller = caller;
        self
    }
}

/// Fired after a method handler returned successfully
#[derive(Debug, Clone)]
pub struct SuccessEvent {
    pub method: String,
    pub request: RpcRequest,
    /// Handler result, already converted to JSON
    pub result: Value,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SuccessEvent {
    /// Handler execution time in microseconds
    pub fn execution_micros(&self) -> i64 {
        (self.end_time - self.start_time)
            .num_microseconds()
            .unwrap_or(i64::MAX)
    }
}

/// Fired after a method handler returned an error
#[derive(Debug)]
pub struct FailureEvent {
    pub method: String,
    pub request: RpcRequest,
    pub error: MethodError,
}

/// Fired for errors raised outside a method handler (parse failures,
/// unknown methods). No marker can be resolved for these, so they are
/// logged but never persisted.
#[derive(Debug)]
pub struct ExceptionEvent {
    pub error: MethodError,
    /// Method name from the originating request, when one could be parsed
    pub method: Option<String>,
}
