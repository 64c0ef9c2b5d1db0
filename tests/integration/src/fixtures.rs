//! Test fixtures and data generators

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};

use rpclog_core::registry::{FormatError, LogFormatter, MethodRegistry};
use rpclog_core::{
    CallerInfo, FailureEvent, LoggableMarker, MethodError, RequestStartEvent, RpcRequest,
    SuccessEvent,
};

/// Formatter fixture: "login by <username>"
pub struct LoginFormatter;

impl LogFormatter for LoginFormatter {
    fn format(&self, request: &RpcRequest) -> Result<String, FormatError> {
        let username = request
            .params
            .get("username")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::new("missing username"))?;
        Ok(format!("login by {username}"))
    }
}

/// Registry fixture used across scenarios:
/// - `user.login`: marker (true, true) with a formatter
/// - `user.register`: marker (true, true)
/// - `order.pay`: marker (false, true)
/// - everything else unmarked
pub fn test_registry() -> MethodRegistry {
    MethodRegistry::builder()
        .marked("user.login", LoggableMarker::default())
        .formatter("user.login", Arc::new(LoginFormatter))
        .marked("user.register", LoggableMarker::default())
        .marked("order.pay", LoggableMarker::new(false, true))
        .build()
}

/// Request-start fixture with a caller identity
pub fn start_event(payload: &str) -> RequestStartEvent {
    RequestStartEvent::new(payload).with_caller(CallerInfo {
        ip: Some("10.0.0.1".to_string()),
        user_agent: Some("integration-tests/1.0".to_string()),
        actor: Some("tester".to_string()),
    })
}

/// Envelope fixture
pub fn envelope(method: &str, params: Value) -> RpcRequest {
    RpcRequest::new(Some(json!(1)), method, params)
}

/// Success event fixture
pub fn success_event(method: &str, params: Value, result: Value) -> SuccessEvent {
    let now = Utc::now();
    SuccessEvent {
        method: method.to_string(),
        request: envelope(method, params),
        result,
        start_time: now,
        end_time: now,
    }
}

/// Failure event fixture
pub fn failure_event(method: &str, params: Value, error: MethodError) -> FailureEvent {
    FailureEvent {
        method: method.to_string(),
        request: envelope(method, params),
        error,
    }
}
