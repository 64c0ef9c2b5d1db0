//! End-to-end capture pipeline tests
//!
//! Each test drives the full path: lifecycle events into the capture
//! engine, records through the bounded queue, writer task into the
//! in-memory repository.
//!
//! Run with: cargo test -p integration-tests --test capture_tests

use chrono::{Duration, Utc};
use serde_json::json;

use integration_tests::{
    failure_event, start_event, success_event, test_registry, InMemoryRequestLogRepository,
    Pipeline,
};
use rpclog_common::RetentionConfig;
use rpclog_core::entities::RequestLog;
use rpclog_core::value_objects::LogId;
use rpclog_core::{MethodError, RpcRequest};
use rpclog_service::{RequestContext, RetentionSweeper};
use std::sync::Arc;

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_marked_success_produces_complete_record() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    let payload = r#"{"id":1,"jsonrpc":"2.0","method":"user.login","params":{"username":"test"}}"#;
    pipeline.capture.on_request_start(&mut ctx, &start_event(payload));
    pipeline.capture.on_success(
        &mut ctx,
        &success_event(
            "user.login",
            json!({"username": "test"}),
            json!({"token": "abc123"}),
        ),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    let logs = repo.all();
    assert_eq!(logs.len(), 1);

    let log = &logs[0];
    assert_eq!(log.api_name, "user.login");
    assert!(log.exception.is_none());
    assert_eq!(log.description.as_deref(), Some("login by test"));
    assert_eq!(log.created_from_ip.as_deref(), Some("10.0.0.1"));
    assert_eq!(log.created_by.as_deref(), Some("tester"));
    assert!(log.create_time.is_some(), "create_time is stamped at persistence");
    assert!(log.stopwatch_duration.is_some());
    assert!(log.stopwatch_result.as_deref().unwrap().contains("ms"));

    // Response carries the result payload
    assert_eq!(log.response.as_deref(), Some(r#"{"token":"abc123"}"#));

    // Request round-trips back to the original envelope
    let decoded: RpcRequest = serde_json::from_str(log.request.as_deref().unwrap()).unwrap();
    assert_eq!(decoded.method, "user.login");
    assert_eq!(decoded.jsonrpc, "2.0");
    assert_eq!(decoded.params, json!({"username": "test"}));
}

#[tokio::test]
async fn test_request_suppressed_marker_keeps_response_only() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    pipeline.capture.on_request_start(&mut ctx, &start_event("{}"));
    pipeline.capture.on_success(
        &mut ctx,
        &success_event("order.pay", json!({"order_id": 55}), json!({"paid": true})),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    let logs = repo.all();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].request.is_none(), "capture_request=false omits the envelope");
    assert_eq!(logs[0].response.as_deref(), Some(r#"{"paid":true}"#));
}

#[tokio::test]
async fn test_unmarked_method_success_writes_nothing() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    pipeline.capture.on_request_start(&mut ctx, &start_event("{}"));
    pipeline.capture.on_success(
        &mut ctx,
        &success_event("user.profile", json!({}), json!({"name": "n"})),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    assert!(repo.is_empty());
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_expected_failure_records_message_and_trace() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    pipeline.capture.on_request_start(&mut ctx, &start_event("{}"));
    pipeline.capture.on_failure(
        &mut ctx,
        &failure_event(
            "user.register",
            json!({"email": "not-an-email"}),
            MethodError::expected(4001, "邮箱格式不正确"),
        ),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    let logs = repo.all();
    assert_eq!(logs.len(), 1);

    let log = &logs[0];
    assert_eq!(log.api_name, "user.register");
    assert_eq!(log.response.as_deref(), Some("邮箱格式不正确"));
    assert!(log.exception.as_deref().unwrap().contains("邮箱格式不正确"));
    assert!(log.request.is_some(), "marker captures the request");
    assert!(log.is_failure());
}

#[tokio::test]
async fn test_unmarked_expected_failure_writes_nothing() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    pipeline.capture.on_request_start(&mut ctx, &start_event("{}"));
    pipeline.capture.on_failure(
        &mut ctx,
        &failure_event(
            "user.profile",
            json!({}),
            MethodError::expected(4004, "no such user"),
        ),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_unmarked_unexpected_failure_is_always_recorded() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    pipeline.capture.on_request_start(&mut ctx, &start_event("{}"));
    pipeline.capture.on_failure(
        &mut ctx,
        &failure_event(
            "user.profile",
            json!({"user_id": 1}),
            MethodError::from(anyhow::anyhow!("attempted to read a missing row")),
        ),
    );
    pipeline.capture.on_response_sending(&mut ctx);

    let repo = pipeline.shutdown().await;
    let logs = repo.all();
    assert_eq!(logs.len(), 1, "unexpected failures override the missing marker");

    let log = &logs[0];
    assert!(log.request.is_some());
    assert_eq!(log.response.as_deref(), Some("attempted to read a missing row"));
    assert!(log.exception.is_some());
}

// ============================================================================
// Worker reuse
// ============================================================================

#[tokio::test]
async fn test_payload_does_not_leak_across_requests_on_same_worker() {
    let pipeline = Pipeline::start(test_registry());
    let mut ctx = RequestContext::new();

    // First request stores a payload
    pipeline
        .capture
        .on_request_start(&mut ctx, &start_event(r#"{"method":"user.login"}"#));
    assert!(ctx.payload.current().is_some());

    // Terminal hook fires; the same worker is reused afterwards
    pipeline.capture.on_response_sending(&mut ctx);
    assert!(
        ctx.payload.current().is_none(),
        "payload must be gone after response sending"
    );
    assert!(!ctx.stopwatch.is_running());

    // Second request starts clean
    pipeline
        .capture
        .on_request_start(&mut ctx, &start_event(r#"{"method":"order.pay"}"#));
    let stored = ctx.payload.current().unwrap();
    assert_eq!(
        stored.as_json().unwrap()["method"],
        json!("order.pay"),
        "second request sees only its own payload"
    );
    pipeline.capture.on_response_sending(&mut ctx);

    pipeline.shutdown().await;
}

// ============================================================================
// Retention
// ============================================================================

#[tokio::test]
async fn test_sweeper_deletes_aged_records_and_is_idempotent() {
    let repo = Arc::new(InMemoryRequestLogRepository::new());
    repo.seed_with_create_time(
        RequestLog::new(LogId::new(1), "user.login"),
        Utc::now() - Duration::days(200),
    );
    repo.seed_with_create_time(
        RequestLog::new(LogId::new(2), "user.login"),
        Utc::now() - Duration::days(100),
    );

    let sweeper = RetentionSweeper::new(
        repo.clone(),
        &RetentionConfig {
            days: 180,
            schedule: "41 1 * * *".to_string(),
        },
    )
    .unwrap();

    let deleted = sweeper.sweep_once().await.unwrap();
    assert_eq!(deleted, 1, "only the 200-day-old record falls outside the window");
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.all()[0].id, LogId::new(2));

    // Second sweep with no inserts in between deletes nothing
    let deleted_again = sweeper.sweep_once().await.unwrap();
    assert_eq!(deleted_again, 0);
    assert_eq!(repo.len(), 1);
}
