//! Lifecycle event consumer
//!
//! `LogCapture` listens to the JSON-RPC server's execution events and
//! drives the whole capture path: operational log lines for every
//! terminal event, policy evaluation, record assembly, and the
//! non-blocking handoff to the persistence sink. Nothing here can fail
//! the business request - the worst outcome of any fault is a missing
//! audit record.

use std::sync::Arc;

use tracing::{error, info, warn};

use rpclog_common::{truncate_middle, CaptureConfig};
use rpclog_core::events::{
    ExceptionEvent, FailureEvent, Outcome, RequestStartEvent, SuccessEvent,
};
use rpclog_core::policy::LogPolicy;
use rpclog_core::registry::MethodRegistry;
use rpclog_core::value_objects::LogIdGenerator;

use crate::builder::LogRecordBuilder;
use crate::sink::LogSink;

use super::context::RequestContext;

/// The event-driven log-capture engine
///
/// Stateless itself; all per-request state lives in the `RequestContext`
/// the host passes into each hook.
pub struct LogCapture {
    registry: Arc<MethodRegistry>,
    builder: LogRecordBuilder,
    sink: LogSink,
    max_field_length: usize,
}

impl LogCapture {
    pub fn new(
        registry: Arc<MethodRegistry>,
        ids: Arc<LogIdGenerator>,
        sink: LogSink,
        config: &CaptureConfig,
    ) -> Self {
        Self {
            registry,
            builder: LogRecordBuilder::new(ids, config.server_ip.clone()),
            sink,
            max_field_length: config.max_field_length,
        }
    }

    /// RequestStart: arm the stopwatch and capture the raw payload
    pub fn on_request_start(&self, ctx: &mut RequestContext, event: &RequestStartEvent) {
        ctx.caller = event.caller.clone();
        ctx.stopwatch.start();
        ctx.payload.store(&event.payload);
    }

    /// Success: log the outcome, then persist if the policy says so
    pub fn on_success(&self, ctx: &mut RequestContext, event: &SuccessEvent) {
        match serde_json::to_string(&event.result) {
            Ok(encoded) => {
                info!(
                    method = %event.method,
                    result = %truncate_middle(&encoded, self.max_field_length),
                    duration_us = event.execution_micros(),
                    payload = ctx.payload.ambient(self.max_field_length),
                    "json-rpc method executed"
                );
            }
            Err(err) => {
                warn!(
                    method = %event.method,
                    error = %err,
                    "json-rpc method executed, but the result could not be serialized for logging"
                );
            }
        }

        let decision = LogPolicy::decide(self.registry.marker(&event.method), Outcome::Success);
        if !decision.should_log {
            return;
        }

        let record = self.builder.build_success(
            decision,
            event,
            self.registry.formatter(&event.method),
            ctx.stopwatch.measure(),
            &ctx.caller,
        );
        self.sink.enqueue(record);
    }

    /// Failure: log by severity class, then persist if the policy says so
    pub fn on_failure(&self, ctx: &mut RequestContext, event: &FailureEvent) {
        if event.error.is_expected() {
            warn!(
                method = %event.method,
                error = %event.error,
                payload = ctx.payload.ambient(self.max_field_length),
                "json-rpc method raised an expected failure"
            );
        } else {
            error!(
                method = %event.method,
                error = %event.error,
                trace = %event.error.render_trace(),
                payload = ctx.payload.ambient(self.max_field_length),
                "json-rpc method raised an unexpected failure"
            );
        }

        let decision = LogPolicy::decide(
            self.registry.marker(&event.method),
            event.error.outcome(),
        );
        if !decision.should_log {
            return;
        }

        let record = self.builder.build_failure(
            decision,
            event,
            self.registry.formatter(&event.method),
            ctx.stopwatch.measure(),
            &ctx.caller,
        );
        self.sink.enqueue(record);
    }

    /// Errors raised outside any method handler (parse failures, unknown
    /// methods). No marker can be resolved, so these are logged only.
    pub fn on_exception(&self, event: &ExceptionEvent) {
        error!(
            method = event.method.as_deref(),
            error = %event.error,
            "json-rpc request failed outside method execution"
        );
    }

    /// ResponseSending: the guaranteed finalizer
    ///
    /// Fires on every exit path, including cancellation, so the next
    /// request on this worker starts from a clean context.
    pub fn on_response_sending(&self, ctx: &mut RequestContext) {
        ctx.reset();
    }
}
