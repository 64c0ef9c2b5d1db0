//! Log record assembly
//!
//! Turns a policy decision plus a terminal event into a `RequestLog`.
//! Nothing in here is allowed to abort the calling request path: field
//! serialization failures and formatter failures are demoted to warnings
//! and the affected field is omitted from the record.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use rpclog_core::entities::RequestLog;
use rpclog_core::events::{CallerInfo, FailureEvent, SuccessEvent};
use rpclog_core::policy::LogDecision;
use rpclog_core::registry::LogFormatter;
use rpclog_core::value_objects::LogIdGenerator;
use rpclog_core::RpcRequest;

use crate::capture::Timing;

/// Assembles persistable records from terminal lifecycle events
pub struct LogRecordBuilder {
    ids: Arc<LogIdGenerator>,
    server_ip: Option<String>,
}

impl LogRecordBuilder {
    pub fn new(ids: Arc<LogIdGenerator>, server_ip: Option<String>) -> Self {
        Self { ids, server_ip }
    }

    /// Build a record for a successful invocation
    ///
    /// Request and response are both gated by the decision flags.
    pub fn build_success(
        &self,
        decision: LogDecision,
        event: &SuccessEvent,
        formatter: Option<&dyn LogFormatter>,
        timing: Option<Timing>,
        caller: &CallerInfo,
    ) -> RequestLog {
        let mut log = RequestLog::new(self.ids.generate(), event.method.clone());

        if decision.include_request {
            log.request = self.encode_field(&event.method, "request", &event.request);
        }
        if decision.include_response {
            log.response = self.encode_field(&event.method, "response", &event.result);
        }

        self.apply_common(&mut log, &event.request, formatter, timing, caller);
        log
    }

    /// Build a record for a failed invocation
    ///
    /// The request envelope respects the decision's request flag, but the
    /// failure response (the error message) and the rendered exception are
    /// written unconditionally: failure payloads are cheap and carry most
    /// of the diagnostic value.
    pub fn build_failure(
        &self,
        decision: LogDecision,
        event: &FailureEvent,
        formatter: Option<&dyn LogFormatter>,
        timing: Option<Timing>,
        caller: &CallerInfo,
    ) -> RequestLog {
        let mut log = RequestLog::new(self.ids.generate(), event.method.clone());

        if decision.include_request {
            log.request = self.encode_field(&event.method, "request", &event.request);
        }
        log.response = Some(event.error.message());
        log.exception = Some(event.error.render_trace());

        self.apply_common(&mut log, &event.request, formatter, timing, caller);
        log
    }

    fn apply_common(
        &self,
        log: &mut RequestLog,
        request: &RpcRequest,
        formatter: Option<&dyn LogFormatter>,
        timing: Option<Timing>,
        caller: &CallerInfo,
    ) {
        if let Some(timing) = timing {
            log.stopwatch_duration = Some(timing.duration_ms);
            log.stopwatch_result = Some(timing.summary);
        }

        if let Some(formatter) = formatter {
            match formatter.format(request) {
                Ok(description) => log.description = Some(description),
                Err(error) => {
                    warn!(api_name = %log.api_name, %error, "description formatter failed, omitting description");
                }
            }
        }

        log.server_ip = self.server_ip.clone();
        log.created_from_ip = caller.ip.clone();
        log.created_from_ua = caller.user_agent.clone();
        log.created_by = caller.actor.clone();
    }

    /// Serialize a record field, demoting failures to a warning
    fn encode_field<T>(&self, api_name: &str, field: &'static str, value: &T) -> Option<String>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(value) {
            Ok(encoded) => Some(encoded),
            Err(error) => {
                warn!(api_name, field, %error, "failed to serialize log field, omitting it");
                None
            }
        }
    }
}
