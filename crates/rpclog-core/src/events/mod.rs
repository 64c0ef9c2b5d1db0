//! RPC lifecycle events consumed by the capture engine
//!
//! The JSON-RPC server emits these around each method execution. The audit
//! subsystem is a pure consumer: it never produces events and never feeds
//! anything back into the request path.

mod lifecycle;
mod method_error;

pub use lifecycle::{
    CallerInfo, ExceptionEvent, FailureEvent, RequestStartEvent, RpcRequest, SuccessEvent,
};
pub use method_error::{MethodError, Outcome};
