//! Method capability registry
//!
//! Markers and formatters are declared per method when the RPC server
//! registers its handlers, then looked up from this static table on every
//! terminal event. No per-call reflection.

use std::collections::HashMap;
use std::sync::Arc;

use crate::events::RpcRequest;
use crate::policy::LoggableMarker;

/// Per-method optional one-line description formatter
///
/// Failures are non-fatal: the capture engine demotes them to a warning
/// and omits the description from the record.
pub trait LogFormatter: Send + Sync {
    fn format(&self, request: &RpcRequest) -> Result<String, FormatError>;
}

/// Error returned by a description formatter
#[derive(Debug, Clone, thiserror::Error)]
#[error("formatter failed: {0}")]
pub struct FormatError(String);

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Default)]
struct MethodEntry {
    marker: Option<LoggableMarker>,
    formatter: Option<Arc<dyn LogFormatter>>,
}

/// Lookup table from method name to its audit capabilities
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, MethodEntry>,
}

impl MethodRegistry {
    pub fn builder() -> MethodRegistryBuilder {
        MethodRegistryBuilder::default()
    }

    /// Loggable marker declared for the method, if any
    pub fn marker(&self, method: &str) -> Option<&LoggableMarker> {
        self.methods.get(method).and_then(|m| m.marker.as_ref())
    }

    /// Description formatter registered for the method, if any
    pub fn formatter(&self, method: &str) -> Option<&dyn LogFormatter> {
        self.methods
            .get(method)
            .and_then(|m| m.formatter.as_deref())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Builder used at server startup to assemble the registry
#[derive(Default)]
pub struct MethodRegistryBuilder {
    methods: HashMap<String, MethodEntry>,
}

impl MethodRegistryBuilder {
    /// Declare a method loggable with the given marker
    pub fn marked(mut self, method: impl Into<String>, marker: LoggableMarker) -> Self {
        self.methods.entry(method.into()).or_default().marker = Some(marker);
        self
    }

    /// Attach a description formatter to a method
    ///
    /// A formatter without a marker still matters: unexpected failures are
    /// logged for every method, and the record gets a description if a
    /// formatter exists.
    pub fn formatter(
        mut self,
        method: impl Into<String>,
        formatter: Arc<dyn LogFormatter>,
    ) -> Self {
        self.methods.entry(method.into()).or_default().formatter = Some(formatter);
        self
    }

    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            methods: self.methods,
        }
    }
}
