//! Method failure classification
//!
//! Expected failures are business-rule violations the API is designed to
//! surface to callers. Everything else is unexpected and must always be
//! diagnosable, which is why the log policy overrides per-method markers
//! for them.

use std::fmt::Write as _;

use thiserror::Error;

/// Error raised by a JSON-RPC method handler
#[derive(Debug, Error)]
pub enum MethodError {
    /// Application-level failure carried back to the caller as-is
    #[error("{message}")]
    Expected { code: i32, message: String },

    /// Unanticipated internal fault
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl MethodError {
    /// Create an expected (application-level) failure
    pub fn expected(code: i32, message: impl Into<String>) -> Self {
        Self::Expected {
            code,
            message: message.into(),
        }
    }

    /// Wrap any error as an unexpected failure
    pub fn unexpected<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unexpected(anyhow::Error::new(error))
    }

    #[inline]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Expected { .. })
    }

    /// Outcome kind for policy evaluation
    pub fn outcome(&self) -> Outcome {
        if self.is_expected() {
            Outcome::ExpectedFailure
        } else {
            Outcome::UnexpectedFailure
        }
    }

    /// Message surfaced to the caller (and stored as the failure response)
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Printable representation of the full error, stored in the
    /// record's exception field
    pub fn render_trace(&self) -> String {
        match self {
            Self::Expected { code, message } => {
                format!("expected failure (code {code}): {message}")
            }
            Self::Unexpected(error) => {
                // anyhow's alternate Debug prints the whole cause chain
                // (and a backtrace when one was captured)
                let mut rendered = String::new();
                let _ = write!(rendered, "{error:?}");
                rendered
            }
        }
    }
}

/// How a method invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    ExpectedFailure,
    UnexpectedFailure,
}
