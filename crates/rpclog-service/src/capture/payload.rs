//! In-flight request payload slot
//!
//! Holds the raw payload of the request currently executing in this
//! context so ambient log lines can be tagged with it, instead of every
//! call site threading the payload through explicitly. Valid strictly
//! between request-start and response-sending; `clear` runs
//! unconditionally on every exit path.

use serde_json::Value;

use rpclog_common::truncate_middle;

/// Stored payload with its best-effort structured form
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPayload {
    raw: String,
    decoded: Option<Value>,
}

impl CapturedPayload {
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Structured form, when the payload was valid JSON
    #[inline]
    pub fn as_json(&self) -> Option<&Value> {
        self.decoded.as_ref()
    }
}

/// Per-execution-context payload capture
#[derive(Debug, Default)]
pub struct PayloadCapture {
    payload: Option<CapturedPayload>,
}

impl PayloadCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the payload for the request that just started
    ///
    /// Decoding is best-effort: a payload that is not valid JSON is kept
    /// as the raw string and the decode failure is swallowed.
    pub fn store(&mut self, raw: &str) {
        let decoded = serde_json::from_str::<Value>(raw).ok();
        self.payload = Some(CapturedPayload {
            raw: raw.to_string(),
            decoded,
        });
    }

    /// Payload of the in-flight request, if one is executing
    pub fn current(&self) -> Option<&CapturedPayload> {
        self.payload.as_ref()
    }

    /// Truncated single-line view for attaching to log lines
    pub fn ambient(&self, max_chars: usize) -> Option<String> {
        let payload = self.payload.as_ref()?;
        let compact = match payload.as_json() {
            Some(value) => value.to_string(),
            None => payload.raw.clone(),
        };
        Some(truncate_middle(&compact, max_chars))
    }

    /// Drop the stored payload; required between independent executions
    /// sharing the same worker
    pub fn clear(&mut self) {
        self.payload = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_decodes_json() {
        let mut capture = PayloadCapture::new();
        capture.store(r#"{"method":"user.login"}"#);

        let payload = capture.current().unwrap();
        assert_eq!(payload.as_json(), Some(&json!({"method": "user.login"})));
        assert_eq!(payload.raw(), r#"{"method":"user.login"}"#);
    }

    #[test]
    fn test_store_keeps_raw_on_decode_failure() {
        let mut capture = PayloadCapture::new();
        capture.store("not json at all");

        let payload = capture.current().unwrap();
        assert!(payload.as_json().is_none());
        assert_eq!(payload.raw(), "not json at all");
    }

    #[test]
    fn test_clear_removes_payload() {
        let mut capture = PayloadCapture::new();
        capture.store("{}");
        capture.clear();
        assert!(capture.current().is_none());
        assert!(capture.ambient(100).is_none());
    }

    #[test]
    fn test_ambient_is_truncated() {
        let mut capture = PayloadCapture::new();
        let long = format!(r#"{{"data":"{}"}}"#, "x".repeat(500));
        capture.store(&long);

        let ambient = capture.ambient(50).unwrap();
        assert_eq!(ambient.chars().count(), 50);
        assert!(ambient.contains("..."));
    }

    #[test]
    fn test_store_overwrites_previous_request() {
        let mut capture = PayloadCapture::new();
        capture.store(r#"{"seq":1}"#);
        capture.store(r#"{"seq":2}"#);
        assert_eq!(
            capture.current().unwrap().as_json(),
            Some(&json!({"seq": 2}))
        );
    }
}
