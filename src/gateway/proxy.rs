//! `POST /api/predict` — forward to the classifier and relay its answer.
//!
//! The handler is a plain function from request body to [`Reply`] so the
//! status/body contract can be exercised without a socket. Upstream detail
//! is logged server-side and never copied into a reply.
use std::time::Duration;

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::diagnostics;
use crate::error::{AnalyzeError, Result};

/// 400 body text when the request carries no usable `text`.
pub const NO_TEXT: &str = "No text provided";

/// 500 body text for every upstream or request-parsing failure.
pub const ANALYZE_FAILED: &str = "Failed to analyze sentiment";

/// Status code and JSON body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Upstream
// ---------------------------------------------------------------------------

/// The classifier the gateway forwards to.
#[derive(Debug, Clone)]
pub struct Upstream {
    url: String,
    timeout: Duration,
}

impl Upstream {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.upstream_url.trim(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `{ "text": text }` and return the response body verbatim.
    ///
    /// Non-2xx status, transport failure, and a body that is not JSON all
    /// map to [`AnalyzeError::Upstream`].
    pub fn forward(&self, text: &Value) -> Result<String> {
        // "localhost" may resolve to ::1 first while the classifier only
        // listens on IPv4.
        let url = self.url.replace("://localhost", "://127.0.0.1");

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(serde_json::json!({ "text": text }))
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => AnalyzeError::Upstream(format!(
                    "classifier at {} responded with status: {code}",
                    self.url
                )),
                ureq::Error::Transport(t) => AnalyzeError::Upstream(t.to_string()),
            })?;

        let body = resp
            .into_string()
            .map_err(|e| AnalyzeError::Upstream(format!("failed to read classifier body: {e}")))?;

        serde_json::from_str::<IgnoredAny>(&body)
            .map_err(|e| AnalyzeError::Upstream(format!("classifier returned invalid JSON: {e}")))?;

        Ok(body)
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Handle one prediction request body.
///
/// - body not JSON, or JSON `null` → 500
/// - `text` missing or falsy → 400, no upstream call
/// - upstream failure → 500
/// - upstream success → 200 with the upstream body unchanged
pub fn handle_predict(body: &str, upstream: &Upstream) -> Reply {
    let request: Value = match serde_json::from_str(body) {
        Ok(Value::Null) => {
            log_gateway_failure("bad_request", "request body was JSON null", None);
            return Reply::error(500, ANALYZE_FAILED);
        }
        Ok(v) => v,
        Err(e) => {
            log_gateway_failure("bad_request", &format!("invalid JSON body: {e}"), None);
            return Reply::error(500, ANALYZE_FAILED);
        }
    };

    let Some(text) = request.get("text").filter(|v| is_truthy(v)) else {
        return Reply::error(400, NO_TEXT);
    };

    match upstream.forward(text) {
        Ok(body) => Reply::ok(body),
        Err(e) => {
            let chars = text.as_str().map(|s| s.chars().count());
            log_gateway_failure("upstream", &e.to_string(), chars);
            Reply::error(500, ANALYZE_FAILED)
        }
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0`, and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn log_gateway_failure(event: &str, detail: &str, text_chars: Option<usize>) {
    eprintln!("error in sentiment analysis API: {detail}");
    diagnostics::log_failure("gateway", event, detail, text_chars);
}
