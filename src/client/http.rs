/// Blocking HTTP prediction client.
///
/// Posts `{ "text": ... }` with the synchronous `ureq` client and a bounded
/// timeout. Every failure is recorded in the diagnostic log with its raw
/// cause; callers only ever see an [`AnalyzeError`].
use std::time::Duration;

use serde::Serialize;

use super::{Predictor, RawPrediction};
use crate::config::ClientConfig;
use crate::diagnostics;
use crate::error::{AnalyzeError, Result};
use crate::metrics::AnalysisResult;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

/// Client for a `POST /predict`-style endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    endpoint: String,
    timeout: Duration,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.endpoint.trim(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate, predict and enrich `text`.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        super::analyze(self, text)
    }

    fn post(&self, text: &str) -> Result<RawPrediction> {
        let resp = ureq::post(&self.endpoint)
            .timeout(self.timeout)
            .send_json(PredictRequest { text })?;

        let body = resp
            .into_string()
            .map_err(|e| AnalyzeError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| AnalyzeError::Payload(e.to_string()))
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, text: &str) -> Result<RawPrediction> {
        self.post(text).inspect_err(|e| {
            diagnostics::log_failure(
                "client",
                failure_event(e),
                &failure_detail(e, &self.endpoint),
                Some(text.chars().count()),
            );
        })
    }
}

/// ureq transport messages already name the URL.
fn failure_detail(err: &AnalyzeError, endpoint: &str) -> String {
    match err {
        AnalyzeError::Transport(_) => err.to_string(),
        _ => format!("{err} ({endpoint})"),
    }
}

fn failure_event(err: &AnalyzeError) -> &'static str {
    match err {
        AnalyzeError::Status(_) => "http_status",
        AnalyzeError::Transport(_) => "transport",
        AnalyzeError::Payload(_) => "malformed_payload",
        AnalyzeError::Validation => "validation",
        AnalyzeError::Upstream(_) => "upstream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_endpoint_and_timeout() {
        let config = ClientConfig {
            endpoint: " http://10.0.0.5:3000/api/predict ".to_string(),
            timeout_ms: 1500,
        };
        let client = PredictionClient::from_config(&config);
        assert_eq!(client.endpoint(), "http://10.0.0.5:3000/api/predict");
        assert_eq!(client.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn request_body_is_text_only() {
        let json = serde_json::to_string(&PredictRequest { text: "مزيان" }).unwrap();
        assert_eq!(json, r#"{"text":"مزيان"}"#);
    }

    #[test]
    fn failure_detail_names_endpoint_once() {
        let endpoint = "http://127.0.0.1:1/api/predict";
        let status = failure_detail(&AnalyzeError::Status(502), endpoint);
        assert_eq!(
            status,
            "prediction endpoint responded with status 502 (http://127.0.0.1:1/api/predict)"
        );

        let transport = AnalyzeError::Transport(format!("{endpoint}: Connection Failed"));
        let detail = failure_detail(&transport, endpoint);
        assert_eq!(detail.matches(endpoint).count(), 1);
    }

    #[test]
    fn failure_events_are_distinct() {
        assert_eq!(failure_event(&AnalyzeError::Status(404)), "http_status");
        assert_eq!(
            failure_event(&AnalyzeError::Transport(String::new())),
            "transport"
        );
        assert_eq!(
            failure_event(&AnalyzeError::Payload(String::new())),
            "malformed_payload"
        );
    }
}
