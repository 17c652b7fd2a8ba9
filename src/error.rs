//! Error taxonomy for an analysis round trip.
//!
//! Validation failures are resolved locally before any I/O. Network and
//! upstream failures carry their raw cause for the diagnostic log, but only
//! [`AnalyzeError::user_message`] is meant for the person at the keyboard.
use thiserror::Error;

/// Shown for any failure past input validation.
pub const RETRY_MESSAGE: &str = "Error analyzing text. Please try again.";

/// Shown when the submitted text is empty after trimming.
pub const EMPTY_TEXT_MESSAGE: &str = "Please enter some text to analyze";

#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Input was empty or whitespace-only. No request was made.
    #[error("no text to analyze")]
    Validation,

    /// The prediction endpoint answered with a non-2xx status.
    #[error("prediction endpoint responded with status {0}")]
    Status(u16),

    /// Connection, DNS, timeout or read failure talking to the endpoint.
    #[error("prediction request failed: {0}")]
    Transport(String),

    /// The endpoint answered 2xx but the body was not a prediction.
    #[error("malformed prediction payload: {0}")]
    Payload(String),

    /// Gateway-side failure reaching the classifier.
    #[error("upstream classifier failed: {0}")]
    Upstream(String),
}

impl AnalyzeError {
    /// True for failures that happened on the wire (the `NetworkError`
    /// class): bad status, transport failure, or unparseable payload.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Status(_) | Self::Transport(_) | Self::Payload(_))
    }

    /// The message surfaced to the end user. Never includes raw detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation => EMPTY_TEXT_MESSAGE,
            _ => RETRY_MESSAGE,
        }
    }
}

impl From<ureq::Error> for AnalyzeError {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::Status(code, _) => AnalyzeError::Status(code),
            ureq::Error::Transport(t) => AnalyzeError::Transport(t.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
