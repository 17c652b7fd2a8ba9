/// Configuration schema and defaults.
///
/// Defines the TOML-serializable configuration with three sections:
/// `[gateway]`, `[client]`, and `[logging]`. Every field has a built-in
/// default, so a config file only needs the keys it changes.
use serde::{Deserialize, Serialize};

/// Upstream classifier used when neither a config file nor `FLASK_API_URL`
/// names one.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:5000/predict";

/// Address the gateway listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Gateway endpoint the client posts to.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/predict";

/// Timeout for a single prediction request, either side of the gateway.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration, mapping `~/.darija/config.toml` and
/// `.darija.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarijaConfig {
    pub gateway: GatewayConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [gateway]
// ---------------------------------------------------------------------------

/// Proxy gateway settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// `host:port` the HTTP server binds.
    pub bind: String,
    /// Classifier `predict` URL requests are forwarded to.
    pub upstream_url: String,
    /// Upstream request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// [client]
// ---------------------------------------------------------------------------

/// Prediction client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the prediction endpoint (normally the gateway).
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write failure detail to `~/.darija/diagnostics.jsonl`.
    pub diagnostics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { diagnostics: true }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl DarijaConfig {
    /// Annotated default config file written by `darija config init`.
    pub fn default_toml() -> String {
        format!(
            r#"# darija configuration
#
# Precedence: built-in defaults < ~/.darija/config.toml < ./.darija.toml
# < environment variables (FLASK_API_URL, DARIJA_*).

[gateway]
# Address the proxy gateway listens on.
bind = "{DEFAULT_BIND}"
# Classifier predict endpoint. FLASK_API_URL overrides this.
upstream_url = "{DEFAULT_UPSTREAM_URL}"
# Upstream request timeout (ms).
timeout_ms = {DEFAULT_TIMEOUT_MS}

[client]
# Prediction endpoint the client posts to.
endpoint = "{DEFAULT_ENDPOINT}"
# Request timeout (ms).
timeout_ms = {DEFAULT_TIMEOUT_MS}

[logging]
# Record failure detail in ~/.darija/diagnostics.jsonl.
diagnostics = true
"#
        )
    }
}
