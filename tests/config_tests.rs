/// Configuration precedence tests.
///
/// # Safety
///
/// `std::env::set_var` / `remove_var` are `unsafe` in Rust 2024. All env
/// mutation happens inside one `#[test]` so nothing in this binary reads the
/// variables concurrently.
use darija_sentiment::config::{self, DarijaConfig, schema};

unsafe fn set_env(key: &str, val: &str) {
    unsafe { std::env::set_var(key, val) }
}

unsafe fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}

#[test]
fn env_overrides() {
    // --- FLASK_API_URL replaces the upstream ---
    unsafe { set_env("FLASK_API_URL", "http://model.internal:5000/predict") };
    let cfg = config::load();
    assert_eq!(cfg.gateway.upstream_url, "http://model.internal:5000/predict");

    // --- empty FLASK_API_URL is ignored ---
    unsafe { set_env("FLASK_API_URL", "") };
    let cfg = config::load();
    assert!(!cfg.gateway.upstream_url.is_empty());
    unsafe { remove_env("FLASK_API_URL") };

    // --- timeout applies to both sides ---
    unsafe { set_env("DARIJA_TIMEOUT_MS", "1234") };
    let cfg = config::load();
    assert_eq!(cfg.gateway.timeout_ms, 1234);
    assert_eq!(cfg.client.timeout_ms, 1234);

    // --- unparseable timeout is ignored ---
    unsafe { set_env("DARIJA_TIMEOUT_MS", "fast") };
    let cfg = config::load();
    assert_ne!(cfg.client.timeout_ms, 0);
    unsafe { remove_env("DARIJA_TIMEOUT_MS") };

    // --- endpoint and bind ---
    unsafe { set_env("DARIJA_ENDPOINT", "http://10.1.1.1:3000/api/predict") };
    unsafe { set_env("DARIJA_BIND", "0.0.0.0:8080") };
    let cfg = config::load();
    assert_eq!(cfg.client.endpoint, "http://10.1.1.1:3000/api/predict");
    assert_eq!(cfg.gateway.bind, "0.0.0.0:8080");
    unsafe { remove_env("DARIJA_ENDPOINT") };
    unsafe { remove_env("DARIJA_BIND") };

    // --- diagnostics switch ---
    unsafe { set_env("DARIJA_DIAGNOSTICS", "off") };
    assert!(!config::load().logging.diagnostics);
    unsafe { set_env("DARIJA_DIAGNOSTICS", "1") };
    assert!(config::load().logging.diagnostics);
    unsafe { remove_env("DARIJA_DIAGNOSTICS") };
}

#[test]
fn default_toml_matches_built_in_defaults() {
    let parsed: DarijaConfig = toml::from_str(&DarijaConfig::default_toml()).unwrap();
    assert_eq!(parsed, DarijaConfig::default());
    assert_eq!(parsed.gateway.upstream_url, schema::DEFAULT_UPSTREAM_URL);
}
