/// Diagnostic log write/read tests.
///
/// # Safety
///
/// `DARIJA_LOG_FILE` and the process-wide enable switch are both global, so
/// everything runs inside one `#[test]`.
mod common;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::time::Duration;

use common::spawn_upstream;
use darija_sentiment::diagnostics::logger::{self, read_recent_entries};
use darija_sentiment::gateway::proxy::{Upstream, handle_predict};
use darija_sentiment::{AnalyzeError, PredictionClient, Predictor};

const DEAD_CLIENT: &str = "http://127.0.0.1:1/api/predict";
const DEAD_UPSTREAM: &str = "http://127.0.0.1:1/predict";

unsafe fn set_env(key: &str, val: &str) {
    unsafe { std::env::set_var(key, val) }
}

unsafe fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}

#[test]
fn failures_are_logged_and_read_back() {
    let path = std::env::temp_dir().join(format!(
        "darija-diagnostics-{}.jsonl",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    unsafe { set_env("DARIJA_LOG_FILE", path.to_str().unwrap()) };
    assert_eq!(logger::diagnostics_log_path().as_deref(), Some(path.as_path()));

    let dead_upstream = Upstream::new(DEAD_UPSTREAM, Duration::from_secs(2));

    // --- disabled: failures leave no trace ---
    logger::set_enabled(false);
    let reply = handle_predict(r#"{"text":"x"}"#, &dead_upstream);
    assert_eq!(reply.status, 500);
    assert!(!path.exists());
    assert!(logger::read_all_entries().is_empty());

    // --- enabled: direct entry, client transport, client status, gateway ---
    logger::set_enabled(true);
    logger::log_failure("gateway", "bad_request", "oldest", None);

    let err = PredictionClient::new(DEAD_CLIENT, Duration::from_secs(2))
        .predict("زوين بزاف")
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Transport(_)));

    let failing = spawn_upstream(503, r#"{"error":"busy"}"#, Duration::ZERO);
    let err = PredictionClient::new(failing.url.as_str(), Duration::from_secs(2))
        .predict("x")
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Status(503)));

    // garbage in the middle of the file is skipped
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "not a json line").unwrap();
    writeln!(file, r#"{{"timestamp":"t"}}"#).unwrap();
    drop(file);

    let reply = handle_predict(r#"{"text":"مزيان"}"#, &dead_upstream);
    assert_eq!(reply.status, 500);
    assert!(!reply.body.contains("127.0.0.1"));

    let all = logger::read_all_entries();
    let events: Vec<_> = all.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(events, ["bad_request", "transport", "http_status", "upstream"]);

    // --- tail keeps the newest, oldest first ---
    let recent = read_recent_entries(3);
    assert_eq!(recent.len(), 3);

    let transport = &recent[0];
    assert_eq!(transport.component, "client");
    assert_eq!(transport.text_chars, Some(9));
    assert_eq!(transport.detail.matches(DEAD_CLIENT).count(), 1);
    assert!(!transport.detail.contains("زوين"));

    let status = &recent[1];
    assert_eq!(status.component, "client");
    assert!(status.detail.contains("503"));
    assert!(status.detail.contains(&failing.url));

    let gateway = &recent[2];
    assert_eq!(gateway.component, "gateway");
    assert_eq!(gateway.text_chars, Some(5));
    assert_eq!(gateway.detail.matches(DEAD_UPSTREAM).count(), 1);

    assert_eq!(read_recent_entries(100).len(), 4);
    assert!(read_recent_entries(0).is_empty());

    let _ = fs::remove_file(&path);
    unsafe { remove_env("DARIJA_LOG_FILE") };
}
