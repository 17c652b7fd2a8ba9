//! Diagnostic logging.
//!
//! Failure detail that must not reach the end user (upstream status codes,
//! transport errors, malformed payloads) is appended to a JSONL file so it
//! can be inspected later with `darija log`.
//!
//! Log file: `~/.darija/diagnostics.jsonl` (override with `DARIJA_LOG_FILE`).

pub mod logger;

pub use logger::{DiagnosticEntry, log_failure, read_recent_entries};
