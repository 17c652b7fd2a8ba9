use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

static ENABLED: AtomicBool = AtomicBool::new(true);

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// One line of `diagnostics.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub timestamp: String,
    /// Which side observed the failure: `"client"` or `"gateway"`.
    pub component: String,
    /// Short machine-friendly tag, e.g. `"upstream_status"`.
    pub event: String,
    /// Raw cause, never shown to the end user.
    pub detail: String,
    /// Length of the submitted text in characters, when known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text_chars: Option<usize>,
}

/// Turn diagnostic logging on or off for this process (`[logging]
/// diagnostics`).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Record a failure. Best-effort: I/O errors are swallowed so logging never
/// turns a handled failure into a crash.
pub fn log_failure(component: &str, event: &str, detail: &str, text_chars: Option<usize>) {
    if !is_enabled() {
        return;
    }

    let entry = DiagnosticEntry {
        timestamp: Utc::now().to_rfc3339(),
        component: component.to_string(),
        event: event.to_string(),
        detail: detail.to_string(),
        text_chars,
    };

    let _ = append_entry(&entry);
}

fn append_entry(entry: &DiagnosticEntry) -> Result<()> {
    let Some(path) = diagnostics_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read every entry, oldest first. Malformed lines are skipped; a missing
/// file yields an empty vec.
pub fn read_all_entries() -> Vec<DiagnosticEntry> {
    let Some(path) = diagnostics_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(std::result::Result::ok)
        .filter_map(|line| serde_json::from_str::<DiagnosticEntry>(&line).ok())
        .collect()
}

/// The last `n` entries, oldest first.
pub fn read_recent_entries(n: usize) -> Vec<DiagnosticEntry> {
    let mut entries = read_all_entries();
    let skip = entries.len().saturating_sub(n);
    entries.drain(..skip);
    entries
}

/// `DARIJA_LOG_FILE` if set, else `~/.darija/diagnostics.jsonl`.
pub fn diagnostics_log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("DARIJA_LOG_FILE")
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".darija").join("diagnostics.jsonl"))
}
