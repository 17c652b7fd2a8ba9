//! CLI command implementations.
//!
//! - `darija analyze TEXT` — one-shot analysis through the gateway
//! - `darija session` — interactive analysis with in-memory history
//! - `darija health` — config and connectivity check
//! - `darija config show|init|set|reset` — configuration management
//! - `darija log` — recent diagnostic log entries

pub mod render;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::PredictionClient;
use crate::config;
use crate::diagnostics::{self, DiagnosticEntry};
use crate::history::{EXAMPLE_PHRASES, Session};

/// Output format for commands that print data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// darija analyze
// ---------------------------------------------------------------------------

pub fn run_analyze(text: &str, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let client = PredictionClient::from_config(&cfg.client);

    let result = match client.analyze(text) {
        Ok(result) => result,
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).context("failed to serialize result")?;
            println!("{json}");
        }
        OutputFormat::Table => render::print_result(&result),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// darija session
// ---------------------------------------------------------------------------

const SESSION_HELP: &str = "\
Type Darija text and press Enter to analyze it.
  :history      show or hide history
  :select N     show history entry N again
  :clear        clear history
  :examples     list example phrases
  :example N    analyze example phrase N
  :help         this message
  :quit         leave";

pub fn run_session() -> Result<()> {
    let cfg = config::load();
    let client = PredictionClient::from_config(&cfg.client);

    println!("{}", "Darija Sentiment Session".bold().cyan());
    println!("endpoint: {}", client.endpoint().dimmed());
    println!("{SESSION_HELP}");

    let mut session = Session::new(client);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let input = line.trim();

        match input.split_once(' ').unwrap_or((input, "")) {
            (":quit" | ":q", _) => break,
            (":help", _) => println!("{SESSION_HELP}"),
            (":history", _) => {
                if session.toggle_history() {
                    render::print_history(session.history());
                } else {
                    println!("{}", "history hidden".dimmed());
                }
            }
            (":clear", _) => {
                session.clear_history();
                println!("{}", "history cleared".dimmed());
            }
            (":select", arg) => match parse_position(arg) {
                Some(i) => match session.select_entry(i) {
                    Some(result) => render::print_result(result),
                    None => println!("{}", "no such history entry".yellow()),
                },
                None => println!("{}", "usage: :select N".yellow()),
            },
            (":examples", _) => {
                for (i, phrase) in EXAMPLE_PHRASES.iter().enumerate() {
                    println!("  [{}] {}", i + 1, phrase);
                }
            }
            (":example", arg) => match parse_position(arg).and_then(|i| session.load_example(i)) {
                Some(phrase) => {
                    println!("{}", phrase.dimmed());
                    submit(&mut session);
                }
                None => println!("{}", "usage: :example N (see :examples)".yellow()),
            },
            (cmd, _) if cmd.starts_with(':') => {
                println!("{} {}", "unknown command".yellow(), cmd);
            }
            _ => {
                session.set_text(line.as_str());
                submit(&mut session);
            }
        }
    }

    Ok(())
}

fn submit(session: &mut Session<PredictionClient>) {
    println!("{}", "Analyzing...".dimmed());
    if session.submit().is_ok() {
        if let Some(result) = session.result() {
            render::print_result(result);
        }
    } else {
        let msg = session.error().unwrap_or(crate::error::RETRY_MESSAGE);
        println!("{}", msg.red());
    }
}

/// Parse a 1-based position as typed by the user into a 0-based index.
fn parse_position(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok()?.checked_sub(1)
}

// ---------------------------------------------------------------------------
// darija health
// ---------------------------------------------------------------------------

pub fn run_health() -> Result<()> {
    println!("{}", "darija Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.darija/config.toml found"
        } else {
            "not found (run `darija config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".darija.toml found"
        } else {
            "none (optional)"
        },
    );

    let cfg = config::load();

    let upstream_ok = is_reachable(&cfg.gateway.upstream_url);
    print_health_item(
        "Classifier",
        upstream_ok,
        &if upstream_ok {
            format!("reachable at {}", cfg.gateway.upstream_url)
        } else {
            format!("not reachable at {}", cfg.gateway.upstream_url)
        },
    );

    let gateway_ok = is_reachable(&cfg.client.endpoint);
    print_health_item(
        "Gateway",
        gateway_ok,
        &if gateway_ok {
            format!("reachable at {}", cfg.client.endpoint)
        } else {
            "not reachable (start it with `darija serve`)".to_string()
        },
    );

    let log_path = diagnostics::logger::diagnostics_log_path();
    let log_exists = log_path.as_ref().is_some_and(|p| p.exists());
    print_health_item(
        "Diagnostic log",
        cfg.logging.diagnostics,
        &match (cfg.logging.diagnostics, log_exists) {
            (false, _) => "disabled".to_string(),
            (true, true) => format!("{} entries", diagnostics::logger::read_all_entries().len()),
            (true, false) => "no failures logged yet".to_string(),
        },
    );

    Ok(())
}

/// Any HTTP answer counts as reachable; only transport failures do not.
fn is_reachable(url: &str) -> bool {
    let url = url.replace("://localhost", "://127.0.0.1");
    match ureq::get(&url).timeout(Duration::from_secs(2)).call() {
        Ok(_) | Err(ureq::Error::Status(..)) => true,
        Err(ureq::Error::Transport(_)) => false,
    }
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// darija config show | init | set | reset
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective darija Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    let path = config::set_config_value(key, value)?;
    println!("{} {} = {} ({})", "Set".green(), key, value, path.display());
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset to defaults:".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// darija log
// ---------------------------------------------------------------------------

pub fn run_log(tail: usize, format: OutputFormat) -> Result<()> {
    let entries = diagnostics::read_recent_entries(tail);

    if entries.is_empty() {
        println!("{}", "No diagnostic entries.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&entries).context("failed to serialize entries")?;
            println!("{json}");
        }
        OutputFormat::Table => print_log_table(&entries),
    }

    Ok(())
}

fn print_log_table(entries: &[DiagnosticEntry]) {
    println!(
        "{:<27} {:<8} {:<18} {}",
        "Time".bold(),
        "Side".bold(),
        "Event".bold(),
        "Detail".bold()
    );
    for e in entries {
        println!(
            "{:<27} {:<8} {:<18} {}",
            render::truncate(&e.timestamp, 25),
            e.component,
            e.event,
            e.detail
        );
    }
}
