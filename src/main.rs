use anyhow::Result;
use clap::{Parser, Subcommand};

use darija_sentiment::{cli, config, diagnostics, gateway};

#[derive(Debug, Parser)]
#[command(name = "darija")]
#[command(about = "Darija sentiment analysis client and gateway")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the proxy gateway (POST /api/predict → classifier)
    Serve {
        /// Listen address, overrides gateway.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Analyze one piece of text and print the result
    Analyze {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
        /// Text to analyze
        #[arg(trailing_var_arg = true, required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Interactive session with in-memory history
    Session,
    /// Check config, classifier and gateway reachability
    Health,
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show recent diagnostic log entries
    Log {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        tail: usize,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.darija/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `gateway.timeout_ms 5000`
    Set { key: String, value: String },
    /// Reset ~/.darija/config.toml to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    let cfg = config::load();
    diagnostics::logger::set_enabled(cfg.logging.diagnostics);

    match app.command {
        Commands::Serve { bind } => {
            let mut gateway_cfg = cfg.gateway;
            if let Some(bind) = bind {
                gateway_cfg.bind = bind;
            }
            gateway::serve(&gateway_cfg)
        }
        Commands::Analyze { format, text } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_analyze(&text.join(" "), fmt)
        }
        Commands::Session => cli::run_session(),
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
        Commands::Log { tail, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_log(tail, fmt)
        }
    }
}
