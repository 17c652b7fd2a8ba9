/// Configuration system for darija.
///
/// Layers, lowest precedence first:
///
/// 1. **Built-in defaults** — [`schema::DarijaConfig::default()`]
/// 2. **User global config** — `~/.darija/config.toml`
/// 3. **Project local config** — `.darija.toml` in the current directory
/// 4. **Environment variables** — `FLASK_API_URL` and `DARIJA_*`
///
/// File layers are merged key by key, so a project file that only sets
/// `gateway.bind` keeps the upstream URL from the global file.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::{ClientConfig, DarijaConfig, GatewayConfig, LoggingConfig};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Malformed config files are skipped rather than reported; the built-in
/// defaults always produce a usable config.
pub fn load() -> DarijaConfig {
    let mut merged = defaults_as_value();

    for path in [global_config_path(), project_config_path()] {
        if let Some(layer) = load_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    let mut config: DarijaConfig = merged.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);
    config
}

fn defaults_as_value() -> toml::Value {
    toml::Value::try_from(DarijaConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Read a TOML file as a raw value tree. `None` if absent or malformed.
fn load_toml_value(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Deep-merge `overlay` into `base`. Tables merge recursively; any other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.darija/config.toml`
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".darija").join("config.toml"))
}

/// `.darija.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".darija.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// - `FLASK_API_URL` — upstream classifier URL
/// - `DARIJA_BIND` — gateway listen address
/// - `DARIJA_ENDPOINT` — client prediction endpoint
/// - `DARIJA_TIMEOUT_MS` — request timeout for both gateway and client
/// - `DARIJA_DIAGNOSTICS` — diagnostic log on/off
fn apply_env_overrides(config: &mut DarijaConfig) {
    if let Ok(val) = std::env::var("FLASK_API_URL")
        && !val.is_empty()
    {
        config.gateway.upstream_url = val;
    }
    if let Ok(val) = std::env::var("DARIJA_BIND")
        && !val.is_empty()
    {
        config.gateway.bind = val;
    }
    if let Ok(val) = std::env::var("DARIJA_ENDPOINT")
        && !val.is_empty()
    {
        config.client.endpoint = val;
    }
    if let Ok(val) = std::env::var("DARIJA_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.gateway.timeout_ms = ms;
        config.client.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("DARIJA_DIAGNOSTICS") {
        config.logging.diagnostics = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
pub(crate) fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.darija/config.toml`.
///
/// Fails if the file exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.darija/ directory")?;
    }

    fs::write(&path, DarijaConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a dotted key (e.g. `gateway.timeout_ms`) in the global config file,
/// creating the file from defaults if needed.
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config file")?
    } else {
        defaults_as_value()
    };

    set_toml_value(&mut root, key, value)?;

    // Refuse to write something the loader would silently discard.
    let _: DarijaConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(path)
}

/// Set a value in a TOML tree using a dotted key path. The new value takes
/// the type of the value it replaces; unknown keys are rejected.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (section_path, leaf) = key
        .rsplit_once('.')
        .with_context(|| format!("config key must be dotted (section.key), got '{key}'"))?;

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' cannot be set from the command line"),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Overwrite the global config with defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
