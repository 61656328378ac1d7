//! Configuration file loading with precedence handling.

use crate::model::ViewTab;
use crate::state::QueryResetPolicy;
use crate::view_state::LayoutKind;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CHAINVIEW_CONFIG";
/// Environment override for the initial tab.
pub const TAB_ENV: &str = "CHAINVIEW_TAB";
/// Environment override for the graph layout.
pub const LAYOUT_ENV: &str = "CHAINVIEW_LAYOUT";
/// Environment override for the query reset policy.
pub const QUERY_POLICY_ENV: &str = "CHAINVIEW_QUERY_POLICY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting holds a value outside its allowed set.
    #[error("Invalid value for {key} (from {origin}): {reason}")]
    InvalidValue {
        /// Setting name, e.g. `default_tab`.
        key: &'static str,
        /// Where the value came from: a file path or an env var name.
        origin: String,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/chainview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// JSON dataset to load instead of the built-in demo data.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Tab shown when entering the results screen (`flow`, `graph`, `list`).
    #[serde(default)]
    pub default_tab: Option<String>,

    /// Graph layout (`static`, `chain`).
    #[serde(default)]
    pub layout: Option<String>,

    /// Query handling on back (`keep`, `clear-on-back`, `replace-on-type`).
    #[serde(default)]
    pub query_policy: Option<String>,

    /// Disable colours.
    #[serde(default)]
    pub no_color: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Dataset file; `None` means the built-in demo data.
    pub dataset: Option<PathBuf>,
    /// Initial tab.
    pub default_tab: ViewTab,
    /// Graph layout.
    pub layout: LayoutKind,
    /// Query reset policy.
    pub query_policy: QueryResetPolicy,
    /// Colours disabled.
    pub no_color: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            default_tab: ViewTab::Flow,
            layout: LayoutKind::Static,
            query_policy: QueryResetPolicy::Keep,
            no_color: false,
            log_file_path: default_log_path(),
        }
    }
}

/// CLI flags that take precedence over every other source.
///
/// Each field is `Some` only when the user passed the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--dataset`
    pub dataset: Option<PathBuf>,
    /// `--tab`
    pub tab: Option<ViewTab>,
    /// `--layout`
    pub layout: Option<LayoutKind>,
    /// `--query-policy`
    pub query_policy: Option<QueryResetPolicy>,
    /// `--no-color`; `false` leaves the resolved setting alone.
    pub no_color: bool,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/chainview/chainview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("chainview").join("chainview.log")
    } else {
        PathBuf::from("chainview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/chainview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chainview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CHAINVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/chainview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_setting<T>(key: &'static str, origin: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// `origin` names the file in error messages.
///
/// # Errors
///
/// Returns `InvalidValue` if an enumerated setting holds an unknown value.
pub fn merge_config(
    config_file: Option<ConfigFile>,
    origin: &str,
) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let default_tab = match config.default_tab {
        Some(raw) => parse_setting("default_tab", origin, &raw)?,
        None => defaults.default_tab,
    };
    let layout = match config.layout {
        Some(raw) => parse_setting("layout", origin, &raw)?,
        None => defaults.layout,
    };
    let query_policy = match config.query_policy {
        Some(raw) => parse_setting("query_policy", origin, &raw)?,
        None => defaults.query_policy,
    };

    Ok(ResolvedConfig {
        dataset: config.dataset.or(defaults.dataset),
        default_tab,
        layout,
        query_policy,
        no_color: config.no_color.unwrap_or(defaults.no_color),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CHAINVIEW_TAB`: Override initial tab
/// - `CHAINVIEW_LAYOUT`: Override graph layout
/// - `CHAINVIEW_QUERY_POLICY`: Override query reset policy
///
/// # Errors
///
/// Returns `InvalidValue` if a set variable holds an unknown value.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(TAB_ENV) {
        config.default_tab = parse_setting("default_tab", TAB_ENV, &raw)?;
    }

    if let Ok(raw) = std::env::var(LAYOUT_ENV) {
        config.layout = parse_setting("layout", LAYOUT_ENV, &raw)?;
    }

    if let Ok(raw) = std::env::var(QUERY_POLICY_ENV) {
        config.query_policy = parse_setting("query_policy", QUERY_POLICY_ENV, &raw)?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dataset) = cli.dataset {
        config.dataset = Some(dataset);
    }

    if let Some(tab) = cli.tab {
        config.default_tab = tab;
    }

    if let Some(layout) = cli.layout {
        config.layout = layout;
    }

    if let Some(policy) = cli.query_policy {
        config.query_policy = policy;
    }

    // A flag can only turn colours off
    if cli.no_color {
        config.no_color = true;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
