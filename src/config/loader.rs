//! Configuration file loading with precedence handling.

use crate::model::RoutePath;
use crate::state::ShellTiming;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VPSHELL_CONFIG";
/// Environment override for the resize window, in milliseconds.
pub const RESIZE_DEBOUNCE_ENV: &str = "VPSHELL_RESIZE_DEBOUNCE_MS";
/// Environment override for the scroll-memory window, in milliseconds.
pub const SCROLL_DEBOUNCE_ENV: &str = "VPSHELL_SCROLL_DEBOUNCE_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An override variable does not hold a millisecond count.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Value found.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/vpshell/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Leading-edge resize window in milliseconds.
    #[serde(default)]
    pub resize_debounce_ms: Option<u64>,

    /// Trailing-edge scroll-memory window in milliseconds.
    #[serde(default)]
    pub scroll_debounce_ms: Option<u64>,

    /// Render pass interval in milliseconds.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Route opened on startup.
    #[serde(default)]
    pub initial_route: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// URL of the liked-tracks collection document.
    #[serde(default)]
    pub library_url: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Leading-edge resize window in milliseconds.
    pub resize_debounce_ms: u64,
    /// Trailing-edge scroll-memory window in milliseconds.
    pub scroll_debounce_ms: u64,
    /// Render pass interval in milliseconds.
    pub frame_interval_ms: u64,
    /// Route opened on startup, unvalidated.
    pub initial_route: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// URL of the liked-tracks collection document.
    pub library_url: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 500,
            scroll_debounce_ms: 100,
            frame_interval_ms: 16,
            initial_route: "/".to_string(),
            log_file_path: default_log_path(),
            library_url: None,
        }
    }
}

impl ResolvedConfig {
    /// Debounce windows for the viewport shell.
    pub fn shell_timing(&self) -> ShellTiming {
        ShellTiming {
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
            scroll_debounce: Duration::from_millis(self.scroll_debounce_ms),
        }
    }

    /// Render pass interval.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Validated initial route.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured route is empty or relative.
    pub fn initial_route(&self) -> Result<RoutePath, crate::model::InvalidRoutePath> {
        RoutePath::new(self.initial_route.as_str())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vpshell/vpshell.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current
/// directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vpshell").join("vpshell.log")
    } else {
        PathBuf::from("vpshell.log")
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
/// Returns `~/.config/vpshell/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vpshell").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VPSHELL_CONFIG` environment variable
/// 3. Default path `~/.config/vpshell/config.toml`
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
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `VPSHELL_RESIZE_DEBOUNCE_MS` and `VPSHELL_SCROLL_DEBOUNCE_MS`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] when a set variable is not a
/// non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(ms) = env_millis(RESIZE_DEBOUNCE_ENV)? {
        config.resize_debounce_ms = ms;
    }
    if let Some(ms) = env_millis(SCROLL_DEBOUNCE_ENV)? {
        config.scroll_debounce_ms = ms;
    }
    Ok(config)
}

fn env_millis(var: &str) -> Result<Option<u64>, ConfigError> {
    let Ok(value) = std::env::var(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            var: var.to_string(),
            value,
        })
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        resize_debounce_ms: config
            .resize_debounce_ms
            .unwrap_or(defaults.resize_debounce_ms),
        scroll_debounce_ms: config
            .scroll_debounce_ms
            .unwrap_or(defaults.scroll_debounce_ms),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        initial_route: config.initial_route.unwrap_or(defaults.initial_route),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        library_url: config.library_url.or(defaults.library_url),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    route_override: Option<String>,
    library_override: Option<String>,
) -> ResolvedConfig {
    if let Some(route) = route_override {
        config.initial_route = route;
    }

    if let Some(library) = library_override {
        config.library_url = Some(library);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
