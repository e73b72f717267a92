//! Error types for the vpshell binary.
//!
//! The coordination core itself is infallible: transient environment
//! failures (a missing scroll container, a detached listener, a dropped
//! virtualization handle) are skipped and logged at debug level, because the
//! next navigation or scroll event corrects the state. Only the outer shell
//! can fail, and every failure there is fatal.
//!
//! # Error Hierarchy
//!
//! - [`ShellError`] - Top-level error returned from `main`
//!   - `std::io::Error` - Terminal setup, event polling, drawing
//!   - [`ConfigError`] - Config file unreadable or invalid
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!   - [`InvalidRoutePath`] - Configured initial route is not a valid path
//!
//! Library fetch failures ([`crate::fetch::FetchError`]) are not in this
//! hierarchy: the binary records them in the store as a loading error and
//! keeps running.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::InvalidRoutePath;
use thiserror::Error;

/// Top-level error encompassing all fatal failure modes.
///
/// Domain-specific errors convert via `From`, so `?` works throughout
/// the binary's setup code.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Terminal or TUI rendering error.
    ///
    /// Raised by crossterm/ratatui during raw-mode setup, event polling or
    /// drawing. The terminal is restored before the error reaches the user.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The initial route is not a valid path.
    #[error("Invalid initial route: {0}")]
    Route(#[from] InvalidRoutePath),
}
