//! Route paths and navigation events.

use std::fmt;
use thiserror::Error;

/// Error returned when a route path fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRoutePath {
    /// The path was an empty string.
    #[error("route path is empty")]
    Empty,

    /// The path did not start with `/`.
    #[error("route path must start with '/': {0:?}")]
    NotAbsolute(String),
}

/// Absolute path of a view, e.g. `/album/1`.
///
/// Keys the scroll memory. Raw construction is not exported; use
/// [`RoutePath::new`] or [`RoutePath::root`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(String);

impl RoutePath {
    /// Smart constructor: the path must be non-empty and start with `/`.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRoutePath> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidRoutePath::Empty);
        }
        if !raw.starts_with('/') {
            return Err(InvalidRoutePath::NotAbsolute(raw));
        }
        Ok(Self(raw))
    }

    /// The root view `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Borrow the raw path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the history stack moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// A new entry was pushed on top of the stack.
    Push,
    /// The current entry was replaced in place.
    Replace,
    /// The cursor moved to an existing entry (back or forward).
    Pop,
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
            Self::Pop => "POP",
        };
        f.write_str(name)
    }
}

/// A single move of the history stack. Ephemeral, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Path that is current after the move.
    pub pathname: RoutePath,
    /// Kind of move.
    pub action: NavigationAction,
}

impl NavigationEvent {
    /// Create a navigation event.
    pub fn new(pathname: RoutePath, action: NavigationAction) -> Self {
        Self { pathname, action }
    }
}
