//! Styling for the shell chrome and toasts.

use crate::model::ToastIntent;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set,
/// whatever its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ShellStyles =====

/// Styles for every themed element of the screen.
#[derive(Debug, Clone, Copy)]
pub struct ShellStyles {
    colors: bool,
}

impl ShellStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles with an explicit color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Header bar.
    pub fn header(&self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// Status bar; dimmed differently while offline.
    pub fn status(&self, offline: bool) -> Style {
        if offline {
            self.fg(Color::Yellow)
        } else {
            self.fg(Color::Gray)
        }
    }

    /// Secondary row line.
    pub fn detail(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Liked-track marker.
    pub fn liked(&self) -> Style {
        self.fg(Color::Magenta)
    }

    /// Loading error text.
    pub fn error(&self) -> Style {
        self.fg(Color::Red)
    }

    /// Border and text of a toast.
    pub fn toast(&self, intent: ToastIntent) -> Style {
        match intent {
            ToastIntent::None => self.fg(Color::White),
            ToastIntent::Primary => self.fg(Color::Blue),
            ToastIntent::Success => self.fg(Color::Green),
            ToastIntent::Warning => self.fg(Color::Yellow),
            ToastIntent::Danger => self.fg(Color::Red),
        }
    }
}

impl Default for ShellStyles {
    fn default() -> Self {
        Self::new()
    }
}
