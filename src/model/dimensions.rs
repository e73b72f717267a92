//! Viewport size as reported by the resize signal.

/// Width and height of the content viewport, in terminal cells.
///
/// Produced by the resize coordinator once per debounce window.
/// No history is kept: the last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportDimensions {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero (minimized or not yet laid out).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
