//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling (raw scroll gestures on the content container)
    /// Scroll content up by one row. Default: k/↑
    ScrollUp,
    /// Scroll content down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the view. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the view. Default: G/End
    ScrollToBottom,

    // Navigation
    /// Open the row at the top of the viewport (PUSH). Default: Enter/l
    Open,
    /// Open the row at the top of the viewport in place (REPLACE). Default: r
    ReplaceWith,
    /// Go back one history entry (POP). Default: Backspace/b/h
    Back,
    /// Go forward one history entry (POP). Default: f
    Forward,
    /// Go to the home view (PUSH). Default: ~
    Home,

    // Shell
    /// Flip the simulated online/offline signal. Default: o
    ToggleConnectivity,
    /// Dismiss every toast. Default: c
    ClearToasts,
    /// Toggle the compact row layout via a settings merge. Default: s
    ToggleCompact,
    /// Quit. Default: q
    Quit,
}
