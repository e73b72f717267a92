//! The shared application store, as seen by the coordination core.
//!
//! The core treats the store as an opaque state container: it only calls the
//! actions and synchronous reads on [`ShellStore`]. Each field has exactly one
//! writer (dimensions: resize coordinator; offline flag: connectivity
//! monitor; scroll memory: restoration controller; offline toast: shell).

pub mod memory;

pub use memory::MemoryStore;

use crate::model::{RoutePath, Toast, ViewportDimensions};

/// Actions and reads the shell needs from the application store.
pub trait ShellStore {
    /// Publish the settled viewport size.
    fn set_dimensions(&mut self, dimensions: ViewportDimensions);

    /// Set the offline flag.
    fn toggle_offline(&mut self, offline: bool);

    /// Add a toast, replacing any toast with the same key.
    fn add_toast(&mut self, toast: Toast);

    /// Remove the toast with `key`, if present.
    fn remove_toast(&mut self, key: &str);

    /// Remove every toast.
    fn clear_toasts(&mut self);

    /// Record the scroll offset of `path`.
    fn set_scroll_position(&mut self, offset: u32, path: &RoutePath);

    /// Stop background watchers owned by the store.
    fn stop_watchers(&mut self);

    /// Last recorded scroll offset of `path`.
    fn scroll_position(&self, path: &RoutePath) -> Option<u32>;

    /// Current offline flag.
    fn is_offline(&self) -> bool;

    /// Whether initial application data finished loading.
    fn is_loaded(&self) -> bool;

    /// Error that stopped initial loading, if any.
    fn loading_error(&self) -> Option<&str>;

    /// Visible toasts, oldest first.
    fn toasts(&self) -> &[Toast];

    /// Last published viewport size.
    fn dimensions(&self) -> Option<ViewportDimensions>;
}
