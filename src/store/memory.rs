//! In-process store implementation.

use super::ShellStore;
use crate::model::{RoutePath, Toast, ViewportDimensions};
use std::collections::HashMap;
use tracing::debug;

/// Store backed by plain fields.
///
/// Scroll memory grows with every distinct path visited and is never
/// pruned; the route space is small and finite.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dimensions: Option<ViewportDimensions>,
    offline: bool,
    toasts: Vec<Toast>,
    scroll_memory: HashMap<RoutePath, u32>,
    loaded: bool,
    loading_error: Option<String>,
    watchers_running: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            dimensions: None,
            offline: false,
            toasts: Vec::new(),
            scroll_memory: HashMap::new(),
            loaded: false,
            loading_error: None,
            watchers_running: true,
        }
    }
}

impl MemoryStore {
    /// Empty store: online, not yet loaded, watchers running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark initial loading as finished.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    /// Record the error that stopped initial loading.
    pub fn set_loading_error(&mut self, error: Option<String>) {
        self.loading_error = error;
    }

    /// Whether background watchers are still running.
    pub fn watchers_running(&self) -> bool {
        self.watchers_running
    }

    /// Every recorded scroll offset.
    pub fn scroll_memory(&self) -> &HashMap<RoutePath, u32> {
        &self.scroll_memory
    }
}

impl ShellStore for MemoryStore {
    fn set_dimensions(&mut self, dimensions: ViewportDimensions) {
        self.dimensions = Some(dimensions);
    }

    fn toggle_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn add_toast(&mut self, toast: Toast) {
        match self.toasts.iter_mut().find(|t| t.key == toast.key) {
            Some(existing) => *existing = toast,
            None => self.toasts.push(toast),
        }
    }

    fn remove_toast(&mut self, key: &str) {
        self.toasts.retain(|t| t.key != key);
    }

    fn clear_toasts(&mut self) {
        self.toasts.clear();
    }

    fn set_scroll_position(&mut self, offset: u32, path: &RoutePath) {
        debug!(%path, offset, "Scroll position recorded");
        self.scroll_memory.insert(path.clone(), offset);
    }

    fn stop_watchers(&mut self) {
        self.watchers_running = false;
    }

    fn scroll_position(&self, path: &RoutePath) -> Option<u32> {
        self.scroll_memory.get(path).copied()
    }

    fn is_offline(&self) -> bool {
        self.offline
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn loading_error(&self) -> Option<&str> {
        self.loading_error.as_deref()
    }

    fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    fn dimensions(&self) -> Option<ViewportDimensions> {
        self.dimensions
    }
}
