//! Viewport shell: lifecycle and wiring of the coordination components.
//!
//! The shell owns the connectivity monitor, the resize coordinator, the
//! scroll restoration controller and the layout channel, and routes every
//! external event to the right one. It never owns a timer; the host loop
//! drives it:
//!
//! ```text
//! mount(history)
//! loop {
//!     wait until next_deadline() or an event
//!     handle_resize / handle_scroll / handle_connectivity
//!     tick(now)          // navigation + settled debounces + toast diff
//!     frame(container)   // once per render pass, before drawing
//! }
//! unmount()
//! ```

use super::connectivity::{ConnectivityMonitor, ConnectivitySignal};
use super::layout_channel::{LayoutSettingsChannel, VirtualizationAccessor};
use super::resize::{ResizeCoordinator, DEFAULT_RESIZE_DEBOUNCE};
use super::scroll_restoration::{
    ScrollContainer, ScrollRestorationController, ScrollWrite, DEFAULT_SCROLL_DEBOUNCE,
};
use crate::history::{MemoryHistory, Subscription};
use crate::model::{
    offline_toast, LayoutSettings, NavigationEvent, RoutePath, Toast, ViewportDimensions,
    OFFLINE_TOAST_KEY,
};
use crate::store::ShellStore;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Debounce windows used by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellTiming {
    /// Leading-edge window for resize events.
    pub resize_debounce: Duration,
    /// Trailing-edge window for scroll-memory writes.
    pub scroll_debounce: Duration,
}

impl Default for ShellTiming {
    fn default() -> Self {
        Self {
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
        }
    }
}

/// Read-only snapshot handed to the render tree.
#[derive(Debug)]
pub struct ShellView<'a> {
    /// Last published viewport size.
    pub dimensions: Option<ViewportDimensions>,
    /// Current layout settings.
    pub settings: &'a LayoutSettings,
    /// Whether a live virtual list is registered.
    pub has_virtual_list: bool,
    /// Whether a scroll restoration is in flight.
    pub is_restoring: bool,
    /// Path of the current view.
    pub current_path: &'a RoutePath,
    /// Offline flag from the store.
    pub offline: bool,
    /// Visible toasts.
    pub toasts: &'a [Toast],
    /// Loading indicator: not loaded, online, and no loading error.
    pub show_spinner: bool,
    /// Error that stopped initial loading.
    pub loading_error: Option<&'a str>,
    /// Layout channel revision, for change detection.
    pub revision: u64,
}

/// Composes the coordination components around a store.
#[derive(Debug)]
pub struct ViewportShell<S: ShellStore> {
    store: S,
    connectivity: ConnectivityMonitor,
    resize: ResizeCoordinator,
    restoration: ScrollRestorationController,
    channel: LayoutSettingsChannel,
    subscription: Option<Subscription>,
    current_path: RoutePath,
    last_offline: bool,
    mounted: bool,
}

impl<S: ShellStore> ViewportShell<S> {
    /// Create an unmounted shell around `store`.
    pub fn new(store: S, timing: ShellTiming) -> Self {
        let last_offline = store.is_offline();
        Self {
            store,
            connectivity: ConnectivityMonitor::new(),
            resize: ResizeCoordinator::new(timing.resize_debounce),
            restoration: ScrollRestorationController::new(timing.scroll_debounce),
            channel: LayoutSettingsChannel::default(),
            subscription: None,
            current_path: RoutePath::root(),
            last_offline,
            mounted: false,
        }
    }

    // ===== Lifecycle =====

    /// Start listening: connectivity monitor and history subscription.
    pub fn mount(&mut self, history: &mut MemoryHistory) {
        if self.mounted {
            debug!("Shell already mounted");
            return;
        }
        let offline = self.store.is_offline();
        self.connectivity.start(offline);
        self.subscription = Some(history.listen());
        self.current_path = history.location().clone();
        self.last_offline = offline;
        self.mounted = true;
        info!(path = %self.current_path, "Shell mounted");
    }

    /// Stop listening and release everything tied to the mount.
    ///
    /// Listeners are detached first. A queued scroll-memory write is flushed
    /// while the store is still live, then the store's watchers are stopped;
    /// a held resize is abandoned. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.connectivity.stop();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(write) = self.restoration.flush() {
            self.record(write);
        }
        self.restoration.cancel();
        self.resize.cancel();
        self.store.stop_watchers();
        self.mounted = false;
        info!("Shell unmounted");
    }

    /// Whether the shell is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ===== Environment events =====

    /// Raw connectivity signal.
    pub fn handle_connectivity(&mut self, signal: ConnectivitySignal) {
        if !self.mounted {
            return;
        }
        if let Some(offline) = self.connectivity.on_signal(signal) {
            self.store.toggle_offline(offline);
        }
        self.sync_store();
    }

    /// Raw viewport size observation.
    pub fn handle_resize(&mut self, dimensions: ViewportDimensions, now: Instant) {
        if !self.mounted {
            return;
        }
        if let Some(dims) = self.resize.on_resize(dimensions, now) {
            self.store.set_dimensions(dims);
        }
    }

    /// Raw scroll event from the content container.
    pub fn handle_scroll(&mut self, offset: u32, now: Instant) {
        if !self.mounted {
            return;
        }
        let displaced = self.restoration.on_scroll(
            offset,
            &self.current_path,
            self.channel.accessor(),
            now,
        );
        if let Some(write) = displaced {
            self.record(write);
        }
    }

    /// Process queued navigation events. Returns how many were handled.
    pub fn pump_navigation(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        let count = events.len();
        for event in events {
            self.handle_navigation(event);
        }
        count
    }

    /// Advance time: navigation, settled debounces, toast diff.
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        self.pump_navigation();
        if let Some(dims) = self.resize.poll(now) {
            self.store.set_dimensions(dims);
        }
        if let Some(write) = self.restoration.poll(now) {
            self.record(write);
        }
        self.sync_store();
    }

    /// Frame boundary. `container` is `None` when the content region is
    /// not currently mounted.
    pub fn frame(&mut self, container: Option<&mut dyn ScrollContainer>) {
        if !self.mounted {
            return;
        }
        self.restoration.on_frame(container);
    }

    /// Diff the store's offline flag against the last seen value and
    /// add or remove the offline toast on an edge.
    pub fn sync_store(&mut self) {
        let offline = self.store.is_offline();
        if offline == self.last_offline {
            return;
        }
        self.last_offline = offline;
        if offline {
            self.store.add_toast(offline_toast());
        } else {
            self.store.remove_toast(OFFLINE_TOAST_KEY);
        }
    }

    // ===== Descendant-facing channel =====

    /// Register the virtual list accessor. Last registration wins.
    pub fn register_accessor(&mut self, accessor: VirtualizationAccessor) {
        self.channel.register_accessor(accessor);
    }

    /// Shallow-merge settings.
    pub fn merge_settings(&mut self, partial: LayoutSettings) {
        self.channel.merge_settings(partial);
    }

    /// Layout channel.
    pub fn channel(&self) -> &LayoutSettingsChannel {
        &self.channel
    }

    // ===== Reads =====

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.resize.deadline(), self.restoration.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Path of the current view.
    pub fn current_path(&self) -> &RoutePath {
        &self.current_path
    }

    /// Whether a scroll restoration is in flight.
    pub fn is_restoring(&self) -> bool {
        self.restoration.is_restoring()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, mutably. Call [`sync_store`](Self::sync_store)
    /// after changing the offline flag directly.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Snapshot for the render tree.
    pub fn view(&self) -> ShellView<'_> {
        let offline = self.store.is_offline();
        let loading_error = self.store.loading_error();
        ShellView {
            dimensions: self.store.dimensions(),
            settings: self.channel.settings(),
            has_virtual_list: self.channel.has_live_list(),
            is_restoring: self.restoration.is_restoring(),
            current_path: &self.current_path,
            offline,
            toasts: self.store.toasts(),
            show_spinner: !self.store.is_loaded() && !offline && loading_error.is_none(),
            loading_error,
            revision: self.channel.revision(),
        }
    }

    fn handle_navigation(&mut self, event: NavigationEvent) {
        // Anything queued belongs to the view being left.
        if let Some(write) = self.restoration.flush() {
            self.record(write);
        }
        self.current_path = event.pathname.clone();
        let recorded = self.store.scroll_position(&event.pathname);
        self.restoration.on_navigation(&event, recorded);
    }

    fn record(&mut self, write: ScrollWrite) {
        self.store.set_scroll_position(write.offset, &write.path);
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
