//! Viewport coordination state (pure).
//!
//! Every component here is a plain state machine driven by explicit
//! events and an explicit `now`. Nothing owns a timer or a thread; the
//! host loop in [`crate::view`] supplies both.

pub mod connectivity;
pub mod debounce;
pub mod layout_channel;
pub mod resize;
pub mod scroll_restoration;
pub mod shell;

pub use connectivity::{ConnectivityMonitor, ConnectivitySignal};
pub use debounce::{Debouncer, Edge};
pub use layout_channel::{
    LayoutSettingsChannel, VirtualList, VirtualListHandle, VirtualizationAccessor,
};
pub use resize::{ResizeCoordinator, DEFAULT_RESIZE_DEBOUNCE};
pub use scroll_restoration::{
    RestorationState, ScrollContainer, ScrollRestorationController, ScrollWrite,
    DEFAULT_SCROLL_DEBOUNCE,
};
pub use shell::{ShellTiming, ShellView, ViewportShell};
