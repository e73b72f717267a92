//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors.

pub mod dimensions;
pub mod error;
pub mod key_action;
pub mod route;
pub mod settings;
pub mod toast;

// Re-export for convenience
pub use dimensions::ViewportDimensions;
pub use error::ShellError;
pub use key_action::KeyAction;
pub use route::{InvalidRoutePath, NavigationAction, NavigationEvent, RoutePath};
pub use settings::LayoutSettings;
pub use toast::{offline_toast, Toast, ToastIntent, OFFLINE_TOAST_KEY, OFFLINE_TOAST_MESSAGE};
