//! vpshell
//!
//! Viewport coordination for a single-page media browser: connectivity
//! toasts, debounced viewport size publishing, scroll-position restoration
//! on back/forward navigation, and a settings channel shared with a
//! virtualized list.
//!
//! The coordination core ([`state`]) is pure: components take explicit
//! events and an explicit `now`, and never own timers. The terminal host
//! in [`view`] is the impure shell that drives it.

pub mod config;
pub mod fetch;
pub mod history;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view;
