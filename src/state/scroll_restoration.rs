//! Scroll-position capture and replay across navigation.
//!
//! # State machine
//!
//! ```text
//!            POP (idle)              frame               frame
//!   Idle ─────────────────▶ Scheduled ─────▶ Issued ─────────────▶ Idle
//!                              │   scroll_to(target)    release guard
//!                              │
//!                              ├── frame, no container ──────────▶ Idle
//!                              └── navigation to another path ───▶ Idle
//! ```
//!
//! `Scheduled` and `Issued` together form the restoring state: the guard is
//! held from the moment a restoration is initiated until one full frame
//! after the scroll command was issued. Scroll events the container
//! produces in between (including the one caused by the command itself) are
//! forwarded to the virtual list but never recorded, so the scroll memory
//! cannot pick up a mid-flight offset.
//!
//! Only `POP` restores. `PUSH` and `REPLACE` leave the container where it
//! is; the view being mounted decides whether to reset.
//!
//! A scheduled restoration belongs to the path it was scheduled for. Any
//! navigation to another path before the command goes out drops it: that
//! view is gone, and its offset must not land on the next one.

use super::debounce::Debouncer;
use super::layout_channel::VirtualizationAccessor;
use crate::model::{NavigationAction, NavigationEvent, RoutePath};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default trailing window for scroll-memory writes.
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

/// The scrollable content region.
pub trait ScrollContainer {
    /// Imperatively move the container to `offset`.
    fn scroll_to(&mut self, offset: u32);
}

/// Restoration guard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RestorationState {
    /// No restoration in flight.
    #[default]
    Idle,
    /// A restoration was initiated; the command goes out on the next frame.
    Scheduled {
        /// View the offset belongs to.
        path: RoutePath,
        /// Offset to restore.
        target: u32,
    },
    /// The command went out; the guard releases on the next frame.
    Issued {
        /// View that was restored.
        path: RoutePath,
        /// Offset that was restored.
        target: u32,
    },
}

impl RestorationState {
    /// True while the guard is held.
    pub fn is_restoring(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Path of the restoration in flight.
    pub fn path(&self) -> Option<&RoutePath> {
        match self {
            Self::Idle => None,
            Self::Scheduled { path, .. } | Self::Issued { path, .. } => Some(path),
        }
    }
}

/// A debounced scroll-memory write. The path is captured when the scroll
/// event happens, so a write always lands under the view that was scrolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollWrite {
    /// Recorded offset.
    pub offset: u32,
    /// View the offset belongs to.
    pub path: RoutePath,
}

/// Replays recorded offsets on back/forward navigation and records live scrolling.
#[derive(Debug, Clone)]
pub struct ScrollRestorationController {
    state: RestorationState,
    writes: Debouncer<ScrollWrite>,
}

impl Default for ScrollRestorationController {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DEBOUNCE)
    }
}

impl ScrollRestorationController {
    /// Create a controller whose memory writes use the given trailing window.
    pub fn new(write_window: Duration) -> Self {
        Self {
            state: RestorationState::Idle,
            writes: Debouncer::trailing(write_window),
        }
    }

    /// Current guard state.
    pub fn state(&self) -> &RestorationState {
        &self.state
    }

    /// True while a restoration is in flight.
    pub fn is_restoring(&self) -> bool {
        self.state.is_restoring()
    }

    /// React to a history move.
    ///
    /// `recorded` is the scroll memory entry for the event's path; absent
    /// means the view starts at the top. Returns whether a restoration was
    /// initiated.
    ///
    /// A restoration still waiting for its frame is dropped when the history
    /// moves to another path. Once the command is out, the guard holds until
    /// its release frame and further POPs are ignored.
    pub fn on_navigation(&mut self, event: &NavigationEvent, recorded: Option<u32>) -> bool {
        let stale = matches!(
            &self.state,
            RestorationState::Scheduled { path, .. } if *path != event.pathname
        );
        if stale {
            if let RestorationState::Scheduled { path, target } = std::mem::take(&mut self.state) {
                debug!(
                    scheduled = %path,
                    target,
                    path = %event.pathname,
                    "Restoration dropped: navigated away before the frame"
                );
            }
        }

        match event.action {
            NavigationAction::Push | NavigationAction::Replace => false,
            NavigationAction::Pop if self.is_restoring() => {
                debug!(path = %event.pathname, "POP ignored: restoration in flight");
                false
            }
            NavigationAction::Pop => {
                let target = recorded.unwrap_or(0);
                debug!(path = %event.pathname, target, "Restoration scheduled");
                self.state = RestorationState::Scheduled {
                    path: event.pathname.clone(),
                    target,
                };
                true
            }
        }
    }

    /// Frame boundary.
    ///
    /// Issues the pending scroll command or releases the guard, depending on
    /// the phase. Returns the offset if a command was issued on this frame.
    /// A missing container skips the restoration for good.
    pub fn on_frame(&mut self, container: Option<&mut dyn ScrollContainer>) -> Option<u32> {
        match std::mem::take(&mut self.state) {
            RestorationState::Idle => None,
            RestorationState::Scheduled { path, target } => match container {
                Some(container) => {
                    container.scroll_to(target);
                    self.state = RestorationState::Issued { path, target };
                    Some(target)
                }
                None => {
                    debug!(%path, target, "Restoration skipped: no scroll container");
                    None
                }
            },
            RestorationState::Issued { path, target } => {
                debug!(%path, target, "Restoration complete");
                None
            }
        }
    }

    /// Raw scroll event from the container while `path` is current.
    ///
    /// The offset always goes to the virtual list. Outside a restoration it
    /// is also queued for the scroll memory; a queued write for a different
    /// path is released first and returned so it is not lost.
    pub fn on_scroll(
        &mut self,
        offset: u32,
        path: &RoutePath,
        accessor: Option<&VirtualizationAccessor>,
        now: Instant,
    ) -> Option<ScrollWrite> {
        if let Some(accessor) = accessor {
            accessor.scroll_to(offset);
        }

        if self.is_restoring() {
            debug!(offset, "Scroll not recorded: restoration in flight");
            return None;
        }

        let displaced = match self.writes.pending() {
            Some(pending) if pending.path != *path => self.writes.flush(),
            _ => None,
        };
        self.writes.push(
            ScrollWrite {
                offset,
                path: path.clone(),
            },
            now,
        );
        displaced
    }

    /// Release the queued write once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollWrite> {
        self.writes.poll(now)
    }

    /// Release the queued write immediately.
    pub fn flush(&mut self) -> Option<ScrollWrite> {
        self.writes.flush()
    }

    /// When the queued write becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.writes.deadline()
    }

    /// Drop the queued write and any restoration in flight.
    pub fn cancel(&mut self) {
        self.writes.cancel();
        self.state = RestorationState::Idle;
    }
}

#[cfg(test)]
#[path = "scroll_restoration_tests.rs"]
mod tests;
