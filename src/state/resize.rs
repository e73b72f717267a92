//! Viewport resize coalescing.

use super::debounce::Debouncer;
use crate::model::ViewportDimensions;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default resize debounce window.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces raw size-change events through a leading-edge debounce.
///
/// A continuously resizing viewport emits on its first event, then once
/// more with the final rectangle after the window of quiescence. Every
/// emission carries the rectangle of a single observed event, never an
/// aggregate.
#[derive(Debug, Clone)]
pub struct ResizeCoordinator {
    debouncer: Debouncer<ViewportDimensions>,
    last_emitted: Option<ViewportDimensions>,
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeCoordinator {
    /// Create a coordinator with the given debounce window.
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: Debouncer::leading(window),
            last_emitted: None,
        }
    }

    /// Feed a raw size observation. Returns the dimensions to publish now, if any.
    pub fn on_resize(&mut self, dimensions: ViewportDimensions, now: Instant) -> Option<ViewportDimensions> {
        let emitted = self.debouncer.push(dimensions, now);
        match emitted {
            Some(dims) => self.last_emitted = Some(dims),
            None => debug!(?dimensions, "Resize held until burst settles"),
        }
        emitted
    }

    /// Publish the settled dimensions once the burst has been quiet for the window.
    pub fn poll(&mut self, now: Instant) -> Option<ViewportDimensions> {
        let settled = self.debouncer.poll(now)?;
        self.last_emitted = Some(settled);
        Some(settled)
    }

    /// When the held rectangle settles, if one is held.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Most recently published dimensions.
    pub fn last_emitted(&self) -> Option<ViewportDimensions> {
        self.last_emitted
    }

    /// Abandon any held rectangle.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
