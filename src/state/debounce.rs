//! Debounce primitive with a configurable edge policy.
//!
//! Time is passed in explicitly. The debouncer never sleeps and owns no
//! timer: the host loop asks for [`Debouncer::deadline`], waits until then
//! (or until another event arrives), and calls [`Debouncer::poll`].

use std::time::{Duration, Instant};

/// Which end of a burst produces the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// First event of a burst fires immediately. Later events in the burst are
    /// held; once the window elapses the last held event settles.
    Leading,
    /// Nothing fires until the window elapses with no new event; then the last
    /// event of the burst fires.
    Trailing,
}

/// Collapses a burst of values into at most one effect per edge.
///
/// A burst is a run of pushes where each push arrives less than `window`
/// after the previous one. The window restarts on every push, so a
/// continuous stream keeps the burst open indefinitely.
///
/// # Guarantees
/// - `Trailing`: a burst yields exactly one value from [`poll`](Self::poll),
///   equal to the last pushed value.
/// - `Leading`: a burst yields its first value from [`push`](Self::push).
///   If anything else was pushed during the burst, `poll` yields the last
///   value once the window elapses. Intermediate values never surface.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    edge: Edge,
    window: Duration,
    last_push: Option<Instant>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer.
    pub fn new(edge: Edge, window: Duration) -> Self {
        Self {
            edge,
            window,
            last_push: None,
            pending: None,
        }
    }

    /// Shorthand for `Debouncer::new(Edge::Leading, window)`.
    pub fn leading(window: Duration) -> Self {
        Self::new(Edge::Leading, window)
    }

    /// Shorthand for `Debouncer::new(Edge::Trailing, window)`.
    pub fn trailing(window: Duration) -> Self {
        Self::new(Edge::Trailing, window)
    }

    /// Edge policy.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a value.
    ///
    /// Returns the value itself only for a leading debouncer at the start of
    /// a burst. Every other value is held until [`poll`](Self::poll).
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        let in_burst = self.in_burst(now);
        self.last_push = Some(now);

        if self.edge == Edge::Leading && !in_burst {
            // A newer value supersedes anything still waiting to settle.
            self.pending = None;
            return Some(value);
        }

        self.pending = Some(value);
        None
    }

    /// Release the held value if the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_push = None;
        self.pending.take()
    }

    /// When the held value will settle. `None` if nothing is held.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_push.map(|t| t + self.window)
    }

    /// True while a value is held.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Borrow the held value.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Release the held value now, regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.last_push = None;
        self.pending.take()
    }

    /// Drop the held value and end the burst.
    pub fn cancel(&mut self) {
        self.last_push = None;
        self.pending = None;
    }

    fn in_burst(&self, now: Instant) -> bool {
        self.last_push
            .is_some_and(|t| now.saturating_duration_since(t) < self.window)
    }
}
