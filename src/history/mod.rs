//! In-process navigation history.
//!
//! A stack of route paths with a cursor. Every move is broadcast to the
//! current listeners through an `mpsc` channel; listeners drain their
//! channel on their own schedule, so emitting never re-enters a listener.

use crate::model::{NavigationAction, NavigationEvent, RoutePath};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::debug;

/// Unsubscribe handle returned by [`MemoryHistory::listen`].
///
/// Dropping the handle detaches it too; the history prunes dead
/// listeners on its next emit.
#[derive(Debug)]
pub struct Subscription {
    events: Receiver<NavigationEvent>,
}

impl Subscription {
    /// Next queued event, if any.
    pub fn try_next(&self) -> Option<NavigationEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                debug!("History dropped: subscription drained");
                None
            }
        }
    }

    /// Every queued event, in arrival order.
    pub fn drain(&self) -> Vec<NavigationEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Detach from the history.
    pub fn unsubscribe(self) {
        debug!("History subscription detached");
    }
}

/// History stack with a cursor.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<RoutePath>,
    index: usize,
    listeners: Vec<Sender<NavigationEvent>>,
}

impl MemoryHistory {
    /// History with a single entry.
    pub fn new(initial: RoutePath) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            listeners: Vec::new(),
        }
    }

    /// Current path.
    pub fn location(&self) -> &RoutePath {
        &self.entries[self.index]
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the stack holds at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether `back` would move.
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Whether `forward` would move.
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Attach a listener.
    pub fn listen(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        Subscription { events: rx }
    }

    /// Listeners still attached as of the last emit.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Push `path` above the cursor, discarding any forward entries.
    pub fn push(&mut self, path: RoutePath) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.clone());
        self.index += 1;
        self.emit(NavigationEvent::new(path, NavigationAction::Push));
    }

    /// Replace the current entry with `path`.
    pub fn replace(&mut self, path: RoutePath) {
        self.entries[self.index] = path.clone();
        self.emit(NavigationEvent::new(path, NavigationAction::Replace));
    }

    /// Move the cursor by `delta`. Out-of-range moves do nothing and emit
    /// nothing. Returns whether the cursor moved.
    pub fn go(&mut self, delta: isize) -> bool {
        let Some(target) = self.index.checked_add_signed(delta) else {
            return false;
        };
        if delta == 0 || target >= self.entries.len() {
            return false;
        }
        self.index = target;
        self.emit(NavigationEvent::new(
            self.entries[target].clone(),
            NavigationAction::Pop,
        ));
        true
    }

    /// Move one entry back.
    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward.
    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    fn emit(&mut self, event: NavigationEvent) {
        debug!(path = %event.pathname, action = %event.action, "Navigation");
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
