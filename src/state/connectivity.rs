//! Online/offline signal deduplication.

use tracing::{debug, info};

/// Raw connectivity signal from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivitySignal {
    /// The environment reports a network connection.
    Online,
    /// The environment reports no network connection.
    Offline,
}

impl ConnectivitySignal {
    /// The offline flag this signal implies.
    pub fn is_offline(self) -> bool {
        self == Self::Offline
    }
}

/// Turns a noisy stream of connectivity signals into edges.
///
/// The signal is trusted as-is; no probing is done. Signals that arrive
/// while the monitor is stopped are dropped.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityMonitor {
    listening: bool,
    last_reported: Option<bool>,
}

impl ConnectivityMonitor {
    /// Create a stopped monitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the signal stream.
    ///
    /// `offline` is the value currently held by the store; a signal equal to
    /// it is not a transition.
    pub fn start(&mut self, offline: bool) {
        if self.listening {
            debug!("Connectivity monitor already started");
            return;
        }
        info!(offline, "Connectivity monitor started");
        self.listening = true;
        self.last_reported = Some(offline);
    }

    /// Detach from the signal stream. Safe to call repeatedly or before
    /// [`start`](Self::start).
    pub fn stop(&mut self) {
        if !self.listening {
            return;
        }
        info!("Connectivity monitor stopped");
        self.listening = false;
    }

    /// Whether the monitor is attached.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Last offline value reported (or seeded by `start`).
    pub fn last_reported(&self) -> Option<bool> {
        self.last_reported
    }

    /// Feed a raw signal.
    ///
    /// Returns `Some(offline)` only when the value differs from the last one
    /// reported.
    pub fn on_signal(&mut self, signal: ConnectivitySignal) -> Option<bool> {
        if !self.listening {
            debug!(?signal, "Connectivity signal ignored: monitor stopped");
            return None;
        }

        let offline = signal.is_offline();
        if self.last_reported == Some(offline) {
            debug!(offline, "Duplicate connectivity signal");
            return None;
        }

        self.last_reported = Some(offline);
        Some(offline)
    }
}
