//! Busy flag behind the full-screen loading overlay.
//!
//! DESIGN
//! ======
//! Every raise bumps a generation counter and aborts the previously
//! scheduled reset. A reset (timer expiry or [`BusyIndicator::finish`])
//! only clears the flag when its generation is still current, so a stale
//! operation can never turn the overlay back off early or back on later.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping timed raises are not reference counted: the last-scheduled
//! reset wins. If A asks for 2s and B then asks for 500ms, the overlay
//! clears after B's 500ms even though A's window has not elapsed.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_BUSY_DURATION: Duration = Duration::from_millis(1000);

/// Identifies one raise of the busy flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusyTicket(u64);

/// Shared handle to the busy flag. Clones observe and control the same flag.
#[derive(Clone, Debug)]
pub struct BusyIndicator {
    inner: Arc<BusyInner>,
}

#[derive(Debug)]
struct BusyInner {
    flag: watch::Sender<bool>,
    slot: Mutex<BusySlot>,
}

#[derive(Debug, Default)]
struct BusySlot {
    generation: u64,
    pending_reset: Option<JoinHandle<()>>,
}

impl BusyIndicator {
    #[must_use]
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self { inner: Arc::new(BusyInner { flag, slot: Mutex::new(BusySlot::default()) }) }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.inner.flag.borrow()
    }

    /// Subscribe to flag transitions (used by the overlay renderer).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.flag.subscribe()
    }

    /// Current generation. Bumped by every raise and by [`BusyIndicator::cancel`].
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.lock_slot().generation
    }

    /// Raise the flag and schedule it to clear after `duration`.
    ///
    /// Supersedes any earlier raise: its pending reset is aborted.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn show_for(&self, duration: Duration) -> BusyTicket {
        let mut slot = self.inner.lock_slot();
        let ticket = self.inner.raise(&mut slot);
        let inner = Arc::clone(&self.inner);
        slot.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            inner.clear_if_current(ticket);
        }));
        debug!(generation = ticket.0, ?duration, "busy raised for duration");
        ticket
    }

    /// Raise the flag for an operation of unknown length. Pair with [`BusyIndicator::finish`].
    pub fn begin(&self) -> BusyTicket {
        let mut slot = self.inner.lock_slot();
        let ticket = self.inner.raise(&mut slot);
        debug!(generation = ticket.0, "busy raised for operation");
        ticket
    }

    /// Clear the flag if `ticket` is still the latest raise.
    ///
    /// Returns `false` when the ticket was superseded or cancelled.
    pub fn finish(&self, ticket: BusyTicket) -> bool {
        self.inner.clear_if_current(ticket)
    }

    /// Drop every pending raise and clear the flag.
    pub fn cancel(&self) {
        let mut slot = self.inner.lock_slot();
        slot.generation += 1;
        if let Some(handle) = slot.pending_reset.take() {
            handle.abort();
        }
        self.inner.set(false);
        debug!(generation = slot.generation, "busy cancelled");
    }
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyInner {
    fn lock_slot(&self) -> std::sync::MutexGuard<'_, BusySlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raise(&self, slot: &mut BusySlot) -> BusyTicket {
        slot.generation += 1;
        if let Some(handle) = slot.pending_reset.take() {
            handle.abort();
        }
        self.set(true);
        BusyTicket(slot.generation)
    }

    fn clear_if_current(&self, ticket: BusyTicket) -> bool {
        let mut slot = self.lock_slot();
        if slot.generation != ticket.0 {
            return false;
        }
        slot.pending_reset = None;
        self.set(false);
        true
    }

    fn set(&self, value: bool) {
        self.flag.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }
}

#[cfg(test)]
#[path = "busy_test.rs"]
mod tests;
