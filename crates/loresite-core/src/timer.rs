//! Cancellable settle timer
//!
//! Holds at most one pending timer guard. Re-arming drops the previous guard
//! before the new timer is scheduled, so only the most recent arm can fire.
//! Each arm is tagged with a generation; a fire carrying an older generation
//! is refused even if the platform failed to cancel it.

use std::time::Duration;

#[derive(Debug)]
pub struct SettleTimer<G> {
    window: Duration,
    generation: u64,
    pending: Option<G>,
}

impl<G> SettleTimer<G> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel any pending timer and schedule a new one through `schedule`.
    ///
    /// Returns the generation the new timer carries.
    pub fn rearm(&mut self, schedule: impl FnOnce(Duration, u64) -> G) -> u64 {
        drop(self.pending.take());
        self.generation += 1;
        self.pending = Some(schedule(self.window, self.generation));
        self.generation
    }

    /// Accept a fire for `generation`. True only for the live arm.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending.is_some() && generation == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
