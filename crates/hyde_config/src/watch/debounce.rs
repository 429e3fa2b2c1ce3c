//! Debounce state owned by a watch loop.

use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

/// Tracks the last accepted modification time.
///
/// An event is accepted when more than `interval` has passed between the
/// stored timestamp and `now`; accepting stores the file's modification time.
/// The compare and the update happen under one lock acquisition.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    last_mod: Mutex<SystemTime>,
}

impl Debouncer {
    /// Create a debouncer whose window starts now.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, SystemTime::now())
    }

    /// Create a debouncer whose window starts at `start`.
    #[must_use]
    pub fn starting_at(interval: Duration, start: SystemTime) -> Self {
        Self {
            interval,
            last_mod: Mutex::new(start),
        }
    }

    /// The debounce interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// The last accepted modification time.
    #[must_use]
    pub fn last_mod(&self) -> SystemTime {
        *self.last_mod.lock()
    }

    /// Decide whether an event observed at `now` for a file last modified at
    /// `modified` should trigger a pass.
    ///
    /// A stored timestamp in the future of `now` counts as zero elapsed time.
    pub fn try_accept(&self, now: SystemTime, modified: SystemTime) -> bool {
        let mut last_mod = self.last_mod.lock();
        let elapsed = now.duration_since(*last_mod).unwrap_or(Duration::ZERO);

        if elapsed > self.interval {
            *last_mod = modified;
            true
        } else {
            false
        }
    }
}
