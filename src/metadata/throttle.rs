//! Pacing between lookups.
//!
//! [`RequestThrottle::pause`] sleeps for a fixed interval after every lookup,
//! whether it matched, missed or failed. Two lookups are therefore always
//! separated by at least one interval, however long the first one took.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestThrottle {
    interval: Duration,
}

impl RequestThrottle {
    /// A throttle pausing `interval` after each lookup. A zero interval
    /// disables pacing entirely.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A throttle that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait out the interval that must follow a lookup.
    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}
