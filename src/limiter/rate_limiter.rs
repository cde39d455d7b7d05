//! Rate Limiter
//!
//! Spaces outgoing upstream requests at least `min_interval` apart.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Grants permits separated by at least `min_interval`.
///
/// Each caller reserves the next free slot under a fair (FIFO) mutex, then
/// sleeps until that slot outside the lock. Reservations are handed out in
/// request order, so waiters are served first come, first served and none
/// can starve. The limiter never rejects, it only delays.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    /// Earliest instant the next permit may be granted; None before the first grant
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    // == Constructor ==
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    // == Acquire ==
    /// Waits for a permit and returns the instant it was granted for.
    ///
    /// Returns immediately when the previous grant is at least
    /// `min_interval` old. A caller dropped while waiting still consumes its
    /// reserved slot, which only ever widens the spacing.
    pub async fn acquire(&self) -> Instant {
        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(next) if next > now => next,
                _ => now,
            };
            *next_slot = Some(slot + self.min_interval);
            slot
        };

        if slot > Instant::now() {
            debug!(
                "Rate limiter: waiting {:?} for upstream slot",
                slot.saturating_duration_since(Instant::now())
            );
            sleep_until(slot).await;
        }

        slot
    }
}
