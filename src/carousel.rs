use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Rotating banner
// ---------------------------------------------------------------------------

/// Index that advances on a fixed interval, for the cosmetic "best deals"
/// banner. Driven by the UI repaint loop; holds no catalog data.
#[derive(Debug, Clone)]
pub struct Carousel {
    interval: Duration,
    position: usize,
    last_tick: Instant,
}

impl Carousel {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Carousel {
            interval,
            position: 0,
            last_tick: now,
        }
    }

    /// Advance by one slot when the interval has elapsed. Returns `true` if
    /// the slot changed.
    pub fn tick(&mut self, now: Instant, len: usize) -> bool {
        if now.duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick = now;
        if len < 2 {
            self.position = 0;
            return false;
        }
        self.position = (self.position + 1) % len;
        true
    }

    /// Current slot for a list of `len` entries.
    pub fn current(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.position % len)
    }

    /// Time left before the next rotation is due.
    pub fn time_to_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.duration_since(self.last_tick))
    }
}
