use std::thread;
use std::time::{Duration, Instant};

/// Fixed-interval blocking timer. The first `tick` returns immediately.
/// Ticks missed while the caller was busy are dropped, not queued.
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick is due.
    pub fn tick(&mut self) {
        let deadline = match self.next {
            None => {
                self.next = Some(Instant::now() + self.interval);
                return;
            }
            Some(deadline) => deadline,
        };

        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }

        let now = Instant::now();
        let mut next = deadline + self.interval;
        while next <= now && !self.interval.is_zero() {
            next += self.interval;
        }
        self.next = Some(next);
    }
}
