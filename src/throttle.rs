use std::num::NonZeroU32;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// EDGAR fair-access limit.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

const DEFAULT_RATE: NonZeroU32 = match NonZeroU32::new(DEFAULT_REQUESTS_PER_SECOND) {
    Some(rate) => rate,
    None => panic!("default rate must be non-zero"),
};

/// Enforces a minimum spacing between outbound requests.
///
/// The last-issued timestamp is held under a mutex for the whole wait, so callers on other
/// threads queue behind the sleeper and each still sees the full interval. There is no
/// ordering guarantee between waiters.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_issued: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(requests_per_second: NonZeroU32) -> Self {
        Self {
            interval: Duration::from_secs(1) / requests_per_second.get(),
            last_issued: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the most recent `throttle` call completed.
    #[must_use]
    pub fn last_issued(&self) -> Option<Instant> {
        *self.last_issued.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until one interval has passed since the previous call completed.
    pub fn throttle(&self) {
        let mut last_issued = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = *last_issued {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }

        *last_issued = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}
