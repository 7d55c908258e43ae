//! Local call-rate admission control.
//!
//! Token-bucket limiter shared by all extractions in a process. The limiter
//! protects against runaway local looping (batch extraction bugs); it does
//! not enforce the provider-side quota.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Token bucket admitting a bounded number of calls per interval.
pub struct CallLimiter {
    tokens: AtomicU64,
    max_tokens: u64,
    refill_rate: f64,
    last_refill: Mutex<Instant>,
}

impl CallLimiter {
    /// Create a limiter admitting `calls` per `interval`.
    #[must_use]
    pub fn new(calls: u32, interval: Duration) -> Self {
        let max_tokens = u64::from(calls.max(1));
        let secs = interval.as_secs_f64().max(f64::EPSILON);
        Self {
            tokens: AtomicU64::new(max_tokens),
            max_tokens,
            refill_rate: max_tokens as f64 / secs,
            last_refill: Mutex::new(Instant::now()),
        }
    }

    /// Try to admit a call without waiting.
    ///
    /// On rejection, returns the estimated time until the next admission slot.
    pub fn try_admit(&self) -> Result<(), Duration> {
        self.refill();
        loop {
            let current = self.tokens.load(Ordering::Relaxed);
            if current == 0 {
                return Err(self.next_slot());
            }
            if self
                .tokens
                .compare_exchange_weak(current, current - 1, Ordering::SeqCst, Ordering::Relaxed)
                .is_ok()
            {
                return Ok(());
            }
        }
    }

    /// Wait for admission, giving up after `max_wait`.
    ///
    /// On timeout, returns the estimated time until the next admission slot.
    pub async fn admit(&self, max_wait: Duration) -> Result<(), Duration> {
        let deadline = Instant::now() + max_wait;
        loop {
            match self.try_admit() {
                Ok(()) => return Ok(()),
                Err(retry_after) => {
                    if Instant::now() >= deadline {
                        return Err(retry_after);
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }

    fn refill(&self) {
        let mut last = self.last_refill.lock();
        let elapsed = last.elapsed().as_secs_f64();
        let new_tokens = (elapsed * self.refill_rate) as u64;
        if new_tokens > 0 {
            *last = Instant::now();
            let current = self.tokens.load(Ordering::Relaxed);
            let new_value = (current + new_tokens).min(self.max_tokens);
            self.tokens.store(new_value, Ordering::Relaxed);
        }
    }

    /// Time until one token accrues, given the refill progress so far.
    fn next_slot(&self) -> Duration {
        let seconds_per_token = 1.0 / self.refill_rate;
        let elapsed = self.last_refill.lock().elapsed().as_secs_f64();
        Duration::from_secs_f64((seconds_per_token - elapsed).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_capacity() {
        let limiter = CallLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_err());
    }

    #[test]
    fn test_rejection_carries_retry_hint() {
        let limiter = CallLimiter::new(1, Duration::from_secs(10));
        assert!(limiter.try_admit().is_ok());
        let retry_after = limiter.try_admit().unwrap_err();
        assert!(retry_after > Duration::ZERO);
        assert!(retry_after <= Duration::from_secs(10));
    }

    #[test]
    fn test_refills_after_interval() {
        let limiter = CallLimiter::new(2, Duration::from_millis(100));
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_err());

        std::thread::sleep(Duration::from_millis(120));
        assert!(limiter.try_admit().is_ok());
    }

    #[test]
    fn test_refill_caps_at_capacity() {
        let limiter = CallLimiter::new(2, Duration::from_millis(50));
        std::thread::sleep(Duration::from_millis(200));
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.try_admit().is_err());
    }

    #[tokio::test]
    async fn test_admit_waits_for_slot() {
        let limiter = CallLimiter::new(1, Duration::from_millis(50));
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.admit(Duration::from_millis(500)).await.is_ok());
    }

    #[tokio::test]
    async fn test_admit_times_out() {
        let limiter = CallLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.try_admit().is_ok());
        assert!(limiter.admit(Duration::from_millis(30)).await.is_err());
    }
}
