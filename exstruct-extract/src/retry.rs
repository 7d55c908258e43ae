//! Backoff policy for transient provider failures.

use std::time::Duration;

use rand::Rng;

/// Exponential backoff with jitter, honoring provider retry hints.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial: Duration,
    /// Upper bound on any single delay.
    pub max: Duration,
    /// Growth factor applied per attempt.
    pub multiplier: f64,
    /// Jitter fraction of the base delay (0.0 disables jitter).
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit parameters.
    #[must_use]
    pub fn new(initial: Duration, max: Duration, multiplier: f64, jitter: f64) -> Self {
        Self {
            initial,
            max,
            multiplier,
            jitter,
        }
    }

    /// A policy with no delays, for tests and offline replays.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, 1.0, 0.0)
    }

    /// Delay before the next attempt, given the 1-based attempt that failed.
    ///
    /// A provider-supplied `retry_after` hint takes precedence over the
    /// computed backoff, capped at the policy maximum.
    #[must_use]
    pub fn delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint.min(self.max);
        }
        let base = self.initial.as_secs_f64() * self.multiplier.powi(attempt as i32 - 1);
        let jitter_amount = base * self.jitter * random_jitter();
        let delay = (base + jitter_amount).max(0.0).min(self.max.as_secs_f64());
        Duration::from_secs_f64(delay)
    }
}

/// Random jitter factor between -1.0 and 1.0.
fn random_jitter() -> f64 {
    rand::thread_rng().gen_range(-1.0..1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(500), Duration::from_secs(10), 2.0, 0.0)
    }

    #[test]
    fn test_exponential_growth() {
        let policy = no_jitter();
        assert_eq!(policy.delay(1, None), Duration::from_millis(500));
        assert_eq!(policy.delay(2, None), Duration::from_millis(1000));
        assert_eq!(policy.delay(3, None), Duration::from_millis(2000));
    }

    #[test]
    fn test_capped_at_max() {
        let policy = no_jitter();
        assert_eq!(policy.delay(20, None), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_after_takes_precedence() {
        let policy = no_jitter();
        let hint = Some(Duration::from_secs(5));
        assert_eq!(policy.delay(1, hint), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_after_capped_at_max() {
        let policy = no_jitter();
        let hint = Some(Duration::from_secs(120));
        assert_eq!(policy.delay(1, hint), Duration::from_secs(10));
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let policy = RetryPolicy::new(
            Duration::from_millis(1000),
            Duration::from_secs(10),
            2.0,
            0.2,
        );
        for _ in 0..100 {
            let delay = policy.delay(1, None);
            assert!(delay >= Duration::from_millis(800));
            assert!(delay <= Duration::from_millis(1200));
        }
    }

    #[test]
    fn test_immediate_policy() {
        let policy = RetryPolicy::immediate();
        assert_eq!(policy.delay(1, None), Duration::ZERO);
        assert_eq!(policy.delay(5, None), Duration::ZERO);
    }
}
