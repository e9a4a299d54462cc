//! Bounded retry policy with exponential backoff.
//!
//! Used by callers that are allowed to retry (the history initial load); the
//! client itself never retries. The policy is deliberately bounded: a failed
//! call surfaces after `max_retries` additional attempts, it never loops.
//!
//! - Max retries: 2 (3 total attempts)
//! - Initial delay: 500ms
//! - Max delay: 8 seconds
//! - Jitter: down-jitter up to 25% (multiplier in [0.75, 1.0])

use std::time::Duration;

use rand::Rng;

/// Retry configuration with jittered exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries (not counting the initial request).
    pub max_retries: u32,
    /// Backoff delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Jitter factor for down-jitter (0.25 = up to 25% reduction).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            jitter_factor: 0.25,
        }
    }
}

impl RetryPolicy {
    /// Total attempts the policy allows, including the initial one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Jittered delay before retry number `retry_index` (0-based).
    ///
    /// Doubles per retry from `initial_delay`, capped at `max_delay`, then
    /// reduced by a random factor in `[1 - jitter_factor, 1.0]`.
    #[must_use]
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        let exp = retry_index.min(16);
        let base = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(exp))
            .min(self.max_delay);

        let multiplier = 1.0 - rand::thread_rng().gen_range(0.0..=self.jitter_factor);
        base.mul_f64(multiplier)
    }
}
