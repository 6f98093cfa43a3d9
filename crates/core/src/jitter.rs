//! Random variation for fallback throughput figures.

use rand::Rng;

/// Source of bounded jitter added to fallback network figures.
pub trait JitterSource: Send + Sync {
    /// Returns a value in `0..=max`.
    fn jitter(&self, max: u64) -> u64;
}

/// Thread-local RNG jitter used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn jitter(&self, max: u64) -> u64 {
        rand::rng().random_range(0..=max)
    }
}

/// Constant jitter, capped at `max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter(pub u64);

impl JitterSource for FixedJitter {
    fn jitter(&self, max: u64) -> u64 {
        self.0.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_jitter_is_capped() {
        assert_eq!(FixedJitter(7).jitter(10), 7);
        assert_eq!(FixedJitter(70).jitter(10), 10);
    }

    proptest! {
        #[test]
        fn prop_thread_rng_jitter_in_bounds(max in 0u64..1_000_000) {
            prop_assert!(ThreadRngJitter.jitter(max) <= max);
        }
    }
}
