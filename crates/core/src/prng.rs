//! Seedable Xorshift64 generator for obstacle spawning.
//!
//! The game draws every random obstacle attribute from one of these, so a
//! run is fully determined by its seed and its input timeline.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a fixed non-zero value, since zero is a fixed
/// point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_D0C5_D0D6_E000;

    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Seeds from a host timestamp in milliseconds (e.g. `performance.now()`).
    ///
    /// Sub-millisecond bits are kept so two starts in the same millisecond
    /// still differ on hosts with fine-grained clocks.
    pub fn from_timestamp_ms(now_ms: f64) -> Self {
        Self::new((now_ms * 1000.0).to_bits())
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f32 in [min, max). Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        let v = min as f64 + self.next_f64() * (max as f64 - min as f64);
        // f64 -> f32 rounding can land exactly on `max`.
        let v = v as f32;
        if v >= max {
            min.max(max - f32::EPSILON * max.abs().max(1.0))
        } else {
            v
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, recorded simulation seeds no longer replay.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_stick_at_zero() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0);
        }
    }

    #[test]
    fn same_seed_replays_the_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn timestamps_in_the_same_millisecond_seed_differently() {
        let mut a = Xorshift64::from_timestamp_ms(1234.25);
        let mut b = Xorshift64::from_timestamp_ms(1234.5);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn next_range_covers_obstacle_lane_bounds() {
        let mut rng = Xorshift64::new(9999);
        for i in 0..10_000 {
            let v = rng.next_range(-0.3, 1.3);
            assert!((-0.3_f32..1.3).contains(&v), "next_range = {v} at iteration {i}");
        }
    }

    #[test]
    fn next_range_with_empty_range_returns_min() {
        let mut rng = Xorshift64::new(1);
        assert_eq!(rng.next_range(0.05, 0.05), 0.05);
        assert_eq!(rng.next_range(0.5, 0.1), 0.5);
    }

    #[test]
    fn serialization_preserves_state_mid_stream() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn next_range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -10.0_f32..10.0,
                width in 0.001_f32..10.0,
            ) {
                let max = min + width;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "{v} outside [{min}, {max})");
                }
            }
        }
    }
}
