//! Hash-based jitter
//!
//! The decision procedure must stay a pure function of the match state, so
//! per-tick noise is derived from `(seed, tick, player, subcase)` instead of
//! a shared RNG.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

/// Distinct streams per randomized quantity
pub mod subcase {
    pub const FORMATION_X: u32 = 0x0100;
    pub const FORMATION_Y: u32 = 0x0101;
}

fn mix(seed: u64, tick: u64, actor_idx: usize, subcase: u32) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    tick.hash(&mut hasher);
    actor_idx.hash(&mut hasher);
    subcase.hash(&mut hasher);
    hasher.finish()
}

/// Uniform value in `[0, 1)`
pub fn unit_f32(seed: u64, tick: u64, actor_idx: usize, subcase: u32) -> f32 {
    // top 24 bits fit the f32 mantissa exactly
    (mix(seed, tick, actor_idx, subcase) >> 40) as f32 / (1u64 << 24) as f32
}

/// Uniform value in `[-amplitude / 2, amplitude / 2)`
pub fn jitter(seed: u64, tick: u64, actor_idx: usize, subcase: u32, amplitude: f32) -> f32 {
    (unit_f32(seed, tick, actor_idx, subcase) - 0.5) * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_input_same_output() {
        let a = jitter(42, 100, 3, subcase::FORMATION_X, 50.0);
        let b = jitter(42, 100, 3, subcase::FORMATION_X, 50.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_subcases_are_independent() {
        let values: Vec<_> = (0..32)
            .map(|t| {
                (
                    unit_f32(7, t, 0, subcase::FORMATION_X),
                    unit_f32(7, t, 0, subcase::FORMATION_Y),
                )
            })
            .collect();
        assert!(values.iter().any(|(x, y)| x != y));
    }

    #[test]
    fn test_values_spread_over_range() {
        let samples: Vec<f32> = (0..500).map(|t| unit_f32(1, t, 2, subcase::FORMATION_X)).collect();
        assert!(samples.iter().any(|v| *v < 0.25));
        assert!(samples.iter().any(|v| *v > 0.75));
    }

    proptest! {
        #[test]
        fn prop_jitter_within_amplitude(seed: u64, tick: u64, idx in 0usize..12, amp in 0.0f32..200.0) {
            let j = jitter(seed, tick, idx, subcase::FORMATION_Y, amp);
            prop_assert!(j >= -amp / 2.0 && j <= amp / 2.0);
        }
    }
}
