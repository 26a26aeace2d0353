//! Seedable RNG wrapper used for GPS jitter, jitter intervals and speed
//! variance.
//!
//! # Determinism strategy
//!
//! The spoofer owns a single `MotionRng`.  When the configuration supplies a
//! seed the whole sequence of jitter offsets and intervals is reproducible,
//! which is what the tests rely on.  Without a seed the generator is seeded
//! from OS entropy.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct MotionRng(SmallRng);

impl MotionRng {
    pub fn new(seed: u64) -> Self {
        MotionRng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        MotionRng(SmallRng::from_entropy())
    }

    /// Seeded when `seed` is `Some`, entropy-seeded otherwise.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Uniform sample from the half-open `range`.
    ///
    /// An empty range yields its start instead of panicking, so a
    /// misconfigured variance degrades to a constant factor.
    #[inline]
    pub fn sample(&mut self, range: &Range<f64>) -> f64 {
        if range.start < range.end {
            self.0.gen_range(range.clone())
        } else {
            range.start
        }
    }
}

impl std::fmt::Debug for MotionRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MotionRng")
    }
}
