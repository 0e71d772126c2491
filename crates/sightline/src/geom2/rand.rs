//! Uniform samplers over rects and directions, plus replay tokens.
//!
//! Determinism: callers own the RNG. `ReplayToken { seed, index }` mixes
//! both numbers into a single `StdRng`, so a round (or one region of it) can
//! be regenerated from the pair alone.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::types::{Point, Rect};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the `k`-th sub-stream of this token.
    #[inline]
    pub fn child(self, k: u64) -> Self {
        Self {
            seed: mix(self.seed ^ mix(self.index)),
            index: k,
        }
    }

    pub fn to_std_rng(self) -> StdRng {
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

// SplitMix64 finalizer.
fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// Uniform point in the closed rect. Caller guarantees `!rect.is_empty()`.
pub fn sample_point<R: Rng + ?Sized>(rect: &Rect, rng: &mut R) -> Point {
    Vector2::new(
        rng.gen_range(rect.min_x..=rect.max_x()),
        rng.gen_range(rect.min_y..=rect.max_y()),
    )
}

/// Uniform direction in `[0, 2π)`.
#[inline]
pub fn sample_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}
