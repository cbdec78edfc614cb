//! Injectable random sources for point placement and velocity draws

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform float source used by every random draw in the simulation.
///
/// Simulation code only ever asks for "a float in `[min, max)`", so tests can
/// substitute a scripted source and get fully deterministic updates.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Lightweight xorshift32 PRNG
pub struct FieldRng {
    state: u32,
}

impl FieldRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for FieldRng {
    fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Adapter that exposes any `rand::Rng` as a [`RandomSource`]
pub struct StdRandom<R: Rng> {
    inner: R,
}

impl<R: Rng> StdRandom<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl StdRandom<StdRng> {
    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for StdRandom<R> {
    fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

/// Uniform value between `min` (inclusive) and `max` (exclusive)
pub fn random_between(rng: &mut dyn RandomSource, min: f32, max: f32) -> f32 {
    rng.range(min, max)
}

/// Uniform coordinate in `[-spread, spread)`
pub fn random_coordinate(rng: &mut dyn RandomSource, spread: f32) -> f32 {
    rng.range(-spread, spread)
}

/// Scripted source for tests: replays `values` in order, cycling at the end
#[cfg(test)]
pub(crate) struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl SequenceRng {
    pub(crate) fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty());
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
