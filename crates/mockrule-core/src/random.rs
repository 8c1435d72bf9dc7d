//! Random sources used when evaluating response templates.
//!
//! Template evaluation never touches a global generator directly. Every draw
//! goes through a [`RandomSource`], so tests can pin counts with
//! [`FixedRandom`] or [`SequenceRandom`] while production code uses
//! [`RngSource::thread`].

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Draw an integer from the inclusive range `[min, max]`.
    ///
    /// Callers guarantee `min <= max`.
    fn next_in_range(&mut self, min: i64, max: i64) -> i64;
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl RngSource<ThreadRng> {
    /// Source backed by the thread-local generator.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        self.0.gen_range(min..=max)
    }
}

/// Always yields the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom(pub i64);

impl RandomSource for FixedRandom {
    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        self.0.clamp(min, max)
    }
}

/// Cycles through a list of values, clamping each into the requested range.
///
/// An empty sequence behaves like `FixedRandom(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRandom {
    values: Vec<i64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        let Some(&value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return 0_i64.clamp(min, max);
        };
        self.cursor += 1;
        value.clamp(min, max)
    }
}
