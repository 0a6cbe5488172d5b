//! Single seedable source of randomness
//!
//! Every stochastic choice in the agent (similarity, novelty, scoring noise,
//! action success, world events) draws from one `RandomSource`, so a fixed
//! seed and a fixed call order reproduce a run exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random provider
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`
    fn next_f32(&mut self) -> f32;

    /// Raw 64 bits, used for identifiers
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `[0, len)`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Bernoulli trial with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// ChaCha-backed random source
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }
}

/// Replays a fixed list of draws in a loop
///
/// Used by tests to force particular branches of the scoring functions.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        let values = if values.is_empty() { vec![0.5] } else { values };
        Self { values, cursor: 0 }
    }

    /// Always returns the same draw
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }

    fn next_u64(&mut self) -> u64 {
        (self.next_f32() as f64 * u64::MAX as f64) as u64
    }
}
