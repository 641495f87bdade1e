//! Shared sample generators for integration tests
//!
//! Produces deterministic pulse-count and reading series so the same scenario
//! can be replayed into any buffer tree.

#![allow(dead_code)]

use wxring_core::RingBuffer;

/// Deterministic xorshift generator, reproducible across runs
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32() >> 8) / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Pulse counts for a steady wind with occasional one-pulse jitter
pub fn gusty_pulses(rng: &mut TestRng, samples: usize, base: u32) -> Vec<u32> {
    (0..samples)
        .map(|_| match rng.next_u32() % 4 {
            0 => base.saturating_sub(1),
            1 => base + 1,
            _ => base,
        })
        .collect()
}

/// A diurnal temperature curve sampled once a minute
pub fn diurnal_temperature(minutes: usize, mean: f64, swing: f64) -> Vec<f64> {
    (0..minutes)
        .map(|m| {
            let phase = m as f64 / 1440.0 * std::f64::consts::TAU;
            mean - swing * phase.cos()
        })
        .collect()
}

/// Writes every value into `buffer`
pub fn feed(buffer: &RingBuffer, values: impl IntoIterator<Item = f64>) {
    for value in values {
        buffer.add_item(value);
    }
}

/// Absolute tolerance for float comparisons
pub const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
