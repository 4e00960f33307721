//! Seeded random source shared by every stochastic part of the simulation.
//!
//! The generator is mulberry32: a 32-bit state advanced by a fixed odd
//! increment and passed through a short xor/shift/multiply mix. A seed
//! string is hashed into the initial state so that identical strings give
//! identical trajectories.
//!
//! There is no global instance. Every consumer receives `&mut RandomSource`,
//! which keeps draw order single-threaded and explicit.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;
use tracing::warn;

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Rolling string hash (`h * 31 + unit`) over UTF-16 code units, wrapping at 32 bits.
pub fn hash_seed(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash as u32
}

/// The mulberry32 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_seed(seed))
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[derive(Debug, Clone)]
enum Generator {
    Seeded(Mulberry32),
    /// Entropy-backed fallback; trajectories are not reproducible.
    Unseeded(ChaCha8Rng),
}

/// Random source handle passed to every simulation component.
#[derive(Debug, Clone)]
pub struct RandomSource {
    generator: Generator,
    draws: u64,
}

impl RandomSource {
    /// Deterministic source seeded from a string
    pub fn from_seed_str(seed: &str) -> Self {
        Self {
            generator: Generator::Seeded(Mulberry32::from_seed_str(seed)),
            draws: 0,
        }
    }

    pub fn from_seed(seed: u32) -> Self {
        Self {
            generator: Generator::Seeded(Mulberry32::new(seed)),
            draws: 0,
        }
    }

    /// Non-deterministic fallback for hosts that never supplied a seed.
    pub fn unseeded() -> Self {
        warn!(
            event = "random_unseeded",
            "Random source not initialized with a seed, falling back to a non-deterministic generator"
        );
        Self {
            generator: Generator::Unseeded(ChaCha8Rng::from_entropy()),
            draws: 0,
        }
    }

    /// Seeded when a seed is available, otherwise the flagged fallback
    pub fn from_optional_seed(seed: Option<&str>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_str(seed),
            None => Self::unseeded(),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.generator, Generator::Seeded(_))
    }

    /// Number of uniform draws taken so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform value in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.draws += 1;
        match &mut self.generator {
            Generator::Seeded(rng) => rng.next_f64(),
            Generator::Unseeded(rng) => rng.next_u32() as f64 / TWO_POW_32,
        }
    }

    /// Integer in `[min, max]`, both inclusive
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        (self.uniform() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Value in `[min, max)`
    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.uniform() * (max - min)
    }

    /// Box–Muller normal sample, clamped into `[min, max]`.
    ///
    /// Out-of-range samples are clamped rather than redrawn, so the bounds
    /// collect extra probability mass. Always consumes exactly two draws.
    pub fn normal(&mut self, mean: f64, std_dev: f64, min: f64, max: f64) -> f64 {
        let u1 = self.uniform();
        let u2 = self.uniform();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        let value = mean + std_dev * z0;
        value.min(max).max(min)
    }

    /// `true` with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}
