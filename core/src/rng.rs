//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through StreamRng handles derived
//! from the single `seed` in the run configuration.
//!
//! Each stream is seeded from (seed, stream slot, day ordinal), so:
//!   - The customer roster never shifts when transaction logic changes.
//!   - Any single day can be regenerated in isolation.

use chrono::{Datelike, NaiveDate};
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;
use uuid::{Builder, Uuid};

const SLOT_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const DAY_MIX: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// A named, deterministic RNG for one generation stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed, a stable slot index
    /// and an ordinal (day number, or 0 for run-wide streams).
    pub fn new(master_seed: u64, slot_index: u64, ordinal: u64) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(SLOT_MIX)
            ^ ordinal.wrapping_mul(DAY_MIX);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Uniform integer in [low, high] (both inclusive).
    pub fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.inner.gen_range(low..=high)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Sample a normal distribution. Falls back to `mean` when
    /// `std_dev` is not a valid standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        &items[idx]
    }

    /// A version-4 UUID built from this stream's bytes.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Hands out stream RNGs for a single run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Run-wide stream (used once, e.g. for the customer roster).
    pub fn for_stream(&self, slot: Stream) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64, 0).with_name(slot.name())
    }

    /// Stream for a single calendar day.
    pub fn for_stream_on(&self, slot: Stream, day: NaiveDate) -> StreamRng {
        let ordinal = day.num_days_from_ce() as u64;
        StreamRng::new(self.master_seed, slot as u64, ordinal).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Stream {
    Customer = 0,
    Transaction = 1,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Transaction => "transaction",
        }
    }
}
