//! Random sources for the computer's move.
//!
//! The engine only asks for an integer in a half-open range, so tests can
//! swap in a fixed value or a scripted sequence, including values outside
//! the requested range. The exclusive bound is a `u64` so that `u32::MAX`
//! itself can be drawn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Source of integers for the computer's draw.
pub trait RandomSource: Send + Sync + Debug {
    /// Returns an integer in `low..high_exclusive`.
    fn generate_random_int(&self, low: u32, high_exclusive: u64) -> u32;
}

/// Largest value of `low..high_exclusive`, or `None` if the range is empty.
fn last_in_range(low: u32, high_exclusive: u64) -> Option<u32> {
    if u64::from(low) >= high_exclusive {
        return None;
    }
    Some(u32::try_from(high_exclusive - 1).unwrap_or(u32::MAX))
}

/// Thread-local RNG. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    #[instrument(skip(self))]
    fn generate_random_int(&self, low: u32, high_exclusive: u64) -> u32 {
        match last_in_range(low, high_exclusive) {
            Some(high) => rand::rng().random_range(low..=high),
            None => low,
        }
    }
}

/// Seeded RNG for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a generator that replays the same draws for the same seed.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        debug!(seed, "Seeding computer RNG");
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    #[instrument(skip(self), fields(seed = self.seed))]
    fn generate_random_int(&self, low: u32, high_exclusive: u64) -> u32 {
        let Some(high) = last_in_range(low, high_exclusive) else {
            return low;
        };
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(low..=high)
    }
}

/// Always returns the same value, whatever range is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom {
    value: u32,
}

impl FixedRandom {
    /// Creates a source that always yields `value`.
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl RandomSource for FixedRandom {
    fn generate_random_int(&self, _low: u32, _high_exclusive: u64) -> u32 {
        self.value
    }
}

#[derive(Debug, Default)]
struct Script {
    values: VecDeque<u32>,
    last: Option<u32>,
    requests: Vec<(u32, u64)>,
}

/// Yields scripted values in order, then keeps repeating the last one.
///
/// Every requested range is recorded so tests can assert on it.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    script: Mutex<Script>,
}

impl SequenceRandom {
    /// Creates a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: Mutex::new(Script {
                values: values.into_iter().collect(),
                last: None,
                requests: Vec::new(),
            }),
        }
    }

    /// Ranges requested so far, as `(low, high_exclusive)` pairs.
    pub fn requests(&self) -> Vec<(u32, u64)> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }
}

impl RandomSource for SequenceRandom {
    fn generate_random_int(&self, low: u32, high_exclusive: u64) -> u32 {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        script.requests.push((low, high_exclusive));
        match script.values.pop_front() {
            Some(value) => {
                script.last = Some(value);
                value
            }
            None => script.last.unwrap_or(low),
        }
    }
}
