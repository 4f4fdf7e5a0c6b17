// File: testing-framework/src/orchestrator/rng.rs
//
// Seeded RNG for deterministic test execution with replay capability.
// All test randomness should flow through TestRng so a failed run can be
// reproduced exactly from its printed seed.

use parking_lot::Mutex;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Test RNG with seed for reproducibility.
///
/// Uses a seeded `StdRng` behind a mutex so a single RNG can be shared
/// across tasks. Seeds are 64-bit values, printed on creation and
/// overridable via the `ECO_TEST_SEED` environment variable:
///
/// ```bash
/// ECO_TEST_SEED=0xa3f5c8e1b2d94706 cargo test test_name
/// ```
pub struct TestRng {
    inner: Mutex<StdRng>,
    seed: u64,
}

impl TestRng {
    /// Create a new TestRng with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
            seed,
        }
    }

    /// Create RNG from `ECO_TEST_SEED` or a random seed.
    ///
    /// The seed is logged to stderr either way so any run can be
    /// replayed.
    pub fn new_from_env_or_random() -> Self {
        let seed = std::env::var("ECO_TEST_SEED")
            .ok()
            .and_then(|s| {
                // Support both "0x..." and raw hex
                let trimmed = s.trim().trim_start_matches("0x");
                u64::from_str_radix(trimmed, 16).ok()
            })
            .unwrap_or_else(|| {
                let mut system_rng = rand::thread_rng();
                system_rng.gen()
            });

        eprintln!("TestRng seed: 0x{:016x}", seed);
        eprintln!("   Replay: ECO_TEST_SEED=0x{:016x} cargo test ...", seed);

        Self::with_seed(seed)
    }

    /// The seed used by this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random value.
    pub fn gen<T>(&self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.inner.lock().gen()
    }

    /// Generate a random value in a range.
    pub fn gen_range<T, R>(&self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.lock().gen_range(range)
    }

    /// Fill a byte slice with random data.
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.inner.lock().fill_bytes(dest)
    }

    /// Pick a random element from a slice.
    pub fn choose<'a, T>(&self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let index = self.gen_range(0..slice.len());
        slice.get(index)
    }
}
