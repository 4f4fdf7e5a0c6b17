// File: testing-framework/src/orchestrator/mod.rs
//
// Orchestrator Module - deterministic test infrastructure
//
// Bundles the clock abstraction (shared with the chain crate) and a seeded
// RNG so tests control every source of non-determinism.

/// Deterministic random number generation for reproducible tests
pub mod rng;

pub use eco_chain::clock::{Clock, PausedClock, SystemClock};
pub use rng::TestRng;

use std::sync::Arc;

/// Complete deterministic test environment.
///
/// Combines a paused clock and a seeded RNG so that a test run is fully
/// reproducible: the same seed produces the same random values and time
/// only moves when advanced explicitly.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() {
///     let env = DeterministicTestEnv::new_time_paused();
///     env.advance_time(Duration::from_secs(10)).await;
///     let amount: u64 = env.rng.gen_range(1..1000);
/// }
/// ```
pub struct DeterministicTestEnv {
    /// Injected clock (paused unless constructed via `with_seed`)
    pub clock: Arc<dyn Clock>,
    /// Seeded RNG; seed printed for replay
    pub rng: TestRng,
}

impl DeterministicTestEnv {
    /// Paused time, seed from `ECO_TEST_SEED` or random.
    pub fn new_time_paused() -> Self {
        Self {
            clock: Arc::new(PausedClock::new()),
            rng: TestRng::new_from_env_or_random(),
        }
    }

    /// Real time, explicit seed (for reproducing a failed run).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            rng: TestRng::with_seed(seed),
        }
    }

    /// Paused time and explicit seed.
    pub fn new_time_paused_with_seed(seed: u64) -> Self {
        Self {
            clock: Arc::new(PausedClock::new()),
            rng: TestRng::with_seed(seed),
        }
    }

    /// Advance time by the specified duration.
    ///
    /// Only meaningful with a paused clock.
    pub async fn advance_time(&self, duration: tokio::time::Duration) {
        tokio::time::advance(duration).await
    }

    /// The RNG seed in use, for logging or custom failure messages.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Print replay instructions for a failed test.
    pub fn on_failure(&self) {
        eprintln!("Test failed! Replay with:");
        eprintln!("   ECO_TEST_SEED=0x{:016x} cargo test ...", self.rng.seed());
    }
}
