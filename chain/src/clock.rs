//! Clock abstraction for deterministic time control.
//!
//! The simulator reads block timestamps through this trait so tests can
//! pause and advance time explicitly while production-style usage keeps
//! real wall-clock behavior.

use std::future::Future;
use std::pin::Pin;
use tokio::time::{self, Duration, Instant};

/// Time source the chain depends on.
///
/// In tests, inject [`PausedClock`] to make timestamps fully
/// deterministic; otherwise [`SystemClock`] provides real time.
pub trait Clock: Send + Sync {
    /// Returns the current instant in time
    fn now(&self) -> Instant;

    /// Sleeps for the specified duration
    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// System real-time clock (production behavior).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        time::Instant::now()
    }

    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(time::sleep(d))
    }
}

/// Paused clock for tests.
///
/// Works with tokio's `time::pause()` mechanism: time only advances when
/// explicitly told to via [`PausedClock::advance`], making tests fast and
/// reproducible.
pub struct PausedClock;

impl PausedClock {
    /// Creates a new PausedClock and pauses tokio time.
    ///
    /// Requires a current-thread runtime (the `#[tokio::test]` default).
    /// Do not combine with `start_paused = true`: tokio panics when time
    /// is paused twice.
    pub fn new() -> Self {
        time::pause();
        Self
    }

    /// Manually advance time by the specified duration.
    ///
    /// Any pending `sleep()` futures that expire during the advancement
    /// are woken up.
    pub async fn advance(&self, d: Duration) {
        time::advance(d).await
    }
}

impl Clock for PausedClock {
    fn now(&self) -> Instant {
        // Current simulated time; only advances via advance()
        time::Instant::now()
    }

    fn sleep(&self, d: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        // Cooperates with the paused runtime, returns instantly unless
        // time is advanced past the sleep duration
        Box::pin(time::sleep(d))
    }
}

impl Default for PausedClock {
    fn default() -> Self {
        Self::new()
    }
}
