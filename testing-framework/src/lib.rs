//! # Eco Testing Framework
//!
//! Deterministic test harness for the eco-footprint simulated chain.
//!
//! ## Architecture Overview
//!
//! - **orchestrator**: clock abstraction and seeded RNG for reproducible runs
//! - **harness**: named accounts, chain builder, contract-call helpers
//! - **assertions**: receipt/response expectation helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eco_testing_framework::prelude::*;
//!
//! #[tokio::test]
//! async fn test_add_entry() {
//!     let chain = TestChainBuilder::eco_footprint().build().unwrap();
//!     let deployer = chain.account("deployer").clone();
//!
//!     let block = chain
//!         .mine_block(vec![chain.contract_call(
//!             "eco-footprint",
//!             "add-entry",
//!             vec![Value::string("cycling"), Value::uint(10)],
//!             &deployer,
//!         )])
//!         .await
//!         .unwrap();
//!
//!     block.receipts[0].result.expect_ok().expect_uint(10);
//! }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: clock injection + seeded RNG, replayable via seed
//! 2. **In-process**: no RPC or network, every test owns its chain
//! 3. **Readable failures**: assertions print both sides in call notation

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Receipt and response expectation helpers
pub mod assertions;
/// Named accounts, chain builder, contract-call helpers
pub mod harness;
/// Clock, RNG and deterministic environment
pub mod orchestrator;

// Convenient re-exports for common usage
pub mod prelude;

pub use harness::{Account, TestChain, TestChainBuilder};
pub use orchestrator::{Clock, DeterministicTestEnv, PausedClock, SystemClock, TestRng};

/// Framework version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
