//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust,ignore
//! use eco_testing_framework::prelude::*;
//! ```

// Re-export orchestrator types
pub use crate::orchestrator::{Clock, DeterministicTestEnv, PausedClock, SystemClock, TestRng};

// Re-export the harness
pub use crate::harness::{Account, TestChain, TestChainBuilder};

// Re-export assertion helpers
pub use crate::assertions::{ResponseExt, ValueExt};

// Re-export chain and common types used in nearly every test
pub use eco_chain::contracts::{EcoFootprint, CONTRACT_NAME};
pub use eco_chain::{Block, ContractId, Receipt, SimChain, Transaction};
pub use eco_common::{Principal, Response, Value};

// Re-export commonly used external types
pub use anyhow::{anyhow, Context, Result};
pub use std::sync::Arc;
pub use tokio::time::Duration;
