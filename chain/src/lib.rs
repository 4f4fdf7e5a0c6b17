//! In-process simulated blockchain for contract testing.
//!
//! The simulator executes contract-call transactions in mined blocks
//! against in-memory, per-contract keyed storage. It provides:
//!
//! - deterministic block mining with per-transaction receipts,
//! - atomic rollback of storage writes when a call returns `(err ...)`,
//! - read-only evaluation that never touches chain state,
//! - clock injection so block timestamps are controllable in tests.
//!
//! There is no networking, consensus, gas metering or persistence here;
//! the whole chain lives in memory and is rebuilt per test.

pub mod block;
pub mod chain;
pub mod clock;
pub mod contracts;
pub mod state;
pub mod transaction;

pub use block::{Block, Receipt};
pub use chain::SimChain;
pub use clock::{Clock, PausedClock, SystemClock};
pub use transaction::{ContractId, Transaction};
