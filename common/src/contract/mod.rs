//! Contract execution surface.
//!
//! The chain executes contracts through the [`Contract`] trait without
//! knowing anything about their internals; contracts see their state only
//! through the [`ContractStorage`] handle they are given. This mirrors the
//! dependency-injection split between transaction processing and VM
//! execution.

mod storage;

pub use storage::{ContractStorage, StorageOverlay, WriteSet};

use crate::account::Principal;
use crate::crypto::Hash;
use crate::error::VmError;
use crate::value::{Response, Value};
use async_trait::async_trait;

/// Execution context handed to a contract for one call.
#[derive(Debug, Clone)]
pub struct CallEnv {
    /// Principal that signed the transaction (or issued the read-only call)
    pub sender: Principal,
    /// Height of the block being mined, or the tip for read-only calls
    pub block_height: u64,
    /// Milliseconds since chain start
    pub block_timestamp_millis: u64,
    /// Transaction hash; zero for read-only calls
    pub tx_hash: Hash,
}

/// A contract registered on the simulated chain.
///
/// `call` dispatches on the function name and returns the contract-level
/// [`Response`]. Storage writes go through the provided handle; the chain
/// commits them only when the response is `Ok`.
#[async_trait]
pub trait Contract: Send + Sync {
    /// Execute a function of this contract.
    ///
    /// # Errors
    ///
    /// Returns [`VmError`] for malformed calls (unknown function, bad
    /// arity or argument types, corrupt storage). Contract-level failures
    /// are expressed as `Ok(Response::Err(..))`.
    async fn call(
        &self,
        env: &CallEnv,
        storage: &mut dyn ContractStorage,
        function: &str,
        args: &[Value],
    ) -> Result<Response, VmError>;

    /// Whether the given function is read-only (never writes storage).
    ///
    /// Read-only functions can be evaluated without mining and are
    /// rejected when submitted as transactions.
    fn is_read_only(&self, function: &str) -> bool;

    /// Human-readable contract name, used for logging.
    fn name(&self) -> &'static str;
}
