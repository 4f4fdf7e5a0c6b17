//! SimChain - in-process simulated blockchain
//!
//! Executes contract-call transactions in mined blocks against in-memory
//! per-contract storage, with receipts, atomic rollback and read-only
//! evaluation. No RPC, P2P or persistence.

use crate::block::{Block, Receipt};
use crate::clock::Clock;
use crate::state::CommittedState;
use crate::transaction::{ContractId, Transaction};
use anyhow::{Context, Result};
use eco_common::contract::{CallEnv, Contract, ContractStorage, StorageOverlay, WriteSet};
use eco_common::crypto::Hash;
use eco_common::{Principal, Response, Value, VmError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::Instant;

/// In-process simulated chain.
///
/// # Features
///
/// - Clock injection for deterministic block timestamps
/// - Contract registry with name-based dispatch
/// - Per-transaction storage overlay: writes commit on `(ok ...)`,
///   roll back on `(err ...)`
/// - Read-only calls that never touch chain state
/// - Direct state access for assertions
///
/// # Example
///
/// ```rust,ignore
/// let chain = SimChain::new(Arc::new(SystemClock));
/// chain.deploy("eco-footprint".into(), Arc::new(EcoFootprint))?;
///
/// let block = chain
///     .mine_block_with(vec![Transaction::contract_call(
///         "eco-footprint",
///         "add-entry",
///         vec![Value::string("cycling"), Value::uint(10)],
///         deployer,
///     )])
///     .await?;
/// assert!(block.receipts[0].result.is_ok());
/// ```
pub struct SimChain {
    /// Injected clock for deterministic time control
    clock: Arc<dyn Clock>,

    /// Instant the chain was created; block timestamps are relative to it
    started_at: Instant,

    /// Deployed contracts by id
    contracts: RwLock<BTreeMap<ContractId, Arc<dyn Contract>>>,

    /// Committed contract storage
    state: RwLock<CommittedState>,

    /// Pending transactions
    mempool: RwLock<Vec<Transaction>>,

    /// Block history, genesis included
    blocks: RwLock<Vec<Block>>,

    /// Current tip height
    tip_height: AtomicU64,

    /// Digest of committed state, recomputed after each mined block
    state_root: RwLock<Hash>,

    /// Serializes mining so interleaved mine_block calls cannot tear
    /// a block's state transitions apart
    mining: tokio::sync::Mutex<()>,
}

impl SimChain {
    /// Create a chain with only the genesis block.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        let state = CommittedState::new();
        let state_root = state.state_root();

        Self {
            clock,
            started_at,
            contracts: RwLock::new(BTreeMap::new()),
            state: RwLock::new(state),
            mempool: RwLock::new(Vec::new()),
            blocks: RwLock::new(vec![Block::genesis()]),
            tip_height: AtomicU64::new(0),
            state_root: RwLock::new(state_root),
            mining: tokio::sync::Mutex::new(()),
        }
    }

    /// Register a contract under an id.
    ///
    /// # Errors
    ///
    /// Fails if a contract is already deployed under the same id.
    pub fn deploy(&self, id: ContractId, contract: Arc<dyn Contract>) -> Result<()> {
        let mut contracts = self.contracts.write();
        if contracts.contains_key(&id) {
            anyhow::bail!("Contract already deployed: {}", id);
        }

        log::info!("Deployed contract {} ({})", id, contract.name());
        contracts.insert(id, contract);
        Ok(())
    }

    /// Submit a transaction to the mempool.
    ///
    /// # Validation
    ///
    /// - Target contract must be deployed
    /// - Target function must not be read-only (read-only calls are
    ///   evaluated via [`SimChain::call_read_only`], never mined)
    pub async fn submit(&self, tx: Transaction) -> Result<Hash> {
        {
            let contracts = self.contracts.read();
            let contract = contracts
                .get(&tx.contract)
                .ok_or_else(|| VmError::UnknownContract(tx.contract.to_string()))?;

            if contract.is_read_only(&tx.function) {
                anyhow::bail!(
                    "Read-only function '{}' cannot be submitted as a transaction",
                    tx.function
                );
            }
        }

        let tx_hash = tx.hash.clone();
        self.mempool.write().push(tx);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Transaction {} added to mempool", tx_hash);
        }

        Ok(tx_hash)
    }

    /// Mine a new block with all mempool transactions.
    ///
    /// Each transaction executes against a fresh storage overlay layered
    /// over the block's pending writes; the write set joins the block's
    /// buffer when the contract returns `(ok ...)` and is discarded when
    /// it returns `(err ...)`. Committed state is only touched once every
    /// transaction has produced a receipt, so a [`VmError`] (unknown
    /// function, bad arguments) aborts mining without leaving a trace:
    /// the block is not created and no writes commit.
    ///
    /// # Returns
    ///
    /// The newly mined block, receipts aligned with transactions in order.
    pub async fn mine_block(&self) -> Result<Block> {
        let _mining = self.mining.lock().await;

        let transactions = std::mem::take(&mut *self.mempool.write());

        let current_height = self.tip_height.load(Ordering::SeqCst);
        let new_height = current_height
            .checked_add(1)
            .context("Block height overflow - chain too long")?;
        let timestamp_millis = self.elapsed_millis();

        let mut pending: BTreeMap<ContractId, WriteSet> = BTreeMap::new();
        let mut receipts = Vec::with_capacity(transactions.len());
        for tx in &transactions {
            let contract = self.contract(&tx.contract)?;
            let mut base = self.state.read().snapshot(&tx.contract);
            if let Some(writes) = pending.get(&tx.contract) {
                base.extend(writes.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            let mut overlay = StorageOverlay::new(base);

            let env = CallEnv {
                sender: tx.sender.clone(),
                block_height: new_height,
                block_timestamp_millis: timestamp_millis,
                tx_hash: tx.hash.clone(),
            };

            let result = contract
                .call(&env, &mut overlay, &tx.function, &tx.args)
                .await
                .with_context(|| format!("Executing transaction {} {}", tx.hash, tx))?;

            if result.is_ok() {
                pending
                    .entry(tx.contract.clone())
                    .or_default()
                    .extend(overlay.into_writes());
            } else if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "Transaction {} returned {}, storage writes discarded",
                    tx.hash,
                    result
                );
            }

            receipts.push(Receipt {
                tx_hash: tx.hash.clone(),
                result,
            });
        }

        let block_hash = Block::compute_hash(new_height, timestamp_millis, &transactions);
        let block = Block {
            hash: block_hash.clone(),
            height: new_height,
            timestamp_millis,
            transactions,
            receipts,
        };

        {
            let mut state = self.state.write();
            for (contract, writes) in pending {
                state.merge(&contract, writes);
            }
            *self.state_root.write() = state.state_root();
        }
        self.blocks.write().push(block.clone());
        self.tip_height.store(new_height, Ordering::SeqCst);

        if log::log_enabled!(log::Level::Info) {
            log::info!(
                "Mined block {} at height {} with {} transactions",
                block_hash,
                new_height,
                block.transactions.len()
            );
        }

        Ok(block)
    }

    /// Submit a batch of transactions and mine them in one block.
    ///
    /// This is the harness-facing entry point: build the calls, hand them
    /// over, inspect the receipts of the returned block.
    pub async fn mine_block_with(&self, txs: Vec<Transaction>) -> Result<Block> {
        for tx in txs {
            self.submit(tx).await?;
        }
        self.mine_block().await
    }

    /// Evaluate a read-only function against committed state.
    ///
    /// Nothing is mined and chain state is untouched: the function must
    /// be registered read-only and any storage write it attempts fails
    /// the call with [`VmError::WriteInReadOnly`].
    pub async fn call_read_only(
        &self,
        contract_id: &ContractId,
        function: &str,
        args: &[Value],
        sender: &Principal,
    ) -> Result<Response> {
        let contract = self.contract(contract_id)?;
        let base = self.state.read().snapshot(contract_id);
        let mut overlay = StorageOverlay::new(base);

        let env = CallEnv {
            sender: sender.clone(),
            block_height: self.tip_height(),
            block_timestamp_millis: self.elapsed_millis(),
            tx_hash: Hash::zero(),
        };

        // Execute first so an unknown function surfaces as such rather
        // than as a read-only violation
        let response = contract.call(&env, &mut overlay, function, args).await?;

        if !contract.is_read_only(function) {
            return Err(VmError::NotReadOnly(function.to_string()).into());
        }
        if overlay.is_dirty() {
            return Err(VmError::WriteInReadOnly(function.to_string()).into());
        }

        Ok(response)
    }

    /// Current tip height (genesis is 0).
    pub fn tip_height(&self) -> u64 {
        self.tip_height.load(Ordering::SeqCst)
    }

    /// Block at a given height, if mined.
    pub fn block_at(&self, height: u64) -> Option<Block> {
        self.blocks.read().get(height as usize).cloned()
    }

    /// Digest of committed contract state.
    pub fn state_root(&self) -> Hash {
        self.state_root.read().clone()
    }

    /// Number of committed storage keys for a contract.
    pub fn contract_state_len(&self, contract: &ContractId) -> usize {
        self.state.read().contract_len(contract)
    }

    /// Number of pending transactions.
    pub fn mempool_len(&self) -> usize {
        self.mempool.read().len()
    }

    /// The injected clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn contract(&self, id: &ContractId) -> Result<Arc<dyn Contract>, VmError> {
        self.contracts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| VmError::UnknownContract(id.to_string()))
    }

    fn elapsed_millis(&self) -> u64 {
        self.clock.now().duration_since(self.started_at).as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{PausedClock, SystemClock};
    use crate::contracts::EcoFootprint;
    use async_trait::async_trait;
    use tokio::time::Duration;

    /// Writes storage and then fails, to exercise rollback.
    struct Flaky;

    #[async_trait]
    impl Contract for Flaky {
        async fn call(
            &self,
            _env: &CallEnv,
            storage: &mut dyn ContractStorage,
            function: &str,
            _args: &[Value],
        ) -> Result<Response, VmError> {
            match function {
                "write-then-fail" => {
                    storage.put(b"poison".to_vec(), vec![1]);
                    Ok(Response::err_uint(1))
                }
                "leaky-read" => {
                    storage.put(b"leak".to_vec(), vec![1]);
                    Ok(Response::ok_uint(0))
                }
                _ => Err(VmError::UnknownFunction {
                    contract: "flaky".to_string(),
                    function: function.to_string(),
                }),
            }
        }

        fn is_read_only(&self, function: &str) -> bool {
            function == "leaky-read"
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn eco_chain() -> SimChain {
        let _ = env_logger::builder().is_test(true).try_init();
        let chain = SimChain::new(Arc::new(SystemClock));
        chain
            .deploy("eco-footprint".into(), Arc::new(EcoFootprint))
            .unwrap();
        chain
    }

    fn add_entry(sender: &Principal, category: &str, amount: u128) -> Transaction {
        Transaction::contract_call(
            "eco-footprint",
            "add-entry",
            vec![Value::string(category), Value::uint(amount)],
            sender.clone(),
        )
    }

    #[tokio::test]
    async fn test_mine_empty_block() {
        let chain = eco_chain();
        assert_eq!(chain.tip_height(), 0);

        let block = chain.mine_block().await.unwrap();
        assert_eq!(block.height, 1);
        assert!(block.transactions.is_empty());
        assert_eq!(chain.tip_height(), 1);
        assert_eq!(chain.mempool_len(), 0);
    }

    #[tokio::test]
    async fn test_deploy_twice_fails() {
        let chain = eco_chain();
        let result = chain.deploy("eco-footprint".into(), Arc::new(EcoFootprint));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_submit_unknown_contract_rejected() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");
        let tx = Transaction::contract_call("no-such-contract", "f", vec![], sender);

        let err = chain.submit(tx).await.unwrap_err();
        assert!(err.to_string().contains("Unknown contract"));
        assert_eq!(chain.mempool_len(), 0);
    }

    #[tokio::test]
    async fn test_submit_read_only_function_rejected() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");
        let tx = Transaction::contract_call(
            "eco-footprint",
            "get-total",
            vec![Value::principal(sender.clone())],
            sender,
        );

        let err = chain.submit(tx).await.unwrap_err();
        assert!(err.to_string().contains("cannot be submitted"));
    }

    #[tokio::test]
    async fn test_receipts_align_with_transactions() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");

        let block = chain
            .mine_block_with(vec![
                add_entry(&sender, "cycling", 10),
                add_entry(&sender, "walking", 5),
            ])
            .await
            .unwrap();

        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.receipts.len(), 2);
        for (tx, receipt) in block.transactions.iter().zip(block.receipts.iter()) {
            assert_eq!(tx.hash, receipt.tx_hash);
        }
        // Running total visible within a single block
        assert_eq!(block.receipts[0].result, Response::ok_uint(10));
        assert_eq!(block.receipts[1].result, Response::ok_uint(15));
    }

    #[tokio::test]
    async fn test_err_response_rolls_back_writes() {
        let chain = SimChain::new(Arc::new(SystemClock));
        chain.deploy("flaky".into(), Arc::new(Flaky)).unwrap();
        let root_before = chain.state_root();

        let sender = Principal::derive("deployer");
        let tx = Transaction::contract_call("flaky", "write-then-fail", vec![], sender);
        let block = chain.mine_block_with(vec![tx]).await.unwrap();

        assert_eq!(block.receipts[0].result, Response::err_uint(1));
        assert_eq!(chain.contract_state_len(&"flaky".into()), 0);
        assert_eq!(chain.state_root(), root_before);
    }

    #[tokio::test]
    async fn test_aborted_block_commits_nothing() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");
        let root_before = chain.state_root();

        // A valid entry followed by a call that aborts mining
        let bad = Transaction::contract_call("eco-footprint", "no-such-fn", vec![], sender.clone());
        let err = chain
            .mine_block_with(vec![add_entry(&sender, "cycling", 10), bad])
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown function"));

        // The first transaction's writes must not survive the abort
        assert_eq!(chain.tip_height(), 0);
        assert_eq!(chain.contract_state_len(&"eco-footprint".into()), 0);
        assert_eq!(chain.state_root(), root_before);

        let total = chain
            .call_read_only(
                &"eco-footprint".into(),
                "get-total",
                &[Value::principal(sender.clone())],
                &sender,
            )
            .await
            .unwrap();
        assert_eq!(total, Response::ok_uint(0));
    }

    #[tokio::test]
    async fn test_unknown_function_aborts_mining() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");
        let tx = Transaction::contract_call("eco-footprint", "no-such-fn", vec![], sender);

        let err = chain.mine_block_with(vec![tx]).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown function"));
        // The block was not created
        assert_eq!(chain.tip_height(), 0);
    }

    #[tokio::test]
    async fn test_read_only_call_does_not_mutate() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");
        chain
            .mine_block_with(vec![add_entry(&sender, "cycling", 10)])
            .await
            .unwrap();

        let height = chain.tip_height();
        let root = chain.state_root();

        let response = chain
            .call_read_only(
                &"eco-footprint".into(),
                "get-total",
                &[Value::principal(sender.clone())],
                &sender,
            )
            .await
            .unwrap();

        assert_eq!(response, Response::ok_uint(10));
        assert_eq!(chain.tip_height(), height);
        assert_eq!(chain.state_root(), root);
    }

    #[tokio::test]
    async fn test_read_only_rejects_public_function() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");

        let err = chain
            .call_read_only(
                &"eco-footprint".into(),
                "add-entry",
                &[Value::string("cycling"), Value::uint(10)],
                &sender,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not read-only"));
        // Nothing leaked into committed state
        assert_eq!(chain.contract_state_len(&"eco-footprint".into()), 0);
    }

    #[tokio::test]
    async fn test_read_only_write_is_detected() {
        let chain = SimChain::new(Arc::new(SystemClock));
        chain.deploy("flaky".into(), Arc::new(Flaky)).unwrap();
        let sender = Principal::derive("deployer");

        let err = chain
            .call_read_only(&"flaky".into(), "leaky-read", &[], &sender)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("storage write"));
        assert_eq!(chain.contract_state_len(&"flaky".into()), 0);
    }

    #[tokio::test]
    async fn test_block_timestamps_follow_clock() {
        let clock = Arc::new(PausedClock::new());
        let chain = SimChain::new(clock.clone());
        chain
            .deploy("eco-footprint".into(), Arc::new(EcoFootprint))
            .unwrap();

        let first = chain.mine_block().await.unwrap();
        assert_eq!(first.timestamp_millis, 0);

        clock.advance(Duration::from_secs(5)).await;
        let second = chain.mine_block().await.unwrap();
        assert_eq!(second.timestamp_millis, 5_000);
    }

    #[tokio::test]
    async fn test_block_history_is_queryable() {
        let chain = eco_chain();
        let sender = Principal::derive("deployer");

        chain
            .mine_block_with(vec![add_entry(&sender, "cycling", 10)])
            .await
            .unwrap();
        chain.mine_block().await.unwrap();

        let genesis = chain.block_at(0).unwrap();
        assert_eq!(genesis.hash, Hash::zero());

        let first = chain.block_at(1).unwrap();
        assert_eq!(first.height, 1);
        assert_eq!(first.transactions.len(), 1);

        assert!(chain.block_at(3).is_none());
    }
}
