// File: testing-framework/src/harness/mod.rs
//
// TestChain - named accounts and a fluent builder over SimChain.
//
// Mirrors the ergonomics of a contract test harness: look up a named
// account, build contract calls, mine them in a block, assert on the
// receipts.

use anyhow::Result;
use eco_chain::clock::{Clock, SystemClock};
use eco_chain::contracts::{EcoFootprint, CONTRACT_NAME};
use eco_chain::{Block, ContractId, SimChain, Transaction};
use eco_common::contract::Contract;
use eco_common::{Principal, Response, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named test account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Account name, e.g. `"deployer"` or `"wallet_1"`
    pub name: String,
    /// Principal derived deterministically from the name
    pub address: Principal,
}

impl Account {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: Principal::derive(name),
        }
    }
}

/// Builder for [`TestChain`] instances.
///
/// # Example
///
/// ```rust,ignore
/// let chain = TestChainBuilder::eco_footprint()
///     .with_wallet_count(2)
///     .build()
///     .unwrap();
/// ```
pub struct TestChainBuilder {
    clock: Option<Arc<dyn Clock>>,
    extra_accounts: Vec<String>,
    wallet_count: usize,
    contracts: Vec<(ContractId, Arc<dyn Contract>)>,
}

impl TestChainBuilder {
    /// Create new builder with defaults: a `deployer` account plus
    /// `wallet_1`..`wallet_4`, no contracts.
    pub fn new() -> Self {
        Self {
            clock: None,
            extra_accounts: Vec::new(),
            wallet_count: 4,
            contracts: Vec::new(),
        }
    }

    /// Builder preloaded with the eco-footprint contract under its
    /// canonical id.
    pub fn eco_footprint() -> Self {
        Self::new().with_contract(ContractId::new(CONTRACT_NAME), Arc::new(EcoFootprint))
    }

    /// Set clock implementation.
    ///
    /// If not set, uses [`SystemClock`] by default.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register an additional named account.
    pub fn with_account(mut self, name: &str) -> Self {
        self.extra_accounts.push(name.to_string());
        self
    }

    /// Number of `wallet_N` accounts registered alongside `deployer`.
    pub fn with_wallet_count(mut self, count: usize) -> Self {
        self.wallet_count = count;
        self
    }

    /// Deploy a contract when the chain is built.
    pub fn with_contract(mut self, id: ContractId, contract: Arc<dyn Contract>) -> Self {
        self.contracts.push((id, contract));
        self
    }

    /// Build the TestChain instance.
    ///
    /// # Errors
    ///
    /// Fails if two contracts were registered under the same id.
    pub fn build(self) -> Result<TestChain> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let chain = SimChain::new(clock);

        for (id, contract) in self.contracts {
            chain.deploy(id, contract)?;
        }

        let mut accounts = BTreeMap::new();
        let mut register = |name: &str| {
            accounts.insert(name.to_string(), Account::named(name));
        };

        register("deployer");
        for i in 1..=self.wallet_count {
            register(&format!("wallet_{}", i));
        }
        for name in &self.extra_accounts {
            register(name);
        }

        log::debug!("TestChain ready with {} accounts", accounts.len());

        Ok(TestChain { chain, accounts })
    }
}

impl Default for TestChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A simulated chain plus its named account registry.
pub struct TestChain {
    chain: SimChain,
    accounts: BTreeMap<String, Account>,
}

impl TestChain {
    /// Look up a named account.
    ///
    /// # Panics
    ///
    /// Panics with the list of known accounts when the name is not
    /// registered; tests should fail loudly on a typo.
    #[track_caller]
    pub fn account(&self, name: &str) -> &Account {
        match self.accounts.get(name) {
            Some(account) => account,
            None => panic!(
                "Unknown account '{}' (known: {})",
                name,
                self.accounts
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Look up a named account without panicking.
    pub fn get_account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// Build a contract-call transaction signed by `sender`.
    pub fn contract_call(
        &self,
        contract: &str,
        function: &str,
        args: Vec<Value>,
        sender: &Account,
    ) -> Transaction {
        Transaction::contract_call(contract, function, args, sender.address.clone())
    }

    /// Mine a block carrying the given transactions.
    pub async fn mine_block(&self, txs: Vec<Transaction>) -> Result<Block> {
        self.chain.mine_block_with(txs).await
    }

    /// Mine a block with no transactions.
    pub async fn mine_empty_block(&self) -> Result<Block> {
        self.chain.mine_block().await
    }

    /// Evaluate a read-only function without mining.
    pub async fn call_read_only(
        &self,
        contract: &str,
        function: &str,
        args: &[Value],
        sender: &Account,
    ) -> Result<Response> {
        self.chain
            .call_read_only(&ContractId::new(contract), function, args, &sender.address)
            .await
    }

    /// The underlying simulated chain, for direct state assertions.
    pub fn chain(&self) -> &SimChain {
        &self.chain
    }
}
