//! Committed per-contract chain state.

use crate::transaction::ContractId;
use eco_common::contract::WriteSet;
use eco_common::crypto::Hash;
use std::collections::BTreeMap;

/// Committed storage for all deployed contracts.
///
/// `BTreeMap` throughout so iteration order, and therefore the state
/// root, is deterministic.
#[derive(Debug, Default)]
pub struct CommittedState {
    contracts: BTreeMap<ContractId, BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl CommittedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one contract's committed storage, empty if the
    /// contract has never written.
    pub fn snapshot(&self, contract: &ContractId) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.contracts.get(contract).cloned().unwrap_or_default()
    }

    /// Merge a successful call's write set into committed state.
    pub fn merge(&mut self, contract: &ContractId, writes: WriteSet) {
        if writes.is_empty() {
            return;
        }
        let storage = self.contracts.entry(contract.clone()).or_default();
        for (key, value) in writes {
            storage.insert(key, value);
        }
    }

    /// Number of committed keys for a contract.
    pub fn contract_len(&self, contract: &ContractId) -> usize {
        self.contracts.get(contract).map_or(0, |s| s.len())
    }

    /// Deterministic digest of the entire committed state.
    ///
    /// Length-prefixed so that key/value boundaries cannot alias across
    /// entries.
    pub fn state_root(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for (contract, storage) in &self.contracts {
            let id = contract.as_str().as_bytes();
            hasher.update(&(id.len() as u64).to_le_bytes());
            hasher.update(id);
            for (key, value) in storage {
                hasher.update(&(key.len() as u64).to_le_bytes());
                hasher.update(key);
                hasher.update(&(value.len() as u64).to_le_bytes());
                hasher.update(value);
            }
        }
        Hash::new(hasher.finalize().into())
    }
}
