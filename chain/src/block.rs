//! Blocks and transaction receipts.

use crate::transaction::Transaction;
use eco_common::crypto::{hash, Hash};
use eco_common::Response;
use serde::{Deserialize, Serialize};

/// Outcome of one mined transaction.
///
/// Receipts align 1:1 with the block's transactions, in order. The result
/// is the contract-level [`Response`]; harness-level failures abort mining
/// instead of producing a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to
    pub tx_hash: Hash,
    /// Contract-level result of the call
    pub result: Response,
}

/// A batch of transactions committed atomically to the simulated chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block hash
    pub hash: Hash,
    /// Block height (genesis is 0)
    pub height: u64,
    /// Milliseconds since chain start, read from the injected clock
    pub timestamp_millis: u64,
    /// Transactions included in this block
    pub transactions: Vec<Transaction>,
    /// One receipt per transaction, in order
    pub receipts: Vec<Receipt>,
}

impl Block {
    /// The empty block at height 0 every chain starts from.
    pub fn genesis() -> Self {
        Self {
            hash: Hash::zero(),
            height: 0,
            timestamp_millis: 0,
            transactions: Vec::new(),
            receipts: Vec::new(),
        }
    }

    /// Deterministic block hash over height, timestamp and tx hashes.
    pub fn compute_hash(height: u64, timestamp_millis: u64, transactions: &[Transaction]) -> Hash {
        let mut input = Vec::new();
        input.extend_from_slice(&height.to_le_bytes());
        input.extend_from_slice(&timestamp_millis.to_le_bytes());
        for tx in transactions {
            input.extend_from_slice(tx.hash.as_bytes());
        }
        hash(&input)
    }
}
