//! Contract-call transactions.

use eco_common::crypto::{hash, Hash};
use eco_common::{Principal, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Identifier of a deployed contract (its name, e.g. `"eco-footprint"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractId(String);

impl ContractId {
    pub fn new(name: impl Into<String>) -> Self {
        ContractId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractId {
    fn from(name: &str) -> Self {
        ContractId::new(name)
    }
}

/// A simulated contract-call transaction submitted for inclusion in a
/// mined block.
///
/// Transactions are content-addressed: the hash is a digest over sender,
/// contract, function and arguments. Two byte-identical calls share a
/// hash; receipts are matched to transactions by block position, so this
/// is harmless in the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash
    pub hash: Hash,
    /// Principal signing the call
    pub sender: Principal,
    /// Target contract
    pub contract: ContractId,
    /// Function to invoke
    pub function: String,
    /// Call arguments
    pub args: Vec<Value>,
}

impl Transaction {
    /// Build a contract-call transaction, computing its content hash.
    pub fn contract_call(
        contract: impl Into<ContractId>,
        function: impl Into<String>,
        args: Vec<Value>,
        sender: Principal,
    ) -> Self {
        let contract = contract.into();
        let function = function.into();
        let hash = Self::compute_hash(&sender, &contract, &function, &args);
        Self {
            hash,
            sender,
            contract,
            function,
            args,
        }
    }

    // Length-prefixed so field and argument boundaries cannot alias,
    // tagged so values of different types cannot collide
    fn compute_hash(
        sender: &Principal,
        contract: &ContractId,
        function: &str,
        args: &[Value],
    ) -> Hash {
        fn push_bytes(input: &mut Vec<u8>, bytes: &[u8]) {
            input.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
            input.extend_from_slice(bytes);
        }

        let mut input = Vec::new();
        input.extend_from_slice(sender.as_bytes());
        push_bytes(&mut input, contract.as_str().as_bytes());
        push_bytes(&mut input, function.as_bytes());
        for arg in args {
            match arg {
                Value::Uint(v) => {
                    input.push(0);
                    input.extend_from_slice(&v.to_le_bytes());
                }
                Value::Bool(b) => {
                    input.push(1);
                    input.push(*b as u8);
                }
                Value::Str(s) => {
                    input.push(2);
                    push_bytes(&mut input, s.as_bytes());
                }
                Value::Principal(p) => {
                    input.push(3);
                    input.extend_from_slice(p.as_bytes());
                }
            }
        }
        hash(&input)
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "(contract-call? {} {}", self.contract, self.function)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}
