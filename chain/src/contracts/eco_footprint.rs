//! eco-footprint contract
//!
//! Per-account carbon-activity ledger. Each `add-entry` records an amount
//! under a category for the calling principal and returns the new
//! cumulative total; the read-only queries report totals and entry counts
//! per account.
//!
//! Storage layout (all values little-endian):
//! - `total/<principal>`          cumulative amount, u128
//! - `count/<principal>`          number of entries, u64
//! - `cat/<principal>/<category>` cumulative amount per category, u128

use async_trait::async_trait;
use eco_common::contract::{CallEnv, Contract, ContractStorage};
use eco_common::{Principal, Response, Value, VmError};

pub const CONTRACT_NAME: &str = "eco-footprint";

/// Upper bound on category labels, matching a bounded on-chain string
pub const MAX_CATEGORY_LEN: usize = 64;

/// `(err u100)` - empty category label
pub const ERR_EMPTY_CATEGORY: u128 = 100;
/// `(err u101)` - category label too long or not ASCII
pub const ERR_CATEGORY_TOO_LONG: u128 = 101;
/// `(err u102)` - cumulative total would overflow
pub const ERR_TOTAL_OVERFLOW: u128 = 102;

const TOTAL_PREFIX: &[u8] = b"total/";
const COUNT_PREFIX: &[u8] = b"count/";
const CATEGORY_PREFIX: &[u8] = b"cat/";

/// The eco-footprint ledger contract.
pub struct EcoFootprint;

impl EcoFootprint {
    fn total_key(account: &Principal) -> Vec<u8> {
        let mut key = TOTAL_PREFIX.to_vec();
        key.extend_from_slice(account.as_bytes());
        key
    }

    fn count_key(account: &Principal) -> Vec<u8> {
        let mut key = COUNT_PREFIX.to_vec();
        key.extend_from_slice(account.as_bytes());
        key
    }

    fn category_key(account: &Principal, category: &str) -> Vec<u8> {
        let mut key = CATEGORY_PREFIX.to_vec();
        key.extend_from_slice(account.as_bytes());
        key.push(b'/');
        key.extend_from_slice(category.as_bytes());
        key
    }

    fn read_u128(storage: &dyn ContractStorage, key: &[u8]) -> Result<u128, VmError> {
        match storage.get(key) {
            None => Ok(0),
            Some(bytes) => {
                let bytes: [u8; 16] = bytes.try_into().map_err(|_| VmError::CorruptStorage {
                    key_hex: hex::encode(key),
                })?;
                Ok(u128::from_le_bytes(bytes))
            }
        }
    }

    fn read_u64(storage: &dyn ContractStorage, key: &[u8]) -> Result<u64, VmError> {
        match storage.get(key) {
            None => Ok(0),
            Some(bytes) => {
                let bytes: [u8; 8] = bytes.try_into().map_err(|_| VmError::CorruptStorage {
                    key_hex: hex::encode(key),
                })?;
                Ok(u64::from_le_bytes(bytes))
            }
        }
    }

    fn expect_arity(function: &str, args: &[Value], expected: usize) -> Result<(), VmError> {
        if args.len() != expected {
            return Err(VmError::ArityMismatch {
                function: function.to_string(),
                expected,
                got: args.len(),
            });
        }
        Ok(())
    }

    fn expect_string<'a>(
        function: &str,
        args: &'a [Value],
        index: usize,
    ) -> Result<&'a str, VmError> {
        args[index].as_str().ok_or_else(|| VmError::ArgumentType {
            function: function.to_string(),
            index,
            expected: "string",
            got: args[index].type_name(),
        })
    }

    fn expect_uint(function: &str, args: &[Value], index: usize) -> Result<u128, VmError> {
        args[index].as_uint().ok_or_else(|| VmError::ArgumentType {
            function: function.to_string(),
            index,
            expected: "uint",
            got: args[index].type_name(),
        })
    }

    fn expect_principal<'a>(
        function: &str,
        args: &'a [Value],
        index: usize,
    ) -> Result<&'a Principal, VmError> {
        args[index]
            .as_principal()
            .ok_or_else(|| VmError::ArgumentType {
                function: function.to_string(),
                index,
                expected: "principal",
                got: args[index].type_name(),
            })
    }

    /// `add-entry (category amount)` - record an entry for the sender and
    /// return the new cumulative total.
    fn add_entry(
        env: &CallEnv,
        storage: &mut dyn ContractStorage,
        category: &str,
        amount: u128,
    ) -> Result<Response, VmError> {
        if category.is_empty() {
            return Ok(Response::err_uint(ERR_EMPTY_CATEGORY));
        }
        if category.len() > MAX_CATEGORY_LEN || !category.is_ascii() {
            return Ok(Response::err_uint(ERR_CATEGORY_TOO_LONG));
        }

        let total_key = Self::total_key(&env.sender);
        let total = Self::read_u128(storage, &total_key)?;
        let new_total = match total.checked_add(amount) {
            Some(v) => v,
            None => return Ok(Response::err_uint(ERR_TOTAL_OVERFLOW)),
        };

        // Category totals are each bounded by the account total, so these
        // cannot overflow once the total's checked_add has passed
        let category_key = Self::category_key(&env.sender, category);
        let category_total = Self::read_u128(storage, &category_key)?.saturating_add(amount);

        let count_key = Self::count_key(&env.sender);
        let count = Self::read_u64(storage, &count_key)?.saturating_add(1);

        storage.put(total_key, new_total.to_le_bytes().to_vec());
        storage.put(category_key, category_total.to_le_bytes().to_vec());
        storage.put(count_key, count.to_le_bytes().to_vec());

        Ok(Response::ok_uint(new_total))
    }
}

#[async_trait]
impl Contract for EcoFootprint {
    async fn call(
        &self,
        env: &CallEnv,
        storage: &mut dyn ContractStorage,
        function: &str,
        args: &[Value],
    ) -> Result<Response, VmError> {
        match function {
            "add-entry" => {
                Self::expect_arity(function, args, 2)?;
                let category = Self::expect_string(function, args, 0)?.to_string();
                let amount = Self::expect_uint(function, args, 1)?;
                Self::add_entry(env, storage, &category, amount)
            }
            "get-total" => {
                Self::expect_arity(function, args, 1)?;
                let account = Self::expect_principal(function, args, 0)?;
                let total = Self::read_u128(storage, &Self::total_key(account))?;
                Ok(Response::ok_uint(total))
            }
            "get-entry-count" => {
                Self::expect_arity(function, args, 1)?;
                let account = Self::expect_principal(function, args, 0)?;
                let count = Self::read_u64(storage, &Self::count_key(account))?;
                Ok(Response::ok_uint(count as u128))
            }
            "get-category-total" => {
                Self::expect_arity(function, args, 2)?;
                let account = Self::expect_principal(function, args, 0)?.clone();
                let category = Self::expect_string(function, args, 1)?;
                let total = Self::read_u128(storage, &Self::category_key(&account, category))?;
                Ok(Response::ok_uint(total))
            }
            _ => Err(VmError::UnknownFunction {
                contract: CONTRACT_NAME.to_string(),
                function: function.to_string(),
            }),
        }
    }

    fn is_read_only(&self, function: &str) -> bool {
        matches!(
            function,
            "get-total" | "get-entry-count" | "get-category-total"
        )
    }

    fn name(&self) -> &'static str {
        CONTRACT_NAME
    }
}
