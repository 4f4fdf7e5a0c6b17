//! Core types for the eco-footprint simulated chain.
//!
//! This crate holds everything shared between the chain simulator and the
//! test harness: hashes, principals, contract values, the contract
//! execution trait and its storage abstraction, and the typed error space.

pub mod account;
pub mod contract;
pub mod crypto;
pub mod error;
pub mod value;

pub use account::Principal;
pub use contract::{CallEnv, Contract, ContractStorage, StorageOverlay};
pub use crypto::Hash;
pub use error::VmError;
pub use value::{Response, Value};
