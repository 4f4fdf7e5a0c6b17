//! Account identities (principals) used as the caller or subject of a
//! contract call.

use crate::crypto::hash;
use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::TryInto,
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

pub const PRINCIPAL_SIZE: usize = 32;

/// Domain separator for name-derived test principals
const PRINCIPAL_DERIVE_PREFIX: &[u8] = b"eco-principal/";

/// An account identity on the simulated chain.
///
/// Principals are opaque 32-byte keys. The harness derives them
/// deterministically from account names so that the same named account
/// ("deployer", "wallet_1", ...) resolves to the same address in every run.
#[derive(Eq, PartialEq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Principal([u8; PRINCIPAL_SIZE]);

impl Principal {
    pub const fn new(bytes: [u8; PRINCIPAL_SIZE]) -> Self {
        Principal(bytes)
    }

    pub const fn zero() -> Self {
        Principal::new([0; PRINCIPAL_SIZE])
    }

    /// Derive a principal from a human-readable account name.
    pub fn derive(name: &str) -> Self {
        let mut input = Vec::with_capacity(PRINCIPAL_DERIVE_PREFIX.len() + name.len());
        input.extend_from_slice(PRINCIPAL_DERIVE_PREFIX);
        input.extend_from_slice(name.as_bytes());
        Principal(hash(&input).to_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Principal {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('P').unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| "Invalid hex string")?;
        let bytes: [u8; PRINCIPAL_SIZE] = bytes.try_into().map_err(|_| "Invalid principal")?;
        Ok(Principal::new(bytes))
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "P{}", self.to_hex())
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Principal::from_str(&text).map_err(SerdeError::custom)
    }
}
