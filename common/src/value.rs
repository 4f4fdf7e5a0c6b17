//! Contract value space.
//!
//! Values are what contract calls carry as arguments and return inside a
//! [`Response`]. The rendering follows the conventional on-chain notation
//! (`u10`, `"cycling"`, `true`, `'P...`) so assertion failures read like
//! the call site that produced them.

use crate::account::Principal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// A single contract value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Unsigned 128-bit integer (`u10`)
    Uint(u128),
    /// Boolean (`true` / `false`)
    Bool(bool),
    /// ASCII string (`"cycling"`)
    Str(String),
    /// Account identity (`'P...`)
    Principal(Principal),
}

impl Value {
    pub fn uint(v: u128) -> Self {
        Value::Uint(v)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn principal(p: Principal) -> Self {
        Value::Principal(p)
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_principal(&self) -> Option<&Principal> {
        match self {
            Value::Principal(p) => Some(p),
            _ => None,
        }
    }

    /// Name of the value's type, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Principal(_) => "principal",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Value::Uint(v) => write!(f, "u{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Principal(p) => write!(f, "'{}", p),
        }
    }
}

/// Contract-level result of a call.
///
/// Both branches are successful executions as far as the chain is
/// concerned: `Err` carries a contract error code and causes the
/// transaction's storage writes to be rolled back, but the transaction is
/// still mined and receives a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Ok(Value),
    Err(Value),
}

impl Response {
    /// Shorthand for `(ok uN)`, the most common success shape.
    pub fn ok_uint(v: u128) -> Self {
        Response::Ok(Value::Uint(v))
    }

    /// Shorthand for `(err uN)` with a contract error code.
    pub fn err_uint(code: u128) -> Self {
        Response::Err(Value::Uint(code))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Response::Err(_))
    }

    pub fn ok(&self) -> Option<&Value> {
        match self {
            Response::Ok(v) => Some(v),
            Response::Err(_) => None,
        }
    }

    pub fn err(&self) -> Option<&Value> {
        match self {
            Response::Ok(_) => None,
            Response::Err(v) => Some(v),
        }
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Response::Ok(v) => write!(f, "(ok {})", v),
            Response::Err(v) => write!(f, "(err {})", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::uint(10).to_string(), "u10");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::string("cycling").to_string(), "\"cycling\"");

        let p = Principal::derive("deployer");
        assert_eq!(Value::principal(p.clone()).to_string(), format!("'{}", p));
    }

    #[test]
    fn test_response_display() {
        assert_eq!(Response::ok_uint(15).to_string(), "(ok u15)");
        assert_eq!(Response::err_uint(100).to_string(), "(err u100)");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::uint(5).as_uint(), Some(5));
        assert_eq!(Value::uint(5).as_str(), None);
        assert_eq!(Value::string("walking").as_str(), Some("walking"));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
    }

    #[test]
    fn test_response_branches() {
        let ok = Response::ok_uint(10);
        assert!(ok.is_ok());
        assert_eq!(ok.ok(), Some(&Value::Uint(10)));
        assert_eq!(ok.err(), None);

        let err = Response::err_uint(102);
        assert!(err.is_err());
        assert_eq!(err.err(), Some(&Value::Uint(102)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let response = Response::Ok(Value::string("cycling"));
        let json = serde_json::to_string(&response).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
