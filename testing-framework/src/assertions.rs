// File: testing-framework/src/assertions.rs
//
// Expectation helpers over contract responses and values.
//
// These mirror the receipt-assertion surface of contract test harnesses:
// `receipt.result.expect_ok().expect_uint(15)`. Failures panic with both
// sides rendered in call notation.

use eco_common::{Response, Value};

/// Expectations on a contract [`Response`].
pub trait ResponseExt {
    /// Assert the response is `(ok ...)` and return the inner value.
    fn expect_ok(&self) -> &Value;

    /// Assert the response is `(err ...)` and return the inner value.
    fn expect_err(&self) -> &Value;
}

impl ResponseExt for Response {
    #[track_caller]
    fn expect_ok(&self) -> &Value {
        match self {
            Response::Ok(v) => v,
            Response::Err(_) => panic!("Expected (ok ...), got {}", self),
        }
    }

    #[track_caller]
    fn expect_err(&self) -> &Value {
        match self {
            Response::Err(v) => v,
            Response::Ok(_) => panic!("Expected (err ...), got {}", self),
        }
    }
}

/// Expectations on a contract [`Value`].
pub trait ValueExt {
    /// Assert the value is the given uint.
    fn expect_uint(&self, expected: u128);

    /// Assert the value is the given bool.
    fn expect_bool(&self, expected: bool);
}

impl ValueExt for Value {
    #[track_caller]
    fn expect_uint(&self, expected: u128) {
        match self {
            Value::Uint(v) if *v == expected => {}
            other => panic!("Expected u{}, got {}", expected, other),
        }
    }

    #[track_caller]
    fn expect_bool(&self, expected: bool) {
        match self {
            Value::Bool(b) if *b == expected => {}
            other => panic!("Expected {}, got {}", expected, other),
        }
    }
}
