use thiserror::Error;

/// Harness-level execution failures.
///
/// These are distinct from contract-level `(err ...)` responses: a
/// `VmError` means the call itself was malformed (wrong function, wrong
/// arguments, broken storage) and aborts the surrounding operation instead
/// of producing a receipt.
#[derive(Debug, Error)]
pub enum VmError {
    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("Unknown function '{function}' in contract '{contract}'")]
    UnknownFunction { contract: String, function: String },

    #[error("Wrong number of arguments for '{function}': expected {expected}, got {got}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("Bad argument {index} for '{function}': expected {expected}, got {got}")]
    ArgumentType {
        function: String,
        index: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Function '{0}' is not read-only")]
    NotReadOnly(String),

    #[error("Read-only call to '{0}' attempted a storage write")]
    WriteInReadOnly(String),

    #[error("Corrupt storage value under key {key_hex}")]
    CorruptStorage { key_hex: String },
}
