//! Error types for ledger operations.

use std::fmt;

use thiserror::Error;

/// A contract execution that was processed and rejected.
///
/// Carries the contract's revert code plus a human-readable reason.
/// Codes are defined in [`sharegate_tx::abi::code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    /// The contract revert code.
    pub code: u16,
    /// Node-provided description of the failure.
    pub reason: String,
}

impl ExecutionFailure {
    /// Create a new execution failure.
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.reason)
    }
}

/// Failures at the ledger boundary.
///
/// The three variants mean three different things for the caller:
/// a transport failure leaves the outcome unknown, a validation failure
/// means the node refused to process the transaction at all, and an
/// execution failure means the contract processed and rejected it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The node could not be reached or dropped the connection; the
    /// transaction may or may not have landed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node rejected the transaction before execution.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The contract executed and reverted.
    #[error("execution rejected: {0}")]
    Execution(ExecutionFailure),
}

impl LedgerError {
    /// Shorthand for an execution failure.
    pub fn execution(code: u16, reason: impl Into<String>) -> Self {
        Self::Execution(ExecutionFailure::new(code, reason))
    }

    /// The execution failure inside, if that is what this is.
    pub fn as_execution(&self) -> Option<&ExecutionFailure> {
        match self {
            Self::Execution(failure) => Some(failure),
            _ => None,
        }
    }
}
