//! Ledger abstraction: transaction submission and read-only invocation.
//!
//! Implementations may speak JSON-RPC to a real node or execute
//! in-process. Callers only see this trait, so the client logic is
//! testable against [`MemoryLedger`](crate::MemoryLedger) without a
//! network.

use async_trait::async_trait;

use sharegate_core::TransactionId;
use sharegate_tx::{ReadOnlyInvocation, SignedTransaction};

use crate::error::LedgerError;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// An execution result value returned by a read-only invocation.
///
/// The contract's return types are a closed set: queries answer with a
/// string (the cid) or an unsigned integer (counter readouts). Anything
/// a node hands back outside it is a decoding defect on the caller's
/// side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An unsigned integer.
    U64(u64),
    /// A string, e.g. a cid.
    Str(String),
}

impl Value {
    /// The contained string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Ledger trait for submitting transactions and running queries.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Submit a signed transaction for execution.
    ///
    /// Returns the transaction id the ledger will process it under.
    /// Acceptance is not finality; the id is the handle for any later
    /// receipt lookup.
    async fn submit(&self, transaction: &SignedTransaction) -> Result<TransactionId>;

    /// Run a read-only invocation against current contract state.
    ///
    /// Free of charge and side effects. A revert inside the entry point
    /// surfaces as [`LedgerError::Execution`].
    async fn invoke_read_only(&self, invocation: &ReadOnlyInvocation) -> Result<Value>;
}

#[async_trait]
impl<L: LedgerService + ?Sized> LedgerService for std::sync::Arc<L> {
    async fn submit(&self, transaction: &SignedTransaction) -> Result<TransactionId> {
        (**self).submit(transaction).await
    }

    async fn invoke_read_only(&self, invocation: &ReadOnlyInvocation) -> Result<Value> {
        (**self).invoke_read_only(invocation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_as_str_only_for_strings() {
        assert_eq!(Value::Str("bafy".into()).as_str(), Some("bafy"));
        assert_eq!(Value::U64(7).as_str(), None);
    }
}
