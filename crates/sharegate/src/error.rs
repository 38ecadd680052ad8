//! Error types for client operations.

use sharegate_core::CoreError;
use sharegate_ledger::{ExecutionFailure, LedgerError};
use sharegate_tx::{BuildError, SignedTransaction};
use sharegate_wallet::WalletError;
use thiserror::Error;

/// Errors from [`ShareClient`](crate::ShareClient) operations.
///
/// Every variant is distinguishable by matching; nothing is collapsed
/// into strings. Note what is *not* here: a denied query is a valid
/// [`AccessOutcome`](crate::AccessOutcome), not an error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The wallet boundary failed: unavailable, rejected, no session,
    /// or a signing fault.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// No contract hash is configured; the call cannot be addressed.
    #[error("no contract hash configured")]
    NotConfigured,

    /// The transaction inputs were rejected locally before anything
    /// was signed or sent.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// A transaction body could not be canonically encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] CoreError),

    /// Submission failed after signing. The signed transaction is
    /// carried along so the caller can resubmit without prompting the
    /// wallet again.
    #[error("submission failed: {source}")]
    Submission {
        source: LedgerError,
        signed: Box<SignedTransaction>,
    },

    /// A read-only invocation faulted: a transport failure or an answer
    /// outside the contract's access decisions. Says nothing about
    /// whether access would be granted.
    #[error("query failed: {0}")]
    Query(LedgerError),

    /// The node refused the transaction before execution.
    #[error("ledger validation failed: {0}")]
    Validation(String),

    /// The contract executed the transaction and rejected it.
    #[error("transaction rejected: {0}")]
    Rejected(ExecutionFailure),

    /// The ledger answered a query successfully but the value was not
    /// a cid. Distinct from both a denial and a transport fault.
    #[error("malformed query result: {0}")]
    Decode(String),
}

impl ClientError {
    /// The signed transaction preserved by a submission failure, for
    /// retrying without a second wallet prompt.
    pub fn signed_transaction(&self) -> Option<&SignedTransaction> {
        match self {
            Self::Submission { signed, .. } => Some(signed),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
