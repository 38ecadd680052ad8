//! Error types for wallet operations.

use thiserror::Error;

/// Failures at the wallet boundary.
///
/// Each variant is a distinct situation the caller reacts to
/// differently: prompting installation, retrying after a rejection,
/// or establishing a session first.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet is installed or reachable.
    #[error("no wallet available")]
    Unavailable,

    /// The user explicitly declined the connection or signing request.
    #[error("request rejected by user")]
    UserRejected,

    /// No session is active; connect first.
    #[error("no active wallet session")]
    NoActiveSession,

    /// Signing failed for a reason other than user rejection.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
