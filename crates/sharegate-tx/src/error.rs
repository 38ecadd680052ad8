//! Error types for transaction building.

use sharegate_core::Timestamp;
use thiserror::Error;

/// Rejections raised while assembling a transaction, before anything
/// is signed or sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The content identifier was empty.
    #[error("cid must not be empty")]
    EmptyCid,

    /// The recipient list was empty.
    #[error("recipient set must not be empty")]
    NoRecipients,

    /// The requested expiry is not strictly in the future.
    #[error("expiry {expiry} is not after now {now}")]
    ExpiryNotFuture { expiry: Timestamp, now: Timestamp },
}
