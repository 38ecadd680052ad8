//! Error types for core operations.

use thiserror::Error;

/// Errors from core primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A public key could not be parsed or used for verification.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// A signature did not verify against the claimed key and message.
    #[error("invalid signature")]
    InvalidSignature,

    /// A value could not be canonically encoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}
