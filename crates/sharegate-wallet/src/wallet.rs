//! Wallet abstraction for session and signing.
//!
//! The wallet holds the user's keys and decides, with the user, whether
//! to sign. Implementations may bridge to a browser extension, a
//! hardware device, or an in-process keypair; callers only see this
//! trait.

use async_trait::async_trait;
use bytes::Bytes;

use sharegate_core::{PublicKey, Signature};

use crate::error::WalletError;

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet trait for session management and transaction signing.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Establish a session.
    ///
    /// Suspends until the user approves or rejects. Connecting twice is
    /// harmless; an established session is kept.
    async fn connect(&self) -> Result<()>;

    /// Whether a session is currently active. Never fails and never
    /// prompts the user.
    fn is_connected(&self) -> bool;

    /// The identity of the active account.
    ///
    /// Fails with [`WalletError::NoActiveSession`] when no session is
    /// established.
    fn active_identity(&self) -> Result<PublicKey>;

    /// Ask the wallet to sign `message` with `identity`.
    ///
    /// This is the only operation that shows the user a signing prompt.
    /// It suspends until the user decides. The wallet holds the secret
    /// key; the message bytes are all that crosses the boundary.
    async fn sign(&self, message: Bytes, identity: &PublicKey) -> Result<Signature>;
}

#[async_trait]
impl<W: Wallet + ?Sized> Wallet for std::sync::Arc<W> {
    async fn connect(&self) -> Result<()> {
        (**self).connect().await
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn active_identity(&self) -> Result<PublicKey> {
        (**self).active_identity()
    }

    async fn sign(&self, message: Bytes, identity: &PublicKey) -> Result<Signature> {
        (**self).sign(message, identity).await
    }
}
