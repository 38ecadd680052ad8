//! # ShareGate Wallet
//!
//! The wallet boundary: session establishment, identity lookup, and
//! signing. Secret keys never cross it; callers hand over message bytes
//! and receive signatures.
//!
//! [`MemoryWallet`] is a fully scriptable in-process implementation for
//! tests and tooling.

pub mod error;
pub mod memory;
pub mod wallet;

pub use error::WalletError;
pub use memory::MemoryWallet;
pub use wallet::Wallet;
