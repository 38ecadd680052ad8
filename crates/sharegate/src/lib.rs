//! # Sharegate
//!
//! The unified client API for the share-access protocol - gating a cid
//! behind an on-chain access list with expiry.
//!
//! ## Overview
//!
//! Sharegate bridges a user's wallet and a deployed share contract:
//!
//! - **Shares**: A cid, an owner, a recipient set, and an expiry,
//!   recorded on chain under a share id
//! - **Transactions**: Deterministic, content-addressed create/revoke
//!   calls, signed by the wallet
//! - **Queries**: Free read-only invocations answering "may this
//!   identity read the cid right now"
//!
//! ## Key Concepts
//!
//! - **Wallet**: Holds the keys and the user's consent. Signing is the
//!   only operation that prompts.
//! - **Builder**: Pure. Validates inputs before anything is signed.
//! - **Denial**: A valid query answer, not an error. Transport faults
//!   are errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sharegate::{ClientConfig, ShareClient};
//! use sharegate::core::{Cid, ContractHash, NetworkName, Timestamp};
//! use sharegate::ledger::MemoryLedger;
//! use sharegate::wallet::MemoryWallet;
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new(NetworkName::new("casper-test"), ContractHash::from_bytes([7; 32]));
//!     let config = ClientConfig::new("http://localhost:7777/rpc", NetworkName::new("casper-test"))
//!         .with_contract_hash(ContractHash::from_bytes([7; 32]));
//!     let client = ShareClient::new(config, MemoryWallet::new(), ledger);
//!
//!     // Establish a session
//!     client.connect_wallet().await.unwrap();
//!
//!     // Share a cid with one recipient for an hour
//!     let recipient = MemoryWallet::new().public_key();
//!     let tx_id = client
//!         .create_share(
//!             Cid::new("bafybeigdyrzt5s"),
//!             &[recipient],
//!             Timestamp::now().plus_secs(3600),
//!         )
//!         .await
//!         .unwrap();
//!     println!("submitted {tx_id}");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `sharegate::core` - Core primitives (Cid, PublicKey, etc.)
//! - `sharegate::tx` - Transaction building and encoding
//! - `sharegate::wallet` - Wallet abstraction
//! - `sharegate::ledger` - Ledger abstraction and in-memory reference

pub mod client;
pub mod config;
pub mod error;

// Re-export component crates
pub use sharegate_core as core;
pub use sharegate_ledger as ledger;
pub use sharegate_tx as tx;
pub use sharegate_wallet as wallet;

// Re-export main types for convenience
pub use client::{AccessOutcome, DenialKind, DenialReason, ShareClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};

// Re-export commonly used component types
pub use sharegate_core::{
    Cid, ContractHash, Keypair, Motes, NetworkName, PublicKey, ShareId, Signature, Timestamp,
    TransactionId,
};
pub use sharegate_ledger::{LedgerError, LedgerService, MemoryLedger};
pub use sharegate_tx::{
    BuildError, ReadOnlyInvocation, ShareCall, ShareQuery, SignedTransaction, TransactionBuilder,
    UnsignedTransaction,
};
pub use sharegate_wallet::{MemoryWallet, Wallet, WalletError};
