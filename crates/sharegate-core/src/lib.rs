//! # ShareGate Core
//!
//! Pure primitives for ShareGate: identifiers, keys, and canonical encoding.
//!
//! This crate contains no I/O, no wallet, no networking. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`PublicKey`] - An Ed25519 wallet identity
//! - [`TransactionId`] - Content-addressed transaction identifier (Blake3 hash)
//! - [`ShareId`] - Ledger-assigned identifier for one share
//! - [`Cid`] - Opaque content identifier gated by a share
//!
//! ## Canonicalization
//!
//! Transaction bodies are encoded using deterministic CBOR. See the
//! [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;

pub use canonical::encode_canonical;
pub use crypto::{Keypair, PublicKey, Signature};
pub use error::CoreError;
pub use types::{Cid, ContractHash, Motes, NetworkName, ShareId, Timestamp, TransactionId};
