//! # ShareGate Transactions
//!
//! Deterministic construction and canonical encoding of share-access
//! transactions.
//!
//! The [`TransactionBuilder`] turns validated inputs into an
//! [`UnsignedTransaction`]; signing and submission live elsewhere. A
//! builder call with the same inputs always yields the same bytes and
//! the same [`TransactionId`](sharegate_core::TransactionId).

pub mod abi;
pub mod builder;
pub mod call;
pub mod error;
pub mod transaction;

pub use builder::TransactionBuilder;
pub use call::{ShareCall, ShareQuery};
pub use error::BuildError;
pub use transaction::{
    ReadOnlyInvocation, SignedTransaction, UnsignedTransaction, ID_DOMAIN, SIGN_DOMAIN,
    TRANSACTION_VERSION,
};
