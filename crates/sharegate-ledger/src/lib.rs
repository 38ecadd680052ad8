//! # ShareGate Ledger
//!
//! The ledger boundary: submitting signed transactions and running
//! read-only invocations against the share contract.
//!
//! [`LedgerService`] is the seam; [`MemoryLedger`] implements it
//! in-process with the contract's exact semantics, a controllable block
//! time, and injectable transport faults.

pub mod error;
pub mod memory;
pub mod service;

pub use error::{ExecutionFailure, LedgerError};
pub use memory::MemoryLedger;
pub use service::{LedgerService, Result, Value};
