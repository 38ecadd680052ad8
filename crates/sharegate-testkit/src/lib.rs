//! # ShareGate Testkit
//!
//! Testing utilities for ShareGate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known transactions with expected ids for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready-made deployment for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical transaction encoding:
//!
//! ```rust
//! use sharegate_testkit::vectors::{all_vectors, generate_transaction_from_vector};
//!
//! for vector in all_vectors() {
//!     let signed = generate_transaction_from_vector(&vector);
//!     println!("{}: {}", vector.name, signed.id().unwrap().to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sharegate_testkit::generators::{transaction_from_params, ShareParams};
//!
//! proptest! {
//!     #[test]
//!     fn transaction_id_is_deterministic(params: ShareParams) {
//!         let t1 = transaction_from_params(&params);
//!         let t2 = transaction_from_params(&params);
//!         prop_assert_eq!(t1.id().unwrap(), t2.id().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up a deployment with connected clients:
//!
//! ```rust,no_run
//! use sharegate_testkit::fixtures::{random_identity, TestNet};
//!
//! async fn example() {
//!     let net = TestNet::new();
//!     let owner = net.connected_client(0x01).await;
//!     let recipient = random_identity();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_wallets, random_identity, TestNet};
pub use generators::{transaction_from_params, ShareParams};
pub use vectors::{
    all_vectors, generate_transaction_from_vector, verify_all_vectors, GoldenVector, VectorCall,
};
