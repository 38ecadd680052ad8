//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical transaction encoding: any other
//! implementation of the wire format must produce the same transaction
//! id from the same inputs.

use sharegate_core::{Cid, Keypair, NetworkName, PublicKey, ShareId, Timestamp};
use sharegate_tx::{SignedTransaction, TransactionBuilder};

use crate::fixtures::{TEST_CONTRACT, TEST_NETWORK};

/// The contract call a vector describes.
#[derive(Debug, Clone)]
pub enum VectorCall {
    /// A create_share call.
    Create {
        cid: &'static str,
        recipients: &'static [[u8; 32]],
        expiry: u64,
    },
    /// A revoke_share call.
    Revoke { share_id: u64 },
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for the sender keypair.
    pub seed: [u8; 32],
    /// The call being encoded.
    pub call: VectorCall,
    /// Transaction creation time, in seconds.
    pub created_at: u64,
    /// Expected transaction id (hex).
    pub expected_tx_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "create with one recipient",
            seed: [0x42; 32],
            call: VectorCall::Create {
                cid: "bafybeigdyrzt5s",
                recipients: &[[0x01; 32]],
                expiry: 1_700_003_600,
            },
            created_at: 1_700_000_000,
            expected_tx_id: "0df1bead80fd68a644c1f34cc50b2a79b5779524388dac304a3aebc5c2ca055b",
        },
        GoldenVector {
            name: "create with recipients given out of order",
            seed: [0x42; 32],
            call: VectorCall::Create {
                cid: "bafybeigdyrzt5s",
                recipients: &[[0x03; 32], [0x01; 32], [0x02; 32]],
                expiry: 1_700_003_600,
            },
            created_at: 1_700_000_000,
            expected_tx_id: "d8c5436203969579c63baad32b14aaabae7e016ea8b83607cc6fcac8b41dd6dc",
        },
        GoldenVector {
            name: "create with duplicate recipients",
            seed: [0x42; 32],
            call: VectorCall::Create {
                cid: "bafybeigdyrzt5s",
                recipients: &[[0x01; 32], [0x01; 32], [0x02; 32]],
                expiry: 1_700_003_600,
            },
            created_at: 1_700_000_000,
            expected_tx_id: "1d8be436d8e8955d7b96d7c39f429690c55dfe69547d77b65a0d346e55e4444a",
        },
        GoldenVector {
            name: "revoke share 7",
            seed: [0x42; 32],
            call: VectorCall::Revoke { share_id: 7 },
            created_at: 1_700_000_001,
            expected_tx_id: "a63cf727d632dc85c2d532c67c5a277296bc1a5d756b7bc633f0267ac809e6e4",
        },
    ]
}

/// Build and sign the transaction a vector describes.
pub fn generate_transaction_from_vector(vector: &GoldenVector) -> SignedTransaction {
    let keypair = Keypair::from_seed(&vector.seed);
    let builder = TransactionBuilder::new(NetworkName::new(TEST_NETWORK), TEST_CONTRACT);
    let created_at = Timestamp::from_secs(vector.created_at);

    let transaction = match &vector.call {
        VectorCall::Create {
            cid,
            recipients,
            expiry,
        } => {
            let recipients: Vec<PublicKey> =
                recipients.iter().copied().map(PublicKey::from_bytes).collect();
            builder
                .create_share(
                    Cid::new(*cid),
                    &recipients,
                    Timestamp::from_secs(*expiry),
                    keypair.public_key(),
                    created_at,
                )
                .expect("vector inputs satisfy the builder's checks")
        }
        VectorCall::Revoke { share_id } => {
            builder.revoke_share(ShareId::new(*share_id), keypair.public_key(), created_at)
        }
    };

    let signature = keypair.sign(
        &transaction
            .signing_bytes()
            .expect("vector transactions encode"),
    );
    SignedTransaction {
        transaction,
        signature,
    }
}

/// Verify all golden vectors against their pinned transaction ids.
///
/// Returns (name, matches, actual hex id) per vector, so a failing run
/// reports what the encoder produced instead.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let signed = generate_transaction_from_vector(v);
            let hex = signed.id().expect("vector transactions encode").to_hex();

            let matches = hex == v.expected_tx_id;

            (v.name.to_string(), matches, hex)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let s1 = generate_transaction_from_vector(&vector);
            let s2 = generate_transaction_from_vector(&vector);

            assert_eq!(
                s1.id().unwrap(),
                s2.id().unwrap(),
                "Vector '{}' produced different ids on regeneration",
                vector.name
            );
            assert_eq!(
                s1.transaction.canonical_bytes().unwrap(),
                s2.transaction.canonical_bytes().unwrap(),
                "Vector '{}' produced different canonical bytes",
                vector.name
            );

            s1.verify()
                .unwrap_or_else(|_| panic!("Vector '{}' failed verification", vector.name));
        }
    }

    #[test]
    fn test_input_order_and_duplicates_do_not_change_the_id() {
        fn variant(recipients: &'static [[u8; 32]]) -> GoldenVector {
            GoldenVector {
                name: "variant",
                seed: [0x42; 32],
                call: VectorCall::Create {
                    cid: "bafybeigdyrzt5s",
                    recipients,
                    expiry: 1_700_003_600,
                },
                created_at: 1_700_000_000,
                expected_tx_id: "",
            }
        }

        let vectors = all_vectors();

        // [03, 01, 02] encodes like [01, 02, 03].
        let unordered = generate_transaction_from_vector(&vectors[1]);
        let sorted =
            generate_transaction_from_vector(&variant(&[[0x01; 32], [0x02; 32], [0x03; 32]]));
        assert_eq!(unordered.id().unwrap(), sorted.id().unwrap());

        // [01, 01, 02] encodes like [02, 01].
        let duplicated = generate_transaction_from_vector(&vectors[2]);
        let deduped = generate_transaction_from_vector(&variant(&[[0x02; 32], [0x01; 32]]));
        assert_eq!(duplicated.id().unwrap(), deduped.id().unwrap());
    }

    #[test]
    fn test_different_seeds_different_ids() {
        let v1 = GoldenVector {
            name: "seed1",
            seed: [0x01; 32],
            call: VectorCall::Revoke { share_id: 0 },
            created_at: 1000,
            expected_tx_id: "",
        };
        let v2 = GoldenVector {
            name: "seed2",
            seed: [0x02; 32],
            call: VectorCall::Revoke { share_id: 0 },
            created_at: 1000,
            expected_tx_id: "",
        };

        let s1 = generate_transaction_from_vector(&v1);
        let s2 = generate_transaction_from_vector(&v2);
        assert_ne!(s1.id().unwrap(), s2.id().unwrap());
    }

    #[test]
    fn test_verify_reports_every_vector() {
        let report = verify_all_vectors();
        assert_eq!(report.len(), all_vectors().len());
        for (name, matches, hex) in report {
            assert!(matches, "vector '{}' diverged from its pinned id", name);
            assert_eq!(hex.len(), 64);
        }
    }

    #[test]
    fn test_every_vector_pins_an_id() {
        // A vector without a pinned id verifies nothing.
        for vector in all_vectors() {
            assert_eq!(
                vector.expected_tx_id.len(),
                64,
                "vector '{}' does not pin a transaction id",
                vector.name
            );
        }
    }

    #[test]
    fn test_vector_report_serializes() {
        #[derive(Serialize)]
        struct VectorReport {
            name: String,
            tx_id: String,
            canonical: String,
        }

        let reports: Vec<VectorReport> = all_vectors()
            .iter()
            .map(|v| {
                let signed = generate_transaction_from_vector(v);
                VectorReport {
                    name: v.name.to_string(),
                    tx_id: signed.id().unwrap().to_hex(),
                    canonical: hex::encode(signed.transaction.canonical_bytes().unwrap()),
                }
            })
            .collect();

        let json = serde_json::to_string_pretty(&reports).unwrap();
        assert!(json.contains("create with one recipient"));
        println!("{}", json);
    }
}
