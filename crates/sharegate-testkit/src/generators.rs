//! Proptest generators for property-based testing.

use proptest::prelude::*;

use sharegate_core::{
    Cid, ContractHash, Keypair, Motes, NetworkName, PublicKey, ShareId, Timestamp, TransactionId,
};
use sharegate_tx::{TransactionBuilder, UnsignedTransaction};

use crate::fixtures::{TEST_CONTRACT, TEST_NETWORK};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random PublicKey backed by a real keypair.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a random TransactionId.
pub fn transaction_id() -> impl Strategy<Value = TransactionId> {
    any::<[u8; 32]>().prop_map(TransactionId::from_bytes)
}

/// Generate a random ContractHash.
pub fn contract_hash() -> impl Strategy<Value = ContractHash> {
    any::<[u8; 32]>().prop_map(ContractHash::from_bytes)
}

/// Generate a share id.
pub fn share_id() -> impl Strategy<Value = ShareId> {
    any::<u64>().prop_map(ShareId::new)
}

/// Generate a cid-shaped string (base32 body after a CIDv1 prefix).
pub fn cid() -> impl Strategy<Value = Cid> {
    "bafy[a-z2-7]{10,48}".prop_map(Cid::new)
}

/// Generate a chain name.
pub fn network_name() -> impl Strategy<Value = NetworkName> {
    "[a-z][a-z0-9-]{0,31}".prop_map(NetworkName::new)
}

/// Generate a reasonable timestamp (up to year 2100).
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (0u64..=4_102_444_800).prop_map(Timestamp::from_secs)
}

/// Generate a non-empty recipient list.
pub fn recipients(max: usize) -> impl Strategy<Value = Vec<PublicKey>> {
    prop::collection::vec(public_key(), 1..=max)
}

/// Generate a payment amount.
pub fn payment() -> impl Strategy<Value = Motes> {
    (1u64..=1_000_000_000_000).prop_map(Motes::new)
}

/// Parameters for generating a create_share transaction.
#[derive(Debug, Clone)]
pub struct ShareParams {
    pub keypair: Keypair,
    pub cid: Cid,
    pub recipients: Vec<PublicKey>,
    pub created_at: Timestamp,
    pub ttl_secs: u64,
}

impl Arbitrary for ShareParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // sender seed
            cid(),
            recipients(8),
            timestamp(),
            1u64..=10_000_000, // ttl: always strictly future
        )
            .prop_map(|(seed, cid, recipients, created_at, ttl_secs)| ShareParams {
                keypair: Keypair::from_seed(&seed),
                cid,
                recipients,
                created_at,
                ttl_secs,
            })
            .boxed()
    }
}

/// Build the create_share transaction described by `params`, against
/// the fixture deployment.
pub fn transaction_from_params(params: &ShareParams) -> UnsignedTransaction {
    TransactionBuilder::new(NetworkName::new(TEST_NETWORK), TEST_CONTRACT)
        .create_share(
            params.cid.clone(),
            &params.recipients,
            params.created_at.plus_secs(params.ttl_secs),
            params.keypair.public_key(),
            params.created_at,
        )
        .expect("generated params satisfy the builder's checks")
}
