//! Pure construction of unsigned transactions and invocations.
//!
//! The builder reads no clock, generates no randomness, and performs no
//! I/O: identical inputs always produce an identical transaction. The
//! current time is an explicit argument so that the expiry sanity check
//! stays deterministic and testable.

use std::collections::BTreeSet;

use sharegate_core::{Cid, ContractHash, Motes, NetworkName, PublicKey, ShareId, Timestamp};

use crate::abi;
use crate::call::{ShareCall, ShareQuery};
use crate::error::BuildError;
use crate::transaction::{ReadOnlyInvocation, UnsignedTransaction};

/// Builds transactions against one contract deployment.
///
/// Holds the chain name, contract hash, and payment; everything else
/// arrives per call.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network: NetworkName,
    contract: ContractHash,
    payment: Motes,
}

impl TransactionBuilder {
    /// Create a builder for the given chain and contract, using the
    /// default payment.
    pub fn new(network: NetworkName, contract: ContractHash) -> Self {
        Self {
            network,
            contract,
            payment: abi::DEFAULT_PAYMENT,
        }
    }

    /// Override the payment attached to mutating transactions.
    pub fn with_payment(mut self, payment: Motes) -> Self {
        self.payment = payment;
        self
    }

    /// The contract this builder targets.
    pub fn contract(&self) -> ContractHash {
        self.contract
    }

    /// The chain this builder targets.
    pub fn network(&self) -> &NetworkName {
        &self.network
    }

    /// Build a create_share transaction.
    ///
    /// Validates locally before anything leaves the process:
    /// - `cid` must be non-empty
    /// - `recipients` must be non-empty; duplicates are dropped and the
    ///   list is sorted by key bytes so input order never changes the id
    /// - `expiry` must be strictly after `now`
    ///
    /// The check against `now` is a sanity check only; the contract
    /// re-validates expiry against block time.
    pub fn create_share(
        &self,
        cid: Cid,
        recipients: &[PublicKey],
        expiry: Timestamp,
        sender: PublicKey,
        now: Timestamp,
    ) -> Result<UnsignedTransaction, BuildError> {
        if cid.is_empty() {
            return Err(BuildError::EmptyCid);
        }
        if recipients.is_empty() {
            return Err(BuildError::NoRecipients);
        }
        if expiry <= now {
            return Err(BuildError::ExpiryNotFuture { expiry, now });
        }

        let deduped: BTreeSet<PublicKey> = recipients.iter().copied().collect();
        let recipients: Vec<PublicKey> = deduped.into_iter().collect();

        Ok(UnsignedTransaction {
            network: self.network.clone(),
            contract: self.contract,
            sender,
            payment: self.payment,
            created_at: now,
            call: ShareCall::CreateShare {
                cid,
                recipients,
                expiry,
            },
        })
    }

    /// Build a revoke_share transaction.
    ///
    /// No local validation: whether the share exists and who owns it is
    /// only decided by the contract at execution time.
    pub fn revoke_share(
        &self,
        share_id: ShareId,
        sender: PublicKey,
        now: Timestamp,
    ) -> UnsignedTransaction {
        UnsignedTransaction {
            network: self.network.clone(),
            contract: self.contract,
            sender,
            payment: self.payment,
            created_at: now,
            call: ShareCall::RevokeShare { share_id },
        }
    }

    /// Build a read-only get_cid_if_allowed invocation for `caller`.
    pub fn cid_query(&self, share_id: ShareId, caller: PublicKey) -> ReadOnlyInvocation {
        ReadOnlyInvocation {
            contract: self.contract,
            caller,
            query: ShareQuery::CidIfAllowed { share_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn builder() -> TransactionBuilder {
        TransactionBuilder::new(
            NetworkName::new("sharegate-test"),
            ContractHash::from_bytes([0x22; 32]),
        )
    }

    fn sender() -> PublicKey {
        PublicKey::from_bytes([0x11; 32])
    }

    const NOW: Timestamp = Timestamp::from_secs(1_700_000_000);
    const LATER: Timestamp = Timestamp::from_secs(1_700_003_600);

    #[test]
    fn test_create_share_is_deterministic() {
        let recipients = [PublicKey::from_bytes([2; 32]), PublicKey::from_bytes([1; 32])];
        let a = builder()
            .create_share(Cid::new("bafy"), &recipients, LATER, sender(), NOW)
            .unwrap();
        let b = builder()
            .create_share(Cid::new("bafy"), &recipients, LATER, sender(), NOW)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn test_recipients_deduplicated_and_sorted() {
        let one = PublicKey::from_bytes([1; 32]);
        let two = PublicKey::from_bytes([2; 32]);

        let tx = builder()
            .create_share(Cid::new("bafy"), &[two, one, two, one], LATER, sender(), NOW)
            .unwrap();

        match &tx.call {
            ShareCall::CreateShare { recipients, .. } => {
                assert_eq!(recipients, &vec![one, two]);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn test_recipient_order_does_not_change_id() {
        let one = PublicKey::from_bytes([1; 32]);
        let two = PublicKey::from_bytes([2; 32]);

        let a = builder()
            .create_share(Cid::new("bafy"), &[one, two], LATER, sender(), NOW)
            .unwrap();
        let b = builder()
            .create_share(Cid::new("bafy"), &[two, one, one], LATER, sender(), NOW)
            .unwrap();
        assert_eq!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn test_empty_cid_rejected() {
        let err = builder()
            .create_share(
                Cid::new(""),
                &[PublicKey::from_bytes([1; 32])],
                LATER,
                sender(),
                NOW,
            )
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyCid);
    }

    #[test]
    fn test_empty_recipients_rejected() {
        let err = builder()
            .create_share(Cid::new("bafy"), &[], LATER, sender(), NOW)
            .unwrap_err();
        assert_eq!(err, BuildError::NoRecipients);
    }

    #[test]
    fn test_expiry_must_be_strictly_future() {
        let recipients = [PublicKey::from_bytes([1; 32])];

        // expiry == now is already too late
        let err = builder()
            .create_share(Cid::new("bafy"), &recipients, NOW, sender(), NOW)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ExpiryNotFuture {
                expiry: NOW,
                now: NOW
            }
        );

        // one second later is enough
        assert!(builder()
            .create_share(Cid::new("bafy"), &recipients, NOW.plus_secs(1), sender(), NOW)
            .is_ok());
    }

    #[test]
    fn test_revoke_share_carries_default_payment() {
        let tx = builder().revoke_share(ShareId::new(9), sender(), NOW);
        assert_eq!(tx.payment, abi::DEFAULT_PAYMENT);
        assert_eq!(tx.created_at, NOW);
        assert_eq!(tx.call, ShareCall::RevokeShare { share_id: ShareId::new(9) });
    }

    #[test]
    fn test_payment_override() {
        let tx = builder()
            .with_payment(Motes::new(5))
            .revoke_share(ShareId::new(1), sender(), NOW);
        assert_eq!(tx.payment, Motes::new(5));
    }

    #[test]
    fn test_cid_query_shape() {
        let caller = PublicKey::from_bytes([0x33; 32]);
        let inv = builder().cid_query(ShareId::new(4), caller);
        assert_eq!(inv.contract, ContractHash::from_bytes([0x22; 32]));
        assert_eq!(inv.caller, caller);
        assert_eq!(inv.query, ShareQuery::CidIfAllowed { share_id: ShareId::new(4) });
    }

    proptest! {
        #[test]
        fn prop_dedup_never_empties_a_nonempty_list(
            seeds in proptest::collection::vec(0u8..8, 1..12),
            expiry_offset in 1u64..100_000,
        ) {
            let recipients: Vec<PublicKey> =
                seeds.iter().map(|s| PublicKey::from_bytes([*s; 32])).collect();
            let tx = builder()
                .create_share(
                    Cid::new("bafy"),
                    &recipients,
                    NOW.plus_secs(expiry_offset),
                    sender(),
                    NOW,
                )
                .unwrap();
            match tx.call {
                ShareCall::CreateShare { recipients, .. } => {
                    prop_assert!(!recipients.is_empty());
                    let mut sorted = recipients.clone();
                    sorted.sort();
                    sorted.dedup();
                    prop_assert_eq!(recipients, sorted);
                }
                _ => prop_assert!(false, "expected CreateShare"),
            }
        }
    }
}
