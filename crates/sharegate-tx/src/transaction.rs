//! Transaction envelopes: unsigned, signed, and read-only forms.
//!
//! An unsigned transaction is a complete description of a mutating
//! contract call. Signing appends exactly one signature; nothing in the
//! body changes, so the transaction id is stable across signing and can
//! be computed before the wallet is ever involved.

use ciborium::value::Value;

use sharegate_core::{
    encode_canonical, ContractHash, CoreError, Motes, NetworkName, PublicKey, Signature,
    Timestamp, TransactionId,
};

use crate::abi;
use crate::call::{ShareCall, ShareQuery};

/// The current transaction encoding version.
pub const TRANSACTION_VERSION: u8 = 0;

/// Domain tag mixed into the signed message.
pub const SIGN_DOMAIN: &[u8] = b"sharegate/tx-sig/v1";

/// Domain tag mixed into the transaction id.
pub const ID_DOMAIN: &[u8] = b"sharegate/tx-id/v1";

/// Envelope field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const VERSION: u64 = 0;
    pub const NETWORK: u64 = 1;
    pub const CONTRACT: u64 = 2;
    pub const SENDER: u64 = 3;
    pub const PAYMENT: u64 = 4;
    pub const CREATED_AT: u64 = 5;
    pub const ENTRY_POINT: u64 = 6;
    pub const ARGS: u64 = 7;
}

/// A fully described, not yet signed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Chain the transaction is bound to.
    pub network: NetworkName,
    /// The deployed contract being called.
    pub contract: ContractHash,
    /// The account that will sign and pay.
    pub sender: PublicKey,
    /// Payment attached to the call.
    pub payment: Motes,
    /// Caller-supplied creation time. Part of the signed body, so two
    /// otherwise identical calls built at different times get distinct ids.
    pub created_at: Timestamp,
    /// The contract call itself.
    pub call: ShareCall,
}

impl UnsignedTransaction {
    /// The contract entry point this transaction targets.
    pub fn entry_point(&self) -> &'static str {
        self.call.entry_point()
    }

    /// Encode the transaction body to canonical CBOR bytes.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CoreError> {
        encode_canonical(&self.to_cbor_value())
    }

    /// The message a wallet signs: SIGN_DOMAIN || canonical body.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::from(SIGN_DOMAIN);
        buf.extend_from_slice(&self.canonical_bytes()?);
        Ok(buf)
    }

    /// The transaction id: Blake3(ID_DOMAIN || canonical body).
    ///
    /// Depends only on the body, never on the signature.
    pub fn id(&self) -> Result<TransactionId, CoreError> {
        let mut buf = Vec::from(ID_DOMAIN);
        buf.extend_from_slice(&self.canonical_bytes()?);
        Ok(TransactionId::digest(&buf))
    }

    /// Convert to a CBOR Value (map with integer keys).
    fn to_cbor_value(&self) -> Value {
        let entries = vec![
            (
                Value::Integer(keys::VERSION.into()),
                Value::Integer(TRANSACTION_VERSION.into()),
            ),
            (
                Value::Integer(keys::NETWORK.into()),
                Value::Text(self.network.as_str().to_string()),
            ),
            (
                Value::Integer(keys::CONTRACT.into()),
                Value::Bytes(self.contract.as_bytes().to_vec()),
            ),
            (
                Value::Integer(keys::SENDER.into()),
                Value::Bytes(self.sender.as_bytes().to_vec()),
            ),
            (
                Value::Integer(keys::PAYMENT.into()),
                Value::Integer(self.payment.amount().into()),
            ),
            (
                Value::Integer(keys::CREATED_AT.into()),
                Value::Integer(self.created_at.as_secs().into()),
            ),
            (
                Value::Integer(keys::ENTRY_POINT.into()),
                Value::Text(self.entry_point().to_string()),
            ),
            (Value::Integer(keys::ARGS.into()), args_to_cbor_value(&self.call)),
        ];
        Value::Map(entries)
    }
}

/// Convert call arguments to a CBOR map keyed by ABI argument names.
fn args_to_cbor_value(call: &ShareCall) -> Value {
    match call {
        ShareCall::CreateShare {
            cid,
            recipients,
            expiry,
        } => {
            let keys: Vec<Value> = recipients
                .iter()
                .map(|pk| Value::Bytes(pk.as_bytes().to_vec()))
                .collect();
            Value::Map(vec![
                (
                    Value::Text(abi::ARG_CID.into()),
                    Value::Text(cid.as_str().to_string()),
                ),
                (
                    Value::Text(abi::ARG_RECIPIENTS.into()),
                    Value::Array(keys),
                ),
                (
                    Value::Text(abi::ARG_EXPIRY.into()),
                    Value::Integer(expiry.as_secs().into()),
                ),
            ])
        }
        ShareCall::RevokeShare { share_id } => Value::Map(vec![(
            Value::Text(abi::ARG_SHARE_ID.into()),
            Value::Integer(share_id.value().into()),
        )]),
    }
}

/// An unsigned transaction plus the wallet's signature over its
/// signing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The signed body.
    pub transaction: UnsignedTransaction,
    /// Ed25519 signature by `transaction.sender` over the signing bytes.
    pub signature: Signature,
}

impl SignedTransaction {
    /// The id of the underlying transaction.
    pub fn id(&self) -> Result<TransactionId, CoreError> {
        self.transaction.id()
    }

    /// Verify the signature against the sender key.
    pub fn verify(&self) -> Result<(), CoreError> {
        let message = self.transaction.signing_bytes()?;
        self.transaction.sender.verify(&message, &self.signature)
    }
}

/// A read-only invocation against current contract state.
///
/// Carries no payment, no signature, and no network binding; the node
/// answering it evaluates the entry point without making a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnlyInvocation {
    /// The deployed contract being queried.
    pub contract: ContractHash,
    /// The identity whose access is being decided.
    pub caller: PublicKey,
    /// The query itself.
    pub query: ShareQuery,
}

impl ReadOnlyInvocation {
    /// The contract entry point this invocation targets.
    pub fn entry_point(&self) -> &'static str {
        self.query.entry_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_core::{Cid, Keypair, ShareId};

    fn sample_create() -> UnsignedTransaction {
        UnsignedTransaction {
            network: NetworkName::new("sharegate-test"),
            contract: ContractHash::from_bytes([0x22; 32]),
            sender: PublicKey::from_bytes([0x11; 32]),
            payment: abi::DEFAULT_PAYMENT,
            created_at: Timestamp::from_secs(1_700_000_000),
            call: ShareCall::CreateShare {
                cid: Cid::new("bafybeigdyrzt5s"),
                recipients: vec![
                    PublicKey::from_bytes([0x01; 32]),
                    PublicKey::from_bytes([0x02; 32]),
                ],
                expiry: Timestamp::from_secs(1_700_003_600),
            },
        }
    }

    #[test]
    fn test_canonical_bytes_deterministic() {
        let tx = sample_create();
        assert_eq!(tx.canonical_bytes().unwrap(), tx.canonical_bytes().unwrap());
    }

    #[test]
    fn test_id_stable_and_content_addressed() {
        let tx = sample_create();
        let id1 = tx.id().unwrap();
        let id2 = tx.clone().id().unwrap();
        assert_eq!(id1, id2);

        let mut changed = sample_create();
        changed.payment = Motes::new(1);
        assert_ne!(id1, changed.id().unwrap());
    }

    #[test]
    fn test_id_differs_from_signing_bytes_hash() {
        // Separate domains: the id is not a hash of the signed message.
        let tx = sample_create();
        let id = tx.id().unwrap();
        let signed_msg_hash = TransactionId::digest(&tx.signing_bytes().unwrap());
        assert_ne!(id, signed_msg_hash);
    }

    #[test]
    fn test_signing_bytes_carry_domain_prefix() {
        let tx = sample_create();
        let bytes = tx.signing_bytes().unwrap();
        assert!(bytes.starts_with(SIGN_DOMAIN));
    }

    #[test]
    fn test_created_at_distinguishes_ids() {
        let a = sample_create();
        let mut b = sample_create();
        b.created_at = a.created_at.plus_secs(1);
        assert_ne!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let mut tx = sample_create();
        tx.sender = keypair.public_key();

        let signature = keypair.sign(&tx.signing_bytes().unwrap());
        let signed = SignedTransaction {
            transaction: tx,
            signature,
        };
        signed.verify().expect("signature should verify");
    }

    #[test]
    fn test_tampered_body_fails_verification() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let mut tx = sample_create();
        tx.sender = keypair.public_key();

        let signature = keypair.sign(&tx.signing_bytes().unwrap());
        let mut signed = SignedTransaction {
            transaction: tx,
            signature,
        };
        signed.transaction.payment = Motes::new(1);
        assert!(signed.verify().is_err());
    }

    #[test]
    fn test_revoke_args_layout() {
        let tx = UnsignedTransaction {
            network: NetworkName::new("sharegate-test"),
            contract: ContractHash::from_bytes([0x22; 32]),
            sender: PublicKey::from_bytes([0x11; 32]),
            payment: abi::DEFAULT_PAYMENT,
            created_at: Timestamp::from_secs(7),
            call: ShareCall::RevokeShare {
                share_id: ShareId::new(3),
            },
        };
        assert_eq!(tx.entry_point(), "revoke_share");

        // "share_id" appears as a text key in the canonical encoding
        let bytes = tx.canonical_bytes().unwrap();
        let needle = b"share_id";
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }
}
