//! The ShareClient: unified API for the share-access protocol.
//!
//! The client brings together the wallet, the transaction builder, and
//! the ledger into a cohesive interface for sharing a cid with a set of
//! recipients and asking whether an identity may read it.

use bytes::Bytes;
use tokio::sync::Mutex;

use sharegate_core::{Cid, PublicKey, ShareId, Timestamp, TransactionId};
use sharegate_ledger::{LedgerError, LedgerService, Value};
use sharegate_tx::{abi::code, SignedTransaction, TransactionBuilder, UnsignedTransaction};
use sharegate_wallet::Wallet;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// The main client struct.
///
/// Provides a unified API for:
/// - Establishing a wallet session
/// - Creating and revoking shares
/// - Querying access to a shared cid
///
/// All signing goes through exactly one prompt at a time: concurrent
/// operations queue on an internal gate rather than stacking wallet
/// prompts in front of the user.
pub struct ShareClient<W: Wallet, L: LedgerService> {
    /// Deployment the client talks to.
    config: ClientConfig,
    /// The wallet holding the user's keys.
    wallet: W,
    /// The ledger accepting transactions and queries.
    ledger: L,
    /// Serializes signing prompts.
    sign_gate: Mutex<()>,
}

impl<W: Wallet, L: LedgerService> ShareClient<W, L> {
    /// Create a new client instance.
    ///
    /// Construction performs no I/O; the wallet is not contacted until
    /// [`connect_wallet`](Self::connect_wallet).
    pub fn new(config: ClientConfig, wallet: W, ledger: L) -> Self {
        Self {
            config,
            wallet,
            ledger,
            sign_gate: Mutex::new(()),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the wallet reference.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Establish a wallet session.
    ///
    /// Suspends until the user approves or rejects. Calling this with a
    /// session already active is harmless.
    pub async fn connect_wallet(&self) -> Result<()> {
        self.wallet.connect().await?;
        tracing::debug!(network = %self.config.network, "wallet session established");
        Ok(())
    }

    /// Whether a wallet session is currently active.
    pub fn is_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    /// The identity of the active wallet account.
    pub fn active_identity(&self) -> Result<PublicKey> {
        Ok(self.wallet.active_identity()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Share Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Share `cid` with `recipients` until `expiry`.
    ///
    /// Builds a create_share transaction, asks the wallet to sign it,
    /// and submits it. Inputs are validated before the wallet is
    /// involved, so a bad call never costs a signing prompt. Returns
    /// the transaction id the share was submitted under.
    pub async fn create_share(
        &self,
        cid: Cid,
        recipients: &[PublicKey],
        expiry: Timestamp,
    ) -> Result<TransactionId> {
        let sender = self.wallet.active_identity()?;
        let builder = self.builder()?;

        let unsigned = builder.create_share(cid, recipients, expiry, sender, Timestamp::now())?;
        self.sign_and_submit(unsigned).await
    }

    /// Revoke the share with the given id.
    ///
    /// Whether the share exists and who owns it is decided by the
    /// contract; a revoke of an unknown or already revoked share comes
    /// back as [`ClientError::Rejected`] with the contract's reason.
    pub async fn revoke_share(&self, share_id: ShareId) -> Result<TransactionId> {
        let sender = self.wallet.active_identity()?;
        let builder = self.builder()?;

        let unsigned = builder.revoke_share(share_id, sender, Timestamp::now());
        self.sign_and_submit(unsigned).await
    }

    /// Resubmit a previously signed transaction.
    ///
    /// For recovering from [`ClientError::Submission`]: the signature
    /// already exists, so this never prompts the wallet.
    pub async fn resubmit(&self, signed: SignedTransaction) -> Result<TransactionId> {
        self.submit_signed(signed).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask whether the active identity may read the share's cid.
    ///
    /// Runs a free read-only invocation; nothing is signed and nothing
    /// is paid. A denial is a successful answer, not an error: only
    /// transport faults and undecodable results surface as `Err`.
    pub async fn get_cid_if_allowed(&self, share_id: ShareId) -> Result<AccessOutcome> {
        let builder = self.builder()?;
        let caller = self.wallet.active_identity()?;

        let invocation = builder.cid_query(share_id, caller);
        decode_access(self.ledger.invoke_read_only(&invocation).await)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    /// A builder for the configured deployment.
    fn builder(&self) -> Result<TransactionBuilder> {
        let contract = self.config.contract_hash.ok_or(ClientError::NotConfigured)?;
        Ok(
            TransactionBuilder::new(self.config.network.clone(), contract)
                .with_payment(self.config.payment),
        )
    }

    /// Sign `unsigned` through the wallet and submit it.
    async fn sign_and_submit(&self, unsigned: UnsignedTransaction) -> Result<TransactionId> {
        let message = Bytes::from(unsigned.signing_bytes()?);

        // One prompt at a time; later callers wait here, not in the
        // user's face.
        let signature = {
            let _prompt = self.sign_gate.lock().await;
            self.wallet.sign(message, &unsigned.sender).await?
        };

        self.submit_signed(SignedTransaction {
            transaction: unsigned,
            signature,
        })
        .await
    }

    /// Submit a signed transaction, sorting ledger failures into the
    /// client's error taxonomy.
    async fn submit_signed(&self, signed: SignedTransaction) -> Result<TransactionId> {
        let entry_point = signed.transaction.entry_point();
        match self.ledger.submit(&signed).await {
            Ok(id) => {
                tracing::info!(id = %id, entry_point, "transaction submitted");
                Ok(id)
            }
            Err(LedgerError::Validation(reason)) => Err(ClientError::Validation(reason)),
            Err(LedgerError::Execution(failure)) => {
                tracing::warn!(entry_point, code = failure.code, "transaction rejected");
                Err(ClientError::Rejected(failure))
            }
            // The signature was already paid for with a prompt; keep it.
            Err(source @ LedgerError::Transport(_)) => Err(ClientError::Submission {
                source,
                signed: Box::new(signed),
            }),
        }
    }
}

/// The answer to a get_cid_if_allowed query.
///
/// Both variants are successful outcomes: the ledger was reached and
/// the contract decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Access is allowed; here is the cid.
    Granted(Cid),
    /// Access is not allowed, and why not.
    Denied(DenialReason),
}

impl AccessOutcome {
    /// The cid, when access was granted.
    pub fn cid(&self) -> Option<&Cid> {
        match self {
            Self::Granted(cid) => Some(cid),
            Self::Denied(_) => None,
        }
    }

    /// Whether access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// Whether access was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

/// Why a query came back without a cid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialReason {
    /// Which contract decision denied access.
    pub kind: DenialKind,
    /// The contract's own wording, for display.
    pub detail: String,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

/// The contract's access decisions, mapped from revert codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// No share exists under the queried id.
    NotFound,
    /// The share was revoked by its owner or its expiry has passed.
    RevokedOrExpired,
    /// The caller is neither the owner nor a recipient.
    NotRecipient,
}

impl DenialKind {
    /// Map a contract revert code to a denial, when it is one.
    pub fn from_code(revert_code: u16) -> Option<Self> {
        match revert_code {
            code::SHARE_NOT_FOUND => Some(Self::NotFound),
            code::REVOKED_OR_EXPIRED => Some(Self::RevokedOrExpired),
            code::NO_ACCESS => Some(Self::NotRecipient),
            _ => None,
        }
    }
}

/// Decode a raw query result into an access outcome.
///
/// Execution failures carrying a known denial code become
/// [`AccessOutcome::Denied`]; everything else that is not a cid string
/// is a fault.
fn decode_access(result: sharegate_ledger::Result<Value>) -> Result<AccessOutcome> {
    match result {
        Ok(Value::Str(cid)) if !cid.is_empty() => Ok(AccessOutcome::Granted(Cid::new(cid))),
        Ok(Value::Str(_)) => Err(ClientError::Decode("empty cid in query result".into())),
        Ok(other) => Err(ClientError::Decode(format!(
            "expected a cid string, got {:?}",
            other
        ))),
        Err(LedgerError::Execution(failure)) => match DenialKind::from_code(failure.code) {
            Some(kind) => Ok(AccessOutcome::Denied(DenialReason {
                kind,
                detail: failure.reason,
            })),
            None => Err(ClientError::Query(LedgerError::Execution(failure))),
        },
        Err(fault) => Err(ClientError::Query(fault)),
    }
}
