//! In-process ledger implementation.
//!
//! Executes the share contract's semantics directly against in-memory
//! state: share records, the share counter, and a controllable block
//! time. It validates submissions the way a node would (chain name,
//! contract hash, signature) before executing, and injects transport
//! faults on demand.
//!
//! All data is lost when the ledger is dropped. Thread-safe via RwLock.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use sharegate_core::{Cid, ContractHash, NetworkName, PublicKey, ShareId, Timestamp, TransactionId};
use sharegate_tx::abi::code;
use sharegate_tx::{ReadOnlyInvocation, ShareCall, ShareQuery, SignedTransaction};

use crate::error::LedgerError;
use crate::service::{LedgerService, Result, Value};

/// One share as the contract stores it.
#[derive(Debug, Clone)]
struct ShareRecord {
    cid: Cid,
    owner: PublicKey,
    expiry: Timestamp,
    revoked: bool,
    recipients: BTreeSet<PublicKey>,
}

struct MemoryLedgerInner {
    network: NetworkName,
    contract: ContractHash,
    block_time: Timestamp,
    next_share_id: u64,
    shares: BTreeMap<ShareId, ShareRecord>,

    /// Processed transactions, with the share id assigned by creates.
    /// Resubmitting a known id is answered without re-execution.
    processed: HashMap<TransactionId, Option<ShareId>>,

    fail_next_submit: Option<String>,
    fail_next_query: Option<String>,

    submission_attempts: u32,
    query_attempts: u32,
}

/// In-memory ledger running the share contract.
pub struct MemoryLedger {
    inner: RwLock<MemoryLedgerInner>,
}

impl MemoryLedger {
    /// Create a ledger for `network` with the contract deployed at
    /// `contract`. Block time starts at the current wall clock.
    pub fn new(network: NetworkName, contract: ContractHash) -> Self {
        Self {
            inner: RwLock::new(MemoryLedgerInner {
                network,
                contract,
                block_time: Timestamp::now(),
                next_share_id: 0,
                shares: BTreeMap::new(),
                processed: HashMap::new(),
                fail_next_submit: None,
                fail_next_query: None,
                submission_attempts: 0,
                query_attempts: 0,
            }),
        }
    }

    /// The current block time.
    pub fn block_time(&self) -> Timestamp {
        self.inner.read().unwrap().block_time
    }

    /// Pin block time to an exact value.
    pub fn set_block_time(&self, at: Timestamp) {
        self.inner.write().unwrap().block_time = at;
    }

    /// Move block time forward by `secs`.
    pub fn advance(&self, secs: u64) {
        let mut inner = self.inner.write().unwrap();
        inner.block_time = inner.block_time.plus_secs(secs);
    }

    /// Make the next submit fail at the transport level.
    pub fn fail_next_submit(&self, reason: impl Into<String>) {
        self.inner.write().unwrap().fail_next_submit = Some(reason.into());
    }

    /// Make the next read-only invocation fail at the transport level.
    pub fn fail_next_query(&self, reason: impl Into<String>) {
        self.inner.write().unwrap().fail_next_query = Some(reason.into());
    }

    /// The share id assigned by the create under `transaction`, as a
    /// receipt lookup would report it.
    pub fn share_id_for(&self, transaction: &TransactionId) -> Option<ShareId> {
        self.inner
            .read()
            .unwrap()
            .processed
            .get(transaction)
            .copied()
            .flatten()
    }

    /// Number of shares ever created.
    pub fn share_count(&self) -> usize {
        self.inner.read().unwrap().shares.len()
    }

    /// How many submissions reached this ledger, including failed ones.
    pub fn submission_attempts(&self) -> u32 {
        self.inner.read().unwrap().submission_attempts
    }

    /// How many read-only invocations reached this ledger.
    pub fn query_attempts(&self) -> u32 {
        self.inner.read().unwrap().query_attempts
    }
}

impl MemoryLedgerInner {
    fn execute_create(
        &mut self,
        sender: PublicKey,
        cid: &Cid,
        recipients: &[PublicKey],
        expiry: Timestamp,
    ) -> Result<ShareId> {
        if recipients.is_empty() {
            return Err(LedgerError::execution(
                code::EMPTY_RECIPIENTS,
                "recipient set is empty",
            ));
        }
        if expiry <= self.block_time {
            return Err(LedgerError::execution(
                code::EXPIRY_NOT_FUTURE,
                format!(
                    "expiry {} is not after block time {}",
                    expiry, self.block_time
                ),
            ));
        }

        let share_id = ShareId::new(self.next_share_id);
        self.next_share_id += 1;
        self.shares.insert(
            share_id,
            ShareRecord {
                cid: cid.clone(),
                owner: sender,
                expiry,
                revoked: false,
                recipients: recipients.iter().copied().collect(),
            },
        );
        tracing::debug!("share {} created by {}", share_id, sender);
        Ok(share_id)
    }

    fn execute_revoke(&mut self, sender: PublicKey, share_id: ShareId) -> Result<()> {
        let record = self.shares.get_mut(&share_id).ok_or_else(|| {
            LedgerError::execution(code::SHARE_NOT_FOUND, format!("no share {}", share_id))
        })?;
        if record.owner != sender {
            return Err(LedgerError::execution(
                code::NOT_OWNER,
                format!("{} does not own share {}", sender, share_id),
            ));
        }
        if record.revoked {
            return Err(LedgerError::execution(
                code::REVOKED_OR_EXPIRED,
                format!("share {} is already revoked", share_id),
            ));
        }
        record.revoked = true;
        tracing::debug!("share {} revoked", share_id);
        Ok(())
    }
}

#[async_trait]
impl LedgerService for MemoryLedger {
    async fn submit(&self, transaction: &SignedTransaction) -> Result<TransactionId> {
        let mut inner = self.inner.write().unwrap();
        inner.submission_attempts += 1;

        if let Some(reason) = inner.fail_next_submit.take() {
            return Err(LedgerError::Transport(reason));
        }

        let tx_id = transaction
            .id()
            .map_err(|e| LedgerError::Validation(format!("unencodable transaction: {}", e)))?;

        if transaction.transaction.network != inner.network {
            return Err(LedgerError::Validation(format!(
                "network mismatch: transaction is for {}, ledger runs {}",
                transaction.transaction.network, inner.network
            )));
        }
        if transaction.transaction.contract != inner.contract {
            return Err(LedgerError::Validation(format!(
                "unknown contract {}",
                transaction.transaction.contract
            )));
        }
        transaction
            .verify()
            .map_err(|_| LedgerError::Validation("invalid signature".into()))?;

        // A transaction id is processed at most once.
        if inner.processed.contains_key(&tx_id) {
            tracing::debug!("transaction {} already processed", tx_id);
            return Ok(tx_id);
        }

        let sender = transaction.transaction.sender;
        let assigned = match &transaction.transaction.call {
            ShareCall::CreateShare {
                cid,
                recipients,
                expiry,
            } => Some(inner.execute_create(sender, cid, recipients, *expiry)?),
            ShareCall::RevokeShare { share_id } => {
                inner.execute_revoke(sender, *share_id)?;
                None
            }
        };

        inner.processed.insert(tx_id, assigned);
        Ok(tx_id)
    }

    async fn invoke_read_only(&self, invocation: &ReadOnlyInvocation) -> Result<Value> {
        let mut inner = self.inner.write().unwrap();
        inner.query_attempts += 1;

        if let Some(reason) = inner.fail_next_query.take() {
            return Err(LedgerError::Transport(reason));
        }

        if invocation.contract != inner.contract {
            return Err(LedgerError::Validation(format!(
                "unknown contract {}",
                invocation.contract
            )));
        }

        let ShareQuery::CidIfAllowed { share_id } = invocation.query;

        let record = inner.shares.get(&share_id).ok_or_else(|| {
            LedgerError::execution(code::SHARE_NOT_FOUND, format!("no share {}", share_id))
        })?;

        // Revocation and expiry are checked before membership, so a
        // revoked share is gone for everyone, owner included.
        if record.revoked {
            return Err(LedgerError::execution(
                code::REVOKED_OR_EXPIRED,
                format!("share {} is revoked", share_id),
            ));
        }
        if inner.block_time >= record.expiry {
            return Err(LedgerError::execution(
                code::REVOKED_OR_EXPIRED,
                format!("share {} expired at {}", share_id, record.expiry),
            ));
        }

        let caller = invocation.caller;
        if caller != record.owner && !record.recipients.contains(&caller) {
            return Err(LedgerError::execution(
                code::NO_ACCESS,
                format!("{} has no access to share {}", caller, share_id),
            ));
        }

        Ok(Value::Str(record.cid.as_str().to_string()))
    }
}
