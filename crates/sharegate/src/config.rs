//! Client configuration.

use sharegate_core::{ContractHash, Motes, NetworkName};
use sharegate_tx::abi;

/// Configuration for a [`ShareClient`](crate::ShareClient).
///
/// Everything environment-specific lives here and is injected at
/// construction: no global state, no lazily-read environment. Two
/// clients with different configs coexist in one process.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// RPC endpoint of the node the ledger implementation talks to.
    pub ledger_endpoint: String,

    /// Chain name transactions are bound to.
    pub network: NetworkName,

    /// Hash of the deployed share contract. `None` until deployment
    /// details are known; every contract call fails cleanly without it.
    pub contract_hash: Option<ContractHash>,

    /// Payment attached to mutating transactions.
    pub payment: Motes,
}

impl ClientConfig {
    /// Create a config with the default payment and no contract bound.
    pub fn new(ledger_endpoint: impl Into<String>, network: NetworkName) -> Self {
        Self {
            ledger_endpoint: ledger_endpoint.into(),
            network,
            contract_hash: None,
            payment: abi::DEFAULT_PAYMENT,
        }
    }

    /// Bind the deployed contract.
    pub fn with_contract_hash(mut self, contract_hash: ContractHash) -> Self {
        self.contract_hash = Some(contract_hash);
        self
    }

    /// Override the payment attached to mutating transactions.
    pub fn with_payment(mut self, payment: Motes) -> Self {
        self.payment = payment;
        self
    }
}
