//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: one deployment (chain,
//! contract, shared ledger) and clients joined to it.

use std::sync::Arc;

use sharegate::{ClientConfig, ShareClient};
use sharegate_core::{ContractHash, Keypair, NetworkName, PublicKey};
use sharegate_ledger::MemoryLedger;
use sharegate_wallet::MemoryWallet;

/// Chain name used by every fixture.
pub const TEST_NETWORK: &str = "sharegate-test";

/// Contract hash used by every fixture.
pub const TEST_CONTRACT: ContractHash = ContractHash::from_bytes([0x22; 32]);

/// A test deployment.
///
/// Holds the one ledger that every client created from this fixture
/// submits to, so multi-party scenarios observe each other's shares.
pub struct TestNet {
    pub ledger: Arc<MemoryLedger>,
}

impl TestNet {
    /// Create a fresh deployment with an empty ledger.
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MemoryLedger::new(
                NetworkName::new(TEST_NETWORK),
                TEST_CONTRACT,
            )),
        }
    }

    /// Client configuration pointing at this deployment.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new("http://localhost:7777/rpc", NetworkName::new(TEST_NETWORK))
            .with_contract_hash(TEST_CONTRACT)
    }

    /// A client over the given wallet.
    pub fn client(&self, wallet: MemoryWallet) -> ShareClient<MemoryWallet, Arc<MemoryLedger>> {
        ShareClient::new(self.config(), wallet, Arc::clone(&self.ledger))
    }

    /// A client over a deterministic wallet with the session already
    /// established.
    pub async fn connected_client(
        &self,
        seed: u8,
    ) -> ShareClient<MemoryWallet, Arc<MemoryLedger>> {
        let client = self.client(MemoryWallet::from_seed(&[seed; 32]));
        client
            .connect_wallet()
            .await
            .expect("memory wallet accepts connections");
        client
    }
}

impl Default for TestNet {
    fn default() -> Self {
        Self::new()
    }
}

/// Create wallets for multi-party tests, each over a distinct
/// deterministic key.
pub fn multi_party_wallets(count: usize) -> Vec<MemoryWallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            MemoryWallet::from_seed(&seed)
        })
        .collect()
}

/// A fresh identity that is nobody's wallet: useful as a recipient that
/// never signs anything.
pub fn random_identity() -> PublicKey {
    let seed: [u8; 32] = rand::random();
    Keypair::from_seed(&seed).public_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_core::{Cid, Timestamp};

    #[tokio::test]
    async fn test_fixture_share_roundtrip() {
        let net = TestNet::new();
        let owner = net.connected_client(0x01).await;
        let recipient = net.connected_client(0x02).await;

        let tx_id = owner
            .create_share(
                Cid::new("bafybeigdyrzt5s"),
                &[recipient.active_identity().unwrap()],
                Timestamp::now().plus_secs(3600),
            )
            .await
            .unwrap();

        let share_id = net.ledger.share_id_for(&tx_id).unwrap();
        let outcome = recipient.get_cid_if_allowed(share_id).await.unwrap();
        assert_eq!(outcome.cid().map(|c| c.as_str()), Some("bafybeigdyrzt5s"));
    }

    #[tokio::test]
    async fn test_multi_party_wallets_have_unique_keys() {
        let wallets = multi_party_wallets(3);

        let pks: Vec<_> = wallets.iter().map(|w| w.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }

    #[tokio::test]
    async fn test_random_identities_are_distinct() {
        assert_ne!(random_identity(), random_identity());
    }
}
