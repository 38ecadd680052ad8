//! In-process wallet implementation.
//!
//! Holds a real keypair and simulates the approval flow of an extension
//! wallet: availability, connection approval, signing approval, and an
//! optional delay standing in for the user looking at a prompt. Tests
//! use it to drive every wallet-side failure without a browser.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use sharegate_core::{Keypair, PublicKey, Signature};

use crate::error::WalletError;
use crate::wallet::{Result, Wallet};

/// An in-process wallet with a configurable approval policy.
pub struct MemoryWallet {
    keypair: Keypair,
    available: bool,
    approve_connect: bool,
    approve_signing: bool,
    sign_delay: Option<Duration>,
    connected: AtomicBool,
    sign_requests: AtomicU32,
    in_flight: AtomicU32,
    max_in_flight: AtomicU32,
}

impl MemoryWallet {
    /// A wallet with a fresh random keypair that approves everything.
    pub fn new() -> Self {
        Self::with_keypair(Keypair::generate())
    }

    /// A wallet over a deterministic keypair.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::with_keypair(Keypair::from_seed(seed))
    }

    /// A wallet over the given keypair.
    pub fn with_keypair(keypair: Keypair) -> Self {
        Self {
            keypair,
            available: true,
            approve_connect: true,
            approve_signing: true,
            sign_delay: None,
            connected: AtomicBool::new(false),
            sign_requests: AtomicU32::new(0),
            in_flight: AtomicU32::new(0),
            max_in_flight: AtomicU32::new(0),
        }
    }

    /// Simulate an absent wallet: every connect fails.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Simulate a user who declines connection requests.
    pub fn rejecting_connections(mut self) -> Self {
        self.approve_connect = false;
        self
    }

    /// Simulate a user who declines signing prompts.
    pub fn rejecting_signatures(mut self) -> Self {
        self.approve_signing = false;
        self
    }

    /// Hold each signing prompt open for `delay` before answering.
    pub fn with_sign_delay(mut self, delay: Duration) -> Self {
        self.sign_delay = Some(delay);
        self
    }

    /// The wallet's own identity.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Drop the session, as if the user disconnected from the wallet UI.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// How many signing prompts have been shown.
    pub fn sign_requests(&self) -> u32 {
        self.sign_requests.load(Ordering::SeqCst)
    }

    /// The largest number of signing prompts ever open at once.
    pub fn max_concurrent_signs(&self) -> u32 {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MemoryWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Wallet for MemoryWallet {
    async fn connect(&self) -> Result<()> {
        if !self.available {
            return Err(WalletError::Unavailable);
        }
        if !self.approve_connect {
            return Err(WalletError::UserRejected);
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn active_identity(&self) -> Result<PublicKey> {
        if !self.is_connected() {
            return Err(WalletError::NoActiveSession);
        }
        Ok(self.keypair.public_key())
    }

    async fn sign(&self, message: Bytes, identity: &PublicKey) -> Result<Signature> {
        self.sign_requests.fetch_add(1, Ordering::SeqCst);

        if !self.is_connected() {
            return Err(WalletError::NoActiveSession);
        }
        if identity != &self.keypair.public_key() {
            return Err(WalletError::SigningFailed(
                "identity does not match the active account".into(),
            ));
        }

        // Track prompt overlap across the simulated user think time.
        let open = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(open, Ordering::SeqCst);
        if let Some(delay) = self.sign_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if !self.approve_signing {
            return Err(WalletError::UserRejected);
        }
        Ok(self.keypair.sign(&message))
    }
}
