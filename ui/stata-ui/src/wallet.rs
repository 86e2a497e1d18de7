//! Wallet connectors.
//!
//! A connector turns configuration into a [`WalletSession`]: the connected
//! address, the chain it is on, and a client able (or not) to sign.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use tracing::info;

use crate::chain::{self, ChainError, ReadOnlyClient, SignerClient, TransactionSender};
use crate::config::AppConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Invalid private key")]
    InvalidKey,
    #[error("{0}")]
    Chain(#[from] ChainError),
}

/// A live connection, held by the UI until disconnect.
#[derive(Clone)]
pub struct WalletSession {
    pub address: Address,
    pub chain_id: u64,
    pub connector: &'static str,
    pub can_sign: bool,
    pub client: Arc<dyn TransactionSender>,
}

impl WalletSession {
    pub fn is_on_chain(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Label shown on the connect button.
    fn name(&self) -> &'static str;

    async fn connect(&self, rpc_url: &Url) -> Result<WalletSession, WalletError>;
}

// ---------------------------------------------------------------------------
// Local private key
// ---------------------------------------------------------------------------

pub struct PrivateKeyConnector {
    key: String,
}

impl PrivateKeyConnector {
    pub fn new(key: String) -> Self {
        Self { key }
    }

    fn signer(&self) -> Result<PrivateKeySigner, WalletError> {
        self.key.parse::<PrivateKeySigner>().map_err(|_| WalletError::InvalidKey)
    }
}

#[async_trait]
impl Connector for PrivateKeyConnector {
    fn name(&self) -> &'static str {
        "Private key"
    }

    async fn connect(&self, rpc_url: &Url) -> Result<WalletSession, WalletError> {
        let signer = self.signer()?;
        let address = signer.address();
        let provider = ProviderBuilder::new().wallet(signer).connect_http(rpc_url.clone()).erased();
        let client = SignerClient::new(provider, address);
        let chain_id = chain::with_timeout(CONNECT_TIMEOUT, client.chain_id()).await?;

        info!(address = %address, chain_id, connector = self.name(), event = "wallet_connected");

        Ok(WalletSession {
            address,
            chain_id,
            connector: self.name(),
            can_sign: true,
            client: Arc::new(client),
        })
    }
}

// ---------------------------------------------------------------------------
// Watch-only address
// ---------------------------------------------------------------------------

pub struct WatchConnector {
    address: Address,
}

impl WatchConnector {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

#[async_trait]
impl Connector for WatchConnector {
    fn name(&self) -> &'static str {
        "Watch address"
    }

    async fn connect(&self, rpc_url: &Url) -> Result<WalletSession, WalletError> {
        let provider = ProviderBuilder::new().connect_http(rpc_url.clone()).erased();
        let client = ReadOnlyClient::new(provider);
        let chain_id = chain::with_timeout(CONNECT_TIMEOUT, client.chain_id()).await?;

        info!(address = %self.address, chain_id, connector = self.name(), event = "wallet_connected");

        Ok(WalletSession {
            address: self.address,
            chain_id,
            connector: self.name(),
            can_sign: false,
            client: Arc::new(client),
        })
    }
}

/// Connectors available under the given configuration, signing ones first.
pub fn discover(config: &AppConfig) -> Vec<Arc<dyn Connector>> {
    let mut connectors: Vec<Arc<dyn Connector>> = Vec::new();
    if let Some(key) = &config.private_key {
        connectors.push(Arc::new(PrivateKeyConnector::new(key.clone())));
    }
    if let Some(address) = config.watch_address {
        connectors.push(Arc::new(WatchConnector::new(address)));
    }
    connectors
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::chain::mock::MockSender;

    /// Connects after `delay` to a fixed address on `chain_id`.
    pub(crate) struct MockConnector {
        pub(crate) address: Address,
        pub(crate) chain_id: u64,
        pub(crate) delay: Duration,
    }

    #[async_trait]
    impl Connector for MockConnector {
        fn name(&self) -> &'static str {
            "Mock"
        }

        async fn connect(&self, _rpc_url: &Url) -> Result<WalletSession, WalletError> {
            tokio::time::sleep(self.delay).await;
            Ok(WalletSession {
                address: self.address,
                chain_id: self.chain_id,
                connector: self.name(),
                can_sign: true,
                client: Arc::new(MockSender::on_chain(self.chain_id)),
            })
        }
    }
}
