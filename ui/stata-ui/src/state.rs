//! Shared reactive state and the application context.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use stata_contracts::BASE_CHAIN_ID;
use tracing::warn;

use crate::chain::{BalanceReader, RpcReader};
use crate::config::AppConfig;
use crate::wallet::{self, Connector, WalletSession};

/// Wallet connection state.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Error(String),
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting => "reconnecting",
            Self::Error(_) => "error",
        }
    }
}

/// Account state, stored in a Dioxus `Signal`.
#[derive(Clone)]
pub struct AccountState {
    pub status: ConnectionStatus,
    pub session: Option<WalletSession>,
}

impl Default for AccountState {
    fn default() -> Self {
        Self { status: ConnectionStatus::Disconnected, session: None }
    }
}

impl AccountState {
    pub fn address(&self) -> Option<Address> {
        self.session.as_ref().map(|s| s.address)
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.chain_id)
    }

    /// Writes are only enabled on the fixed network.
    pub fn is_correct_chain(&self) -> bool {
        self.chain_id() == Some(BASE_CHAIN_ID)
    }

    pub fn is_disconnected(&self) -> bool {
        self.session.is_none()
    }

    /// Connected addresses rendered as a JSON array.
    pub fn addresses_json(&self) -> String {
        let addresses: Vec<Address> = self.address().into_iter().collect();
        serde_json::to_string(&addresses).unwrap_or_else(|_| "[]".to_string())
    }
}

/// State of the most recent write, stored in a Dioxus `Signal`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteState {
    pub pending: bool,
    pub last_hash: Option<TxHash>,
    pub last_error: Option<String>,
}

/// Long-lived services, created once when the root component mounts.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub reader: Arc<dyn BalanceReader>,
    pub connectors: Arc<Vec<Arc<dyn Connector>>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let reader = Arc::new(RpcReader::new(config.rpc_url.clone()));
        let connectors = Arc::new(wallet::discover(&config));
        if connectors.is_empty() {
            warn!("no wallet connectors configured; set STATA_PRIVATE_KEY or STATA_WATCH_ADDRESS");
        }
        Self { config, reader, connectors }
    }
}
