//! Runtime configuration, read once from the environment at startup.

use std::time::Duration;

use alloy::primitives::Address;
use alloy::transports::http::reqwest::Url;
use tracing::Level;

const RPC_URL: &str = "STATA_RPC_URL";
const POLL_INTERVAL_SECS: &str = "STATA_POLL_INTERVAL_SECS";
const PRIVATE_KEY: &str = "STATA_PRIVATE_KEY";
const WATCH_ADDRESS: &str = "STATA_WATCH_ADDRESS";
const LOG_LEVEL: &str = "STATA_LOG";

const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidInterval { var: &'static str, value: String },
    #[error("{var} is not a valid address: {value:?}")]
    InvalidAddress { var: &'static str, value: String },
    #[error("{var} is not a log level: {value:?}")]
    InvalidLogLevel { var: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub rpc_url: Url,
    pub poll_interval: Duration,
    /// Hex private key for the local signer connector, if configured.
    pub private_key: Option<String>,
    /// Address for the read-only connector, if configured.
    pub watch_address: Option<Address>,
    pub log_level: Level,
}

// Keeps the private key out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("poll_interval", &self.poll_interval)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("watch_address", &self.watch_address)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rpc_url = var(RPC_URL)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidUrl { var: RPC_URL, reason: e.to_string() })?;

        let poll_interval = match var(POLL_INTERVAL_SECS) {
            None => DEFAULT_POLL_INTERVAL,
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidInterval { var: POLL_INTERVAL_SECS, value });
                }
            },
        };

        let watch_address = var(WATCH_ADDRESS)
            .map(|value| {
                value
                    .parse::<Address>()
                    .map_err(|_| ConfigError::InvalidAddress { var: WATCH_ADDRESS, value })
            })
            .transpose()?;

        let log_level = match var(LOG_LEVEL) {
            None => Level::INFO,
            Some(value) => value
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidLogLevel { var: LOG_LEVEL, value })?,
        };

        Ok(Self {
            rpc_url,
            poll_interval,
            private_key: var(PRIVATE_KEY),
            watch_address,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.rpc_url.as_str(), "https://mainnet.base.org/");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert!(config.private_key.is_none());
        assert!(config.watch_address.is_none());
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            (RPC_URL, "http://localhost:8545"),
            (POLL_INTERVAL_SECS, "3"),
            (PRIVATE_KEY, "0xabc"),
            (WATCH_ADDRESS, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
            (LOG_LEVEL, "debug"),
        ])
        .unwrap();
        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.private_key.as_deref(), Some("0xabc"));
        assert_eq!(config.watch_address, Some(stata_contracts::USDC.address));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(PRIVATE_KEY, "  "), (POLL_INTERVAL_SECS, "")]).unwrap();
        assert!(config.private_key.is_none());
        assert_eq!(config.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            config_from(&[(POLL_INTERVAL_SECS, "0")]),
            Err(ConfigError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn bad_address_is_rejected() {
        assert!(matches!(
            config_from(&[(WATCH_ADDRESS, "0x123")]),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let config = config_from(&[(PRIVATE_KEY, "0xdeadbeef")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("<redacted>"));
    }
}
