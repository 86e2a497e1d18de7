//! Contract-call layer: batched balance reads and single transaction writes
//! over an alloy provider.
//!
//! The UI only talks to the [`BalanceReader`] and [`TransactionSender`]
//! traits, so tests can swap in mocks without a node.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, MulticallError, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::reqwest::Url;
use alloy::transports::TransportError;
use async_trait::async_trait;
use stata_contracts::{IStaticAToken, IERC20, AUSDC, STATA_USDC, USDC};
use tracing::{debug, info, warn};

/// Number of reads in one balance batch.
pub const BATCH_LEN: usize = 5;

/// Result of a single call inside a batch.
pub type CallOutcome = Result<U256, String>;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Transport(#[from] TransportError),
    #[error("Multicall error: {0}")]
    Multicall(#[from] MulticallError),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("The connected account cannot sign transactions")]
    ReadOnly,
}

/// One write, ready to hand to a signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub calldata: Bytes,
}

/// On-chain outcome of a mined transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// Batched read of the five balances/allowances the UI shows.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Outcomes are in display order: USDC balance, USDC allowance, aUSDC
    /// balance, aUSDC allowance, stataUSDC balance.
    async fn read_balances(&self, owner: Address) -> Result<[CallOutcome; BATCH_LEN], ChainError>;
}

/// Signs and submits one transaction at a time.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Returns as soon as the node accepts the transaction.
    async fn send(&self, call: ContractCall) -> Result<TxHash, ChainError>;

    /// `None` while the transaction is still unmined.
    async fn receipt_status(&self, hash: TxHash) -> Result<Option<ReceiptStatus>, ChainError>;

    async fn chain_id(&self) -> Result<u64, ChainError>;
}

// ---------------------------------------------------------------------------
// RpcReader
// ---------------------------------------------------------------------------

/// Read-only client; needs no account.
#[derive(Clone)]
pub struct RpcReader {
    provider: DynProvider,
}

impl RpcReader {
    pub fn new(rpc_url: Url) -> Self {
        debug!(rpc_url = %rpc_url, event = "rpc_reader_initialized");
        Self { provider: ProviderBuilder::new().connect_http(rpc_url).erased() }
    }
}

#[async_trait]
impl BalanceReader for RpcReader {
    async fn read_balances(&self, owner: Address) -> Result<[CallOutcome; BATCH_LEN], ChainError> {
        let usdc = IERC20::new(USDC.address, &self.provider);
        let ausdc = IERC20::new(AUSDC.address, &self.provider);
        let stata = IStaticAToken::new(STATA_USDC.address, &self.provider);

        debug!(owner = %owner, event = "balance_batch_requested");

        let (usdc_balance, usdc_allowance, ausdc_balance, ausdc_allowance, stata_balance) = self
            .provider
            .multicall()
            .add(usdc.balanceOf(owner))
            .add(usdc.allowance(owner, STATA_USDC.address))
            .add(ausdc.balanceOf(owner))
            .add(ausdc.allowance(owner, STATA_USDC.address))
            .add(stata.balanceOf(owner))
            .aggregate3()
            .await?;

        let outcomes = [
            usdc_balance.map_err(|f| format!("{f:?}")),
            usdc_allowance.map_err(|f| format!("{f:?}")),
            ausdc_balance.map_err(|f| format!("{f:?}")),
            ausdc_allowance.map_err(|f| format!("{f:?}")),
            stata_balance.map_err(|f| format!("{f:?}")),
        ];

        debug!(
            owner = %owner,
            failed = outcomes.iter().filter(|o| o.is_err()).count(),
            event = "balance_batch_returned"
        );

        Ok(outcomes)
    }
}

// ---------------------------------------------------------------------------
// SignerClient
// ---------------------------------------------------------------------------

/// Provider with a wallet filler; signs with the connector's key.
#[derive(Clone)]
pub struct SignerClient {
    provider: DynProvider,
    from: Address,
}

impl SignerClient {
    pub fn new(provider: DynProvider, from: Address) -> Self {
        Self { provider, from }
    }
}

#[async_trait]
impl TransactionSender for SignerClient {
    async fn send(&self, call: ContractCall) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_to(call.to)
            .with_input(call.calldata);

        let pending = self.provider.send_transaction(request).await?;
        let hash = *pending.tx_hash();

        info!(
            from = %self.from,
            contract_address = %call.to,
            tx_hash = %hash,
            event = "transaction_submitted"
        );

        Ok(hash)
    }

    async fn receipt_status(&self, hash: TxHash) -> Result<Option<ReceiptStatus>, ChainError> {
        fetch_receipt_status(&self.provider, hash).await
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }
}

/// Session client for a watch-only account: can read chain data, cannot sign.
#[derive(Clone)]
pub struct ReadOnlyClient {
    provider: DynProvider,
}

impl ReadOnlyClient {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TransactionSender for ReadOnlyClient {
    async fn send(&self, call: ContractCall) -> Result<TxHash, ChainError> {
        warn!(contract_address = %call.to, event = "read_only_send_refused");
        Err(ChainError::ReadOnly)
    }

    async fn receipt_status(&self, hash: TxHash) -> Result<Option<ReceiptStatus>, ChainError> {
        fetch_receipt_status(&self.provider, hash).await
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }
}

async fn fetch_receipt_status(
    provider: &DynProvider,
    hash: TxHash,
) -> Result<Option<ReceiptStatus>, ChainError> {
    let receipt = provider.get_transaction_receipt(hash).await?;
    Ok(receipt.map(|r| if r.status() { ReceiptStatus::Success } else { ReceiptStatus::Reverted }))
}

/// Run a chain request with an upper bound on how long it may take.
pub async fn with_timeout<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T, ChainError>>,
) -> Result<T, ChainError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ChainError::Timeout(limit)),
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockSender;
    use super::*;

    #[tokio::test]
    async fn timeout_wraps_slow_requests() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, ChainError>(1u8)
        };
        let err = with_timeout(Duration::from_millis(10), slow).await.unwrap_err();
        assert!(matches!(err, ChainError::Timeout(_)));
    }

    #[tokio::test]
    async fn timeout_passes_fast_results_through() {
        let fast = async { Ok::<_, ChainError>(7u8) };
        assert_eq!(with_timeout(Duration::from_secs(1), fast).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn mock_sender_reports_rejections_as_errors() {
        let sender = MockSender::rejecting(8453, "User rejected the request");
        let call = ContractCall { to: USDC.address, calldata: Bytes::new() };
        let err = sender.send(call).await.unwrap_err();
        assert!(err.to_string().contains("User rejected the request"));
    }
}
