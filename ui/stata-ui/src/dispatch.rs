//! Write dispatch: form input to exactly one contract call.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use stata_contracts::{ContractDescriptor, IStaticAToken, IERC20, BASE_CHAIN_ID, STATA_USDC};
use tracing::{info, warn};

use crate::chain::{ChainError, ContractCall};
use crate::units::{parse_amount, AmountError};
use crate::wallet::WalletSession;

/// Aave referral code; zero means no referrer.
const REFERRAL_CODE: u16 = 0;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Connect a wallet first")]
    NotConnected,
    #[error("Switch to chain {expected} to write (connected to {actual})")]
    WrongChain { expected: u64, actual: u64 },
    #[error("{0}")]
    InvalidAmount(#[from] AmountError),
    #[error("{0}")]
    Chain(#[from] ChainError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOperation {
    Approve { token: ContractDescriptor, amount: U256 },
    ApproveUnlimited { token: ContractDescriptor },
    Revoke { token: ContractDescriptor },
    /// `as_interest_bearing` means the assets pulled are aUSDC, not USDC.
    Deposit { amount: U256, as_interest_bearing: bool },
    /// `as_interest_bearing` means the payout is aUSDC, not USDC.
    Redeem { amount: U256, as_interest_bearing: bool },
}

impl WriteOperation {
    pub fn approve_from_form(token: ContractDescriptor, amount: &str) -> Result<Self, AmountError> {
        Ok(Self::Approve { token, amount: parse_amount(amount)? })
    }

    pub fn deposit_from_form(amount: &str, as_interest_bearing: bool) -> Result<Self, AmountError> {
        Ok(Self::Deposit { amount: parse_amount(amount)?, as_interest_bearing })
    }

    pub fn redeem_from_form(amount: &str, as_interest_bearing: bool) -> Result<Self, AmountError> {
        Ok(Self::Redeem { amount: parse_amount(amount)?, as_interest_bearing })
    }

    /// Short description for the log, e.g. `"Approve unlimited USDC"`.
    pub fn label(&self) -> String {
        match self {
            Self::Approve { token, .. } => format!("Approve {}", token.symbol),
            Self::ApproveUnlimited { token } => format!("Approve unlimited {}", token.symbol),
            Self::Revoke { token } => format!("Revoke {}", token.symbol),
            Self::Deposit { as_interest_bearing, .. } => {
                format!("Deposit {}", if *as_interest_bearing { "aUSDC" } else { "USDC" })
            }
            Self::Redeem { as_interest_bearing, .. } => {
                format!("Redeem to {}", if *as_interest_bearing { "aUSDC" } else { "USDC" })
            }
        }
    }

    /// Encode as a call from `account`. The wrapper is always the spender.
    pub fn into_call(self, account: Address) -> ContractCall {
        match self {
            Self::Approve { token, amount } => approve_call(token, amount),
            Self::ApproveUnlimited { token } => approve_call(token, U256::MAX),
            Self::Revoke { token } => approve_call(token, U256::ZERO),
            Self::Deposit { amount, as_interest_bearing } => ContractCall {
                to: STATA_USDC.address,
                calldata: Bytes::from(
                    IStaticAToken::depositCall {
                        assets: amount,
                        receiver: account,
                        referralCode: REFERRAL_CODE,
                        depositToAave: !as_interest_bearing,
                    }
                    .abi_encode(),
                ),
            },
            Self::Redeem { amount, as_interest_bearing } => ContractCall {
                to: STATA_USDC.address,
                calldata: Bytes::from(
                    IStaticAToken::redeemCall {
                        shares: amount,
                        receiver: account,
                        owner: account,
                        withdrawFromAave: !as_interest_bearing,
                    }
                    .abi_encode(),
                ),
            },
        }
    }
}

fn approve_call(token: ContractDescriptor, amount: U256) -> ContractCall {
    ContractCall {
        to: token.address,
        calldata: Bytes::from(IERC20::approveCall { spender: STATA_USDC.address, amount }.abi_encode()),
    }
}

/// Whether writes are allowed for this session at all.
pub fn check_gate(session: Option<&WalletSession>) -> Result<&WalletSession, DispatchError> {
    let session = session.ok_or(DispatchError::NotConnected)?;
    if !session.is_on_chain(BASE_CHAIN_ID) {
        return Err(DispatchError::WrongChain { expected: BASE_CHAIN_ID, actual: session.chain_id });
    }
    Ok(session)
}

/// Submit one operation. Returns once the wallet hands back a hash; does not
/// wait for the transaction to be mined.
pub async fn dispatch(
    session: Option<&WalletSession>,
    op: WriteOperation,
) -> Result<TxHash, DispatchError> {
    let session = check_gate(session)?;
    let call = op.into_call(session.address);

    match session.client.send(call).await {
        Ok(hash) => {
            info!(operation = %op.label(), tx_hash = %hash, event = "write_dispatched");
            Ok(hash)
        }
        Err(e) => {
            warn!(operation = %op.label(), error = %e, event = "write_rejected");
            Err(e.into())
        }
    }
}
