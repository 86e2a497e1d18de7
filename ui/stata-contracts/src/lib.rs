//! Contract bindings and fixed chain data for the stataUSDC wrap UI.
//!
//! Everything here is known at build time: the target network, its block
//! explorer, the three token contracts and the ABI fragments the UI calls.

use alloy::primitives::{address, Address, TxHash};
use alloy::sol;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Base mainnet.
pub const BASE_CHAIN_ID: u64 = 8453;

pub const CHAIN_NAME: &str = "Base";

/// Default block explorer for Base, without a trailing slash.
pub const EXPLORER_URL: &str = "https://basescan.org";

/// All three tokens use 6 decimals.
pub const TOKEN_DECIMALS: u8 = 6;

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

/// An immutable (symbol, address) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractDescriptor {
    pub symbol: &'static str,
    pub address: Address,
}

impl ContractDescriptor {
    pub fn explorer_url(&self) -> String {
        address_url(&self.address)
    }
}

/// Circle USDC, the underlying asset.
pub const USDC: ContractDescriptor = ContractDescriptor {
    symbol: "USDC",
    address: address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
};

/// Aave v3 aUSDC, the rebasing interest-bearing token.
pub const AUSDC: ContractDescriptor = ContractDescriptor {
    symbol: "aUSDC",
    address: address!("4e65fE4DbA92790696d040ac24Aa414708F5c0AB"),
};

/// Static aToken wrapper around aUSDC. Spender of every approval.
pub const STATA_USDC: ContractDescriptor = ContractDescriptor {
    symbol: "stataUSDC",
    address: address!("4EA71A20e655794051D1eE8b6e4A3269B13ccaCc"),
};

/// The two tokens the wrapper can pull from the user.
pub const APPROVABLE_TOKENS: [ContractDescriptor; 2] = [USDC, AUSDC];

pub const ALL_CONTRACTS: [ContractDescriptor; 3] = [USDC, AUSDC, STATA_USDC];

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IStaticAToken {
        function balanceOf(address account) external view returns (uint256);

        /// `depositToAave == true` pulls the underlying (USDC) and supplies it
        /// to Aave; `false` pulls aUSDC directly.
        function deposit(uint256 assets, address receiver, uint16 referralCode, bool depositToAave) external returns (uint256);

        /// `withdrawFromAave == true` pays out the underlying (USDC);
        /// `false` pays out aUSDC.
        function redeem(uint256 shares, address receiver, address owner, bool withdrawFromAave) external returns (uint256);
    }
);

// ---------------------------------------------------------------------------
// Explorer links
// ---------------------------------------------------------------------------

pub fn tx_url(hash: &TxHash) -> String {
    format!("{EXPLORER_URL}/tx/{hash}")
}

pub fn address_url(address: &Address) -> String {
    format!("{EXPLORER_URL}/address/{address}")
}
