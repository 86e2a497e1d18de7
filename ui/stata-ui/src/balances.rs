//! Read-state aggregation for the five balance/allowance reads.

use std::time::Duration;

use alloy::primitives::{Address, U256};
use stata_contracts::{AUSDC, STATA_USDC, USDC};
use tracing::warn;

use crate::chain::{self, BalanceReader, CallOutcome, BATCH_LEN};

/// Latest known values for one account, all in base units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub usdc_balance: U256,
    pub usdc_allowance: U256,
    pub ausdc_balance: U256,
    pub ausdc_allowance: U256,
    pub stata_balance: U256,
}

impl BalanceSnapshot {
    /// All five calls must succeed; the first failure wins.
    pub fn from_outcomes(outcomes: [CallOutcome; BATCH_LEN]) -> Result<Self, String> {
        let mut values = [U256::ZERO; BATCH_LEN];
        for (i, outcome) in outcomes.into_iter().enumerate() {
            values[i] = outcome.map_err(|e| format!("{} failed: {e}", Self::LABELS[i]))?;
        }
        let [usdc_balance, usdc_allowance, ausdc_balance, ausdc_allowance, stata_balance] = values;
        Ok(Self { usdc_balance, usdc_allowance, ausdc_balance, ausdc_allowance, stata_balance })
    }

    const LABELS: [&'static str; BATCH_LEN] = [
        "USDC balance",
        "USDC allowance",
        "aUSDC balance",
        "aUSDC allowance",
        "stataUSDC balance",
    ];

    /// `(label, value)` rows in display order.
    pub fn rows(&self) -> [(String, U256); BATCH_LEN] {
        [
            (format!("{} Balance", USDC.symbol), self.usdc_balance),
            (format!("{} Allowance", USDC.symbol), self.usdc_allowance),
            (format!("{} Balance", AUSDC.symbol), self.ausdc_balance),
            (format!("{} Allowance", AUSDC.symbol), self.ausdc_allowance),
            (format!("{} Balance", STATA_USDC.symbol), self.stata_balance),
        ]
    }

    pub fn allowance_for(&self, token: Address) -> Option<U256> {
        if token == USDC.address {
            Some(self.usdc_allowance)
        } else if token == AUSDC.address {
            Some(self.ausdc_allowance)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Fetch bookkeeping shared with the view.
///
/// Every refresh starts a new generation; only the newest generation's
/// result is applied, so overlapping fetches settle on the latest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceState {
    pub status: FetchStatus,
    pub snapshot: Option<BalanceSnapshot>,
    pub owner: Address,
    generation: u64,
}

impl Default for BalanceState {
    fn default() -> Self {
        Self { status: FetchStatus::Idle, snapshot: None, owner: Address::ZERO, generation: 0 }
    }
}

impl BalanceState {
    /// Mark a new fetch for `owner` as outstanding and return its generation.
    pub fn begin(&mut self, owner: Address) -> u64 {
        if owner != self.owner {
            self.snapshot = None;
            self.owner = owner;
        }
        self.generation += 1;
        self.status = FetchStatus::Loading;
        self.generation
    }

    /// Apply a finished fetch. Returns `false` if a newer fetch superseded it.
    pub fn complete(&mut self, generation: u64, result: Result<BalanceSnapshot, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.status = FetchStatus::Success;
            }
            Err(e) => self.status = FetchStatus::Error(e),
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Idle | FetchStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, FetchStatus::Error(_))
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    /// Values to render: the last good snapshot, or zeros.
    pub fn displayed(&self) -> BalanceSnapshot {
        self.snapshot.unwrap_or_default()
    }
}

/// Run one batch for `owner`, or for the zero address when disconnected.
pub async fn fetch_snapshot(
    reader: &dyn BalanceReader,
    owner: Option<Address>,
    limit: Duration,
) -> Result<BalanceSnapshot, String> {
    let owner = owner.unwrap_or(Address::ZERO);
    let result = chain::with_timeout(limit, reader.read_balances(owner))
        .await
        .map_err(|e| e.to_string())
        .and_then(BalanceSnapshot::from_outcomes);

    if let Err(e) = &result {
        warn!(owner = %owner, error = %e, event = "balance_fetch_failed");
    }
    result
}
