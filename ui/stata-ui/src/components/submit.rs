//! Shared plumbing for the write forms: dispatch, log, then watch the receipt.

use std::time::Duration;

use alloy::primitives::TxHash;
use dioxus::prelude::*;
use tracing::{info, warn};

use super::balance::refresh_balances;
use crate::balances::BalanceState;
use crate::dispatch::{self, WriteOperation};
use crate::state::{AccountState, AppContext, WriteState};
use crate::tx_log::{TxLog, TxStatus};
use crate::wallet::WalletSession;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_POLL_ATTEMPTS: usize = 60;

/// Handles to everything a submission touches.
#[derive(Clone)]
pub struct WriteHandles {
    ctx: AppContext,
    account: Signal<AccountState>,
    balances: Signal<BalanceState>,
    write_state: Signal<WriteState>,
    tx_log: Signal<TxLog>,
}

pub fn use_write_handles() -> WriteHandles {
    WriteHandles {
        ctx: use_context::<AppContext>(),
        account: use_context::<Signal<AccountState>>(),
        balances: use_context::<Signal<BalanceState>>(),
        write_state: use_context::<Signal<WriteState>>(),
        tx_log: use_context::<Signal<TxLog>>(),
    }
}

impl WriteHandles {
    pub fn is_pending(&self) -> bool {
        self.write_state.read().pending
    }

    /// Submit `op` in the background. Exactly one log entry is appended when
    /// the wallet answers, even if the form that asked has since unmounted.
    pub fn submit(&self, op: WriteOperation) {
        let WriteHandles { ctx, account, balances, mut write_state, mut tx_log } = self.clone();
        let session = account.peek().session.clone();

        {
            let mut state = write_state.write();
            state.pending = true;
            state.last_error = None;
        }

        spawn_forever(async move {
            let result = dispatch::dispatch(session.as_ref(), op).await;

            let mut state = write_state.write();
            state.pending = false;
            match result {
                Ok(hash) => {
                    state.last_hash = Some(hash);
                    drop(state);
                    tx_log.write().record_submitted(op.label(), hash);
                    if let Some(session) = session {
                        spawn_forever(watch_receipt(session, hash, ctx, account, balances, tx_log));
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    state.last_error = Some(message.clone());
                    drop(state);
                    tx_log.write().record_rejected(op.label(), message);
                }
            }
        });
    }

    /// Report a validation failure without submitting anything.
    pub fn reject_locally(&self, message: String) {
        let mut write_state = self.write_state;
        write_state.write().last_error = Some(message);
    }
}

/// Poll for the receipt until mined or out of attempts, then refresh balances.
async fn watch_receipt(
    session: WalletSession,
    hash: TxHash,
    ctx: AppContext,
    account: Signal<AccountState>,
    balances: Signal<BalanceState>,
    mut tx_log: Signal<TxLog>,
) {
    for _ in 0..RECEIPT_POLL_ATTEMPTS {
        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;

        match session.client.receipt_status(hash).await {
            Ok(Some(status)) => {
                info!(tx_hash = %hash, status = ?status, event = "transaction_mined");
                tx_log.write().set_status(hash, TxStatus::from(status));
                refresh_balances(ctx, account, balances);
                return;
            }
            Ok(None) => {}
            Err(e) => warn!(tx_hash = %hash, error = %e, event = "receipt_lookup_failed"),
        }
    }
    warn!(tx_hash = %hash, event = "receipt_wait_gave_up");
}
