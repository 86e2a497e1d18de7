use alloy::primitives::Address;
use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::balances::{fetch_snapshot, BalanceState};
use crate::chain;
use crate::state::{AccountState, AppContext, ConnectionStatus};
use crate::units::{format_fixed, truncate_hex};
use crate::wallet::WalletSession;

/// Start a new balance fetch for the current account. Never blocks: the
/// result lands in `balances` when the batch returns, unless a newer fetch
/// has started in the meantime. Runs at root scope so leaving the page that
/// asked for it does not strand the state in `Loading`.
pub fn refresh_balances(
    ctx: AppContext,
    account: Signal<AccountState>,
    mut balances: Signal<BalanceState>,
) {
    let owner = account.peek().address();
    let generation = balances.write().begin(owner.unwrap_or(Address::ZERO));
    debug!(generation, owner = ?owner, event = "balance_refresh_started");

    spawn_forever(async move {
        let result = fetch_snapshot(ctx.reader.as_ref(), owner, ctx.config.poll_interval).await;
        balances.write().complete(generation, result);
    });
}

/// Re-read the session's chain id; flags the account as reconnecting while
/// the wallet's RPC is unreachable. Only writes the signal on a change.
fn refresh_session(ctx: AppContext, mut account: Signal<AccountState>) {
    let Some(session) = account.peek().session.clone() else {
        return;
    };

    spawn(async move {
        let result = chain::with_timeout(ctx.config.poll_interval, session.client.chain_id()).await;

        let (chain_id, status) = match result {
            Ok(chain_id) => (chain_id, ConnectionStatus::Connected),
            Err(e) => {
                warn!(error = %e, event = "session_unreachable");
                (session.chain_id, ConnectionStatus::Reconnecting)
            }
        };

        if !session_changed(&account.peek(), &session, chain_id, &status) {
            return;
        }

        let mut guard = account.write();
        let state: &mut AccountState = &mut guard;
        if let Some(current) = state.session.as_mut() {
            current.chain_id = chain_id;
        }
        state.status = status;
    });
}

/// Whether a fresh read of `checked` should be written back. False when the user
/// disconnected or switched accounts meanwhile, or when nothing differs.
fn session_changed(
    state: &AccountState,
    checked: &WalletSession,
    chain_id: u64,
    status: &ConnectionStatus,
) -> bool {
    let Some(current) = state.session.as_ref() else {
        return false;
    };
    if current.address != checked.address || current.connector != checked.connector {
        return false;
    }
    current.chain_id != chain_id || state.status != *status
}

/// Fetch on mount and on account change, then every `poll_interval` until the
/// owning component unmounts.
pub fn use_balance_polling(
    ctx: AppContext,
    account: Signal<AccountState>,
    balances: Signal<BalanceState>,
) {
    let address = use_memo(move || account.read().address());

    {
        let ctx = ctx.clone();
        use_effect(move || {
            let _ = address();
            refresh_balances(ctx.clone(), account, balances);
        });
    }

    let task = use_hook(move || {
        spawn(async move {
            let mut ticker = tokio::time::interval(ctx.config.poll_interval);
            // The first tick completes immediately; the mount effect covers it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                refresh_balances(ctx.clone(), account, balances);
                refresh_session(ctx.clone(), account);
            }
        })
    });

    use_drop(move || {
        debug!(event = "balance_polling_stopped");
        task.cancel();
    });
}

#[component]
pub fn BalancePanel() -> Element {
    let ctx = use_context::<AppContext>();
    let account = use_context::<Signal<AccountState>>();
    let balances = use_context::<Signal<BalanceState>>();

    let state = balances.read().clone();
    let rows = state.displayed().rows();

    let on_refresh = move |_| {
        refresh_balances(ctx.clone(), account, balances);
    };

    rsx! {
        div { class: "result-card",
            h3 { "Balances" }
            if state.is_loading() {
                p { class: "hint", "Loading..." }
            }
            if state.is_error() {
                p { class: "error-text", "Error while fetching balances" }
            }
            if state.is_success() {
                p { class: "hint", "Up to date for {truncate_hex(&state.owner.to_string())}" }
            }
            for (label, value) in rows {
                div { class: "balance-row",
                    span { class: "label", "{label}:" }
                    span { class: "mono", "{format_fixed(value)}" }
                }
            }
            button {
                class: "btn btn-secondary",
                disabled: state.is_loading(),
                onclick: on_refresh,
                if state.is_loading() { "Fetching..." } else { "Refresh" }
            }
        }
    }
}
