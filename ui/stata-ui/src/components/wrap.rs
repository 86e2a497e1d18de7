use dioxus::prelude::*;
use stata_contracts::{tx_url, AUSDC, CHAIN_NAME, STATA_USDC, USDC};

use super::submit::use_write_handles;
use crate::balances::BalanceState;
use crate::dispatch::WriteOperation;
use crate::state::{AccountState, WriteState};
use crate::units::format_fixed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    Deposit,
    Redeem,
}

#[component]
pub fn WrapPage() -> Element {
    let balances = use_context::<Signal<BalanceState>>();
    let snap = balances.read().displayed();

    rsx! {
        div { class: "page",
            h1 { "Wrap" }
            p { class: "subtitle", "Deposit (a)USDC for {STATA_USDC.symbol}, or redeem it back." }
            ChainGateBanner {}
            div { class: "result-card",
                p { class: "label", "{USDC.symbol}: " span { class: "mono", "{format_fixed(snap.usdc_balance)}" } }
                p { class: "label", "{AUSDC.symbol}: " span { class: "mono", "{format_fixed(snap.ausdc_balance)}" } }
                p { class: "label", "{STATA_USDC.symbol}: " span { class: "mono", "{format_fixed(snap.stata_balance)}" } }
            }
            TransferForm { kind: TransferKind::Deposit }
            TransferForm { kind: TransferKind::Redeem }
            WriteFeedback {}
        }
    }
}

/// Amount field plus the "as aUSDC" routing checkbox.
#[component]
fn TransferForm(kind: TransferKind) -> Element {
    let account = use_context::<Signal<AccountState>>();
    let writer = use_write_handles();

    let mut amount_str = use_signal(String::new);
    let mut as_atoken = use_signal(|| false);

    let gate_open = account.read().is_correct_chain();
    let busy = writer.is_pending();

    let (title, action, input_id) = match kind {
        TransferKind::Deposit => ("Deposit (a)USDC", "Deposit", "deposit-amount"),
        TransferKind::Redeem => ("Withdraw stataUSDC", "Withdraw", "redeem-amount"),
    };

    let on_submit = move |_| {
        let amount = amount_str.read().clone();
        let as_interest_bearing = *as_atoken.read();
        let op = match kind {
            TransferKind::Deposit => WriteOperation::deposit_from_form(&amount, as_interest_bearing),
            TransferKind::Redeem => WriteOperation::redeem_from_form(&amount, as_interest_bearing),
        };
        match op {
            Ok(op) => writer.submit(op),
            Err(e) => writer.reject_locally(e.to_string()),
        }
    };

    rsx! {
        div { class: "result-card",
            fieldset { disabled: !gate_open || busy,
                div { class: "form-group",
                    label { r#for: "{input_id}", "{title}" }
                    input {
                        id: "{input_id}",
                        class: "input",
                        r#type: "text",
                        placeholder: "0.0",
                        value: "{amount_str}",
                        oninput: move |e| amount_str.set(e.value()),
                    }
                }
                div { class: "form-group checkbox-group",
                    label { "as {AUSDC.symbol}: " }
                    input {
                        r#type: "checkbox",
                        checked: *as_atoken.read(),
                        onchange: move |e| as_atoken.set(e.checked()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    onclick: on_submit,
                    if busy { "Submitting..." } else { "{action}" }
                }
            }
        }
    }
}

/// Shown whenever writes are gated off.
#[component]
pub fn ChainGateBanner() -> Element {
    let account = use_context::<Signal<AccountState>>();
    let gate_open = account.read().is_correct_chain();

    rsx! {
        if !gate_open {
            h2 { class: "gate-banner", "Connect to {CHAIN_NAME} to write" }
        }
    }
}

/// Pending indicator, last hash and last error for the write forms.
#[component]
pub fn WriteFeedback() -> Element {
    let write_state = use_context::<Signal<WriteState>>();
    let state = write_state.read().clone();

    rsx! {
        if state.pending {
            p { class: "hint", span { class: "spinner" } "Waiting for wallet..." }
        }
        if let Some(hash) = state.last_hash {
            p { class: "success-text",
                "Last tx: "
                a { href: "{tx_url(&hash)}", class: "mono", "{hash}" }
            }
        }
        if let Some(msg) = state.last_error.as_ref() {
            p { class: "error-text", "{msg}" }
        }
    }
}
