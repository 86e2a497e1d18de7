use dioxus::prelude::*;
use stata_contracts::{ContractDescriptor, APPROVABLE_TOKENS, CHAIN_NAME, STATA_USDC};

use super::submit::use_write_handles;
use super::wrap::{ChainGateBanner, WriteFeedback};
use crate::balances::BalanceState;
use crate::dispatch::WriteOperation;
use crate::state::AccountState;
use crate::units::format_fixed;

#[component]
pub fn ApprovalsPage() -> Element {
    rsx! {
        div { class: "page",
            h1 { "Approvals" }
            p { class: "subtitle",
                "Allow the {STATA_USDC.symbol} contract to pull tokens from your wallet."
            }
            ChainGateBanner {}
            for token in APPROVABLE_TOKENS {
                ApprovalForm { key: "{token.symbol}", token }
            }
            WriteFeedback {}
        }
    }
}

/// Exact / unlimited / revoke approval of `token` to the wrapper.
#[component]
fn ApprovalForm(token: ContractDescriptor) -> Element {
    let account = use_context::<Signal<AccountState>>();
    let balances = use_context::<Signal<BalanceState>>();
    let writer = use_write_handles();

    let mut amount_str = use_signal(String::new);

    let gate_open = account.read().is_correct_chain();
    let busy = writer.is_pending();
    let allowance = balances.read().displayed().allowance_for(token.address).unwrap_or_default();
    let input_id = format!("approve-{}", token.symbol.to_lowercase());

    let on_approve = {
        let writer = writer.clone();
        move |_| match WriteOperation::approve_from_form(token, &amount_str.read()) {
            Ok(op) => writer.submit(op),
            Err(e) => writer.reject_locally(e.to_string()),
        }
    };
    let on_unlimited = {
        let writer = writer.clone();
        move |_| writer.submit(WriteOperation::ApproveUnlimited { token })
    };
    let on_revoke = move |_| writer.submit(WriteOperation::Revoke { token });

    rsx! {
        div { class: "result-card",
            fieldset { disabled: !gate_open || busy,
                div { class: "form-group",
                    label { r#for: "{input_id}", "Set {token.symbol} approval" }
                    input {
                        id: "{input_id}",
                        class: "input",
                        r#type: "text",
                        placeholder: "0.0",
                        value: "{amount_str}",
                        oninput: move |e| amount_str.set(e.value()),
                    }
                }
                div { class: "button-row",
                    button { class: "btn btn-primary", onclick: on_approve, "Approve" }
                    button { class: "btn btn-secondary", onclick: on_unlimited, "Approve unlimited" }
                    button { class: "btn btn-secondary", onclick: on_revoke, "Revoke" }
                }
            }
            p { class: "hint",
                "Current allowance: "
                span { class: "mono", "{format_fixed(allowance)} {token.symbol}" }
            }
            if !gate_open {
                p { class: "hint", "Approvals are disabled until you are connected to {CHAIN_NAME}." }
            }
        }
    }
}
