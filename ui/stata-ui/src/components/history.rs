use dioxus::prelude::*;
use stata_contracts::{tx_url, ALL_CONTRACTS};

use super::wrap::WriteFeedback;
use crate::tx_log::{TxLog, TxOutcome, TxStatus};

#[component]
pub fn HistoryPage() -> Element {
    let tx_log = use_context::<Signal<TxLog>>();
    let log = tx_log.read().clone();

    rsx! {
        div { class: "page",
            h1 { "Transactions" }
            p { class: "subtitle", "Everything submitted since the app started, oldest first." }
            WriteFeedback {}
            div { class: "result-card",
                h3 { "Tx hash:" }
                if log.is_empty() {
                    p { class: "hint", "Nothing submitted yet." }
                } else {
                    p { class: "hint", "{log.len()} attempt(s), {log.pending_count()} pending" }
                }
                div { id: "hashes",
                    for (i, entry) in log.entries().iter().enumerate() {
                        div { key: "{i}", class: "tx-row",
                            span { class: "tx-op", "{entry.operation}" }
                            match &entry.outcome {
                                TxOutcome::Submitted { hash, status } => rsx! {
                                    a { class: "mono", href: "{tx_url(hash)}", "{hash}" }
                                    StatusBadge { status: *status }
                                },
                                TxOutcome::Rejected { message } => rsx! {
                                    span { class: "error-text", "{message}" }
                                },
                            }
                        }
                    }
                }
            }
            ContractLinks {}
        }
    }
}

#[component]
fn StatusBadge(status: TxStatus) -> Element {
    let (class, label) = match status {
        TxStatus::Pending => ("badge badge-pending", "pending"),
        TxStatus::Confirmed => ("badge badge-ok", "confirmed"),
        TxStatus::Failed => ("badge badge-failed", "failed"),
    };
    rsx! {
        span { class, "{label}" }
    }
}

/// Explorer links for the three contracts.
#[component]
pub fn ContractLinks() -> Element {
    rsx! {
        div { class: "result-card",
            for contract in ALL_CONTRACTS {
                p { key: "{contract.symbol}", class: "label",
                    "{contract.symbol} address: "
                    a { class: "mono", href: "{contract.explorer_url()}", "{contract.address}" }
                }
            }
        }
    }
}
