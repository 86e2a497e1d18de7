use dioxus::prelude::*;
use stata_contracts::{CHAIN_NAME, STATA_USDC};

use super::connection_status::{AccountBadge, ConnectionStatusIndicator};
use crate::balances::BalanceState;
use crate::state::AccountState;
use crate::tx_log::TxLog;
use crate::units::format_amount;
use crate::Route;

#[component]
pub fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            div { class: "sidebar-brand",
                span { class: "brand-icon", "◈" }
                span { class: "brand-text", "stataUSDC" }
            }
            div { class: "sidebar-nav",
                NavSection { label: "Account" }
                NavLink { to: Route::Home {}, label: "Overview", icon: "⌂" }
                NavSection { label: "Wrapper" }
                NavLink { to: Route::Approvals {}, label: "Approvals", icon: "✓" }
                NavLink { to: Route::Wrap {}, label: "Deposit / Redeem", icon: "⇄" }
                NavLink { to: Route::History {}, label: "Transactions", icon: "≡" }
            }
            div { class: "sidebar-footer",
                span { class: "sidebar-footer-text", "{CHAIN_NAME}" }
            }
        }
    }
}

#[component]
pub fn TopBar() -> Element {
    let account = use_context::<Signal<AccountState>>();
    let balances = use_context::<Signal<BalanceState>>();
    let tx_log = use_context::<Signal<TxLog>>();

    let chain_id = account.read().chain_id();
    let wrong_chain = chain_id.is_some() && !account.read().is_correct_chain();
    let stata = balances.read().snapshot.map(|s| s.stata_balance);
    let pending = tx_log.read().pending_count();

    rsx! {
        header { class: "topbar",
            div { class: "topbar-left",
                AccountBadge {}
                if let Some(id) = chain_id {
                    div { class: "topbar-divider" }
                    span { class: if wrong_chain { "chain-badge chain-badge-wrong" } else { "chain-badge" },
                        "chain {id}"
                    }
                }
                if let Some(value) = stata {
                    div { class: "topbar-divider" }
                    div { class: "topbar-balance",
                        span { class: "topbar-label", "{STATA_USDC.symbol}" }
                        span { class: "topbar-value", "{format_amount(value)}" }
                    }
                }
                if pending > 0 {
                    div { class: "topbar-divider" }
                    span { class: "topbar-label", "{pending} pending" }
                }
            }
            div { class: "topbar-right",
                ConnectionStatusIndicator {}
            }
        }
    }
}

#[component]
fn NavSection(label: &'static str) -> Element {
    rsx! {
        div { class: "nav-section-label", "{label}" }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { class: "nav-link", to: to,
            span { class: "nav-icon", "{icon}" }
            span { "{label}" }
        }
    }
}
