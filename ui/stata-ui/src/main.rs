#![allow(non_snake_case)]

mod balances;
mod chain;
mod components;
mod config;
mod dispatch;
mod state;
mod tx_log;
mod units;
mod wallet;

use dioxus::prelude::*;
use tracing::info;

use balances::BalanceState;
use config::AppConfig;
use state::{AccountState, AppContext, WriteState};
use tx_log::TxLog;

const STYLE: &str = include_str!("../assets/style.css");

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/approve")]
    Approvals {},
    #[route("/wrap")]
    Wrap {},
    #[route("/history")]
    History {},
}

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = dioxus::logger::init(config.log_level) {
        eprintln!("failed to install logger: {e}");
    }
    info!(?config, "starting stata-ui");

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<AppConfig>();

    // Services and shared state live for as long as the root component.
    let ctx = use_context_provider(|| AppContext::new(config));
    let account = use_context_provider(|| Signal::new(AccountState::default()));
    let balances = use_context_provider(|| Signal::new(BalanceState::default()));
    use_context_provider(|| Signal::new(WriteState::default()));
    use_context_provider(|| Signal::new(TxLog::default()));

    components::balance::use_balance_polling(ctx, account, balances);

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout — sidebar + content
// ---------------------------------------------------------------------------

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::Sidebar {}
            div { class: "main-panel",
                components::layout::TopBar {}
                div { class: "main-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route components — thin wrappers around the real components
// ---------------------------------------------------------------------------

#[component]
fn Home() -> Element {
    let account = use_context::<Signal<AccountState>>();
    let state = account.read().clone();

    rsx! {
        div { class: "page",
            h1 { "stataUSDC wrap UI" }
            p { class: "subtitle", "Wrap USDC or aUSDC into stataUSDC on Base." }
            components::connection_status::StatusLine {}
            if state.is_disconnected() {
                components::connection_status::ConnectPanel {}
            }
            components::balance::BalancePanel {}
            components::history::ContractLinks {}
        }
    }
}

#[component]
fn Approvals() -> Element {
    rsx! { components::approve::ApprovalsPage {} }
}

#[component]
fn Wrap() -> Element {
    rsx! { components::wrap::WrapPage {} }
}

#[component]
fn History() -> Element {
    rsx! { components::history::HistoryPage {} }
}
