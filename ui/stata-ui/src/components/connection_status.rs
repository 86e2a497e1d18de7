use std::sync::Arc;

use alloy::transports::http::reqwest::Url;
use dioxus::prelude::*;
use tracing::{info, warn};

use crate::state::{AccountState, AppContext, ConnectionStatus, WriteState};
use crate::units::truncate_hex;
use crate::wallet::Connector;

#[component]
pub fn ConnectionStatusIndicator() -> Element {
    let mut account = use_context::<Signal<AccountState>>();
    let mut write_state = use_context::<Signal<WriteState>>();

    let status = account.read().status.clone();

    let (dot_class, label) = match &status {
        ConnectionStatus::Disconnected => ("dot disconnected", "Disconnected"),
        ConnectionStatus::Connecting => ("dot connecting", "Connecting"),
        ConnectionStatus::Connected => ("dot connected", "Connected"),
        ConnectionStatus::Reconnecting => ("dot connecting", "Reconnecting"),
        ConnectionStatus::Error(_) => ("dot error", "Error"),
    };

    let has_session = account.read().session.is_some();

    let disconnect = move |_| {
        if let Some(session) = account.read().session.as_ref() {
            info!(address = %session.address, event = "wallet_disconnected");
        }
        let mut state = account.write();
        state.session = None;
        state.status = ConnectionStatus::Disconnected;
        write_state.set(WriteState::default());
    };

    rsx! {
        div { class: "conn-indicator",
            span { class: dot_class }
            span { class: "conn-label", "{label}" }
            if has_session {
                button { class: "conn-btn conn-btn-disconnect", onclick: disconnect, "Disconnect" }
            }
        }
    }
}

/// One button per configured connector, shown while disconnected.
#[component]
pub fn ConnectPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let account = use_context::<Signal<AccountState>>();

    let status = account.read().status.clone();
    let connecting = matches!(status, ConnectionStatus::Connecting);

    rsx! {
        div { class: "result-card",
            h3 { "Connect" }
            if ctx.connectors.is_empty() {
                p { class: "hint",
                    "No wallet configured. Set STATA_PRIVATE_KEY or STATA_WATCH_ADDRESS and restart."
                }
            }
            div { class: "button-row",
                for connector in ctx.connectors.iter().cloned() {
                    {
                        let rpc_url = ctx.config.rpc_url.clone();
                        let name = connector.name();
                        rsx! {
                            button {
                                key: "{name}",
                                class: "btn btn-primary",
                                disabled: connecting,
                                onclick: move |_| start_connect(connector.clone(), rpc_url.clone(), account),
                                "{name}"
                            }
                        }
                    }
                }
            }
            p { class: "hint", "{status.label()}" }
        }
    }
}

/// Mark the account as connecting and run `connector` at root scope, so the
/// attempt settles even if the connect panel unmounts first.
pub fn start_connect(connector: Arc<dyn Connector>, rpc_url: Url, mut account: Signal<AccountState>) {
    account.write().status = ConnectionStatus::Connecting;
    spawn_forever(async move {
        match connector.connect(&rpc_url).await {
            Ok(session) => {
                let mut state = account.write();
                state.session = Some(session);
                state.status = ConnectionStatus::Connected;
            }
            Err(e) => {
                warn!(connector = connector.name(), error = %e, event = "wallet_connect_failed");
                account.write().status = ConnectionStatus::Error(e.to_string());
            }
        }
    });
}

/// Status, connected addresses and chain id, plus the connect error if any.
#[component]
pub fn StatusLine() -> Element {
    let account = use_context::<Signal<AccountState>>();
    let state = account.read().clone();

    let chain_id = state.chain_id().map(|id| id.to_string()).unwrap_or_default();
    let connector = state.session.as_ref().map(|s| s.connector).unwrap_or("none");
    let read_only = state.session.as_ref().is_some_and(|s| !s.can_sign);

    rsx! {
        div { class: "result-card",
            p { class: "label", "status: " span { class: "mono", "{state.status.label()}" } }
            p { class: "label", "addresses: " span { class: "mono", "{state.addresses_json()}" } }
            p { class: "label", "chainId: " span { class: "mono", "{chain_id}" } }
            p { class: "label", "connector: " span { class: "mono", "{connector}" } }
            if read_only {
                p { class: "hint", "Watch-only account: transactions cannot be signed." }
            }
            if let ConnectionStatus::Error(msg) = &state.status {
                p { class: "error-text", "{msg}" }
            }
        }
    }
}

/// Compact account badge for the top bar.
#[component]
pub fn AccountBadge() -> Element {
    let account = use_context::<Signal<AccountState>>();
    let address = account.read().address();

    rsx! {
        if let Some(address) = address {
            span { class: "mono", "{truncate_hex(&address.to_string())}" }
        } else {
            span { class: "hint", "No wallet" }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::address;
    use stata_contracts::BASE_CHAIN_ID;

    use super::*;
    use crate::chain::mock::MockReader;
    use crate::components::testing::{self, Fixture};
    use crate::wallet::mock::MockConnector;

    fn app() -> Element {
        let visible = testing::use_fixture_state();
        rsx! {
            if visible() {
                ConnectOnMount {}
            }
        }
    }

    #[component]
    fn ConnectOnMount() -> Element {
        testing::use_unmount_flag();
        let ctx = use_context::<AppContext>();
        let account = use_context::<Signal<AccountState>>();
        use_effect(move || {
            let connector: Arc<dyn Connector> = Arc::new(MockConnector {
                address: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
                chain_id: BASE_CHAIN_ID,
                delay: Duration::from_millis(300),
            });
            start_connect(connector, ctx.config.rpc_url.clone(), account);
        });
        rsx! {}
    }

    fn status(dom: &VirtualDom) -> ConnectionStatus {
        testing::read::<AccountState>(dom).status
    }

    #[tokio::test]
    async fn connect_settles_after_the_panel_unmounts() {
        let fixture = Fixture::new(Arc::new(MockReader::with_values([0; 5])), Duration::from_secs(1), None);
        let mut dom = testing::launch(app, &fixture);

        testing::pump_until(&mut dom, |dom| status(dom) == ConnectionStatus::Connecting).await;
        testing::hide_child(&dom);
        testing::pump_until(&mut dom, |_| fixture.child_unmounted()).await;
        assert_eq!(status(&dom), ConnectionStatus::Connecting);

        testing::pump_until(&mut dom, |dom| status(dom) == ConnectionStatus::Connected).await;
        let state = testing::read::<AccountState>(&dom);
        assert_eq!(state.address(), Some(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")));
        assert!(state.is_correct_chain());
    }
}
