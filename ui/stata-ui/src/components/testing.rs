//! Headless `VirtualDom` harness for component tests.
//!
//! A test supplies a root `fn() -> Element` that calls [`use_fixture_state`]
//! and renders its child under test while the returned switch is on. Turning
//! the switch off with [`hide_child`] unmounts the child the same way a route
//! change does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dioxus::dioxus_core::NoOpMutations;
use dioxus::prelude::*;

use crate::balances::BalanceState;
use crate::chain::mock::MockReader;
use crate::config::AppConfig;
use crate::state::{AccountState, AppContext, ConnectionStatus, WriteState};
use crate::tx_log::TxLog;
use crate::wallet::WalletSession;

const DEADLINE: Duration = Duration::from_secs(5);

/// Seed for the contexts `App` would provide.
#[derive(Clone)]
pub(crate) struct Fixture {
    pub(crate) ctx: AppContext,
    pub(crate) session: Option<WalletSession>,
    unmounted: Arc<AtomicBool>,
}

impl Fixture {
    pub(crate) fn new(
        reader: Arc<MockReader>,
        poll_interval: Duration,
        session: Option<WalletSession>,
    ) -> Self {
        let mut config = AppConfig::from_lookup(|_| None).expect("defaults are valid");
        config.poll_interval = poll_interval;
        let ctx = AppContext { config, reader, connectors: Arc::new(Vec::new()) };
        Self { ctx, session, unmounted: Arc::new(AtomicBool::new(false)) }
    }

    pub(crate) fn child_unmounted(&self) -> bool {
        self.unmounted.load(Ordering::SeqCst)
    }
}

/// Provide the shared state `App` provides. Returns the child's visibility switch.
pub(crate) fn use_fixture_state() -> Signal<bool> {
    let fixture = use_context::<Fixture>();
    use_context_provider(|| fixture.ctx.clone());
    use_context_provider(|| {
        let status = match fixture.session {
            Some(_) => ConnectionStatus::Connected,
            None => ConnectionStatus::Disconnected,
        };
        Signal::new(AccountState { status, session: fixture.session.clone() })
    });
    use_context_provider(|| Signal::new(BalanceState::default()));
    use_context_provider(|| Signal::new(WriteState::default()));
    use_context_provider(|| Signal::new(TxLog::default()));
    use_context_provider(|| Signal::new(true))
}

/// Record the calling component's unmount on the fixture.
pub(crate) fn use_unmount_flag() {
    let fixture = use_context::<Fixture>();
    use_drop(move || fixture.unmounted.store(true, Ordering::SeqCst));
}

pub(crate) fn launch(app: fn() -> Element, fixture: &Fixture) -> VirtualDom {
    let mut dom = VirtualDom::new(app).with_root_context(fixture.clone());
    dom.rebuild(&mut NoOpMutations);
    dom
}

/// Current value of the `Signal<T>` provided by [`use_fixture_state`].
pub(crate) fn read<T: Clone + 'static>(dom: &VirtualDom) -> T {
    dom.in_runtime(|| {
        let signal = ScopeId::APP
            .consume_context::<Signal<T>>()
            .expect("state provided by the fixture");
        let value = signal.peek();
        T::clone(&value)
    })
}

pub(crate) fn hide_child(dom: &VirtualDom) {
    dom.in_runtime(|| {
        let mut visible = ScopeId::APP
            .consume_context::<Signal<bool>>()
            .expect("switch provided by the fixture");
        visible.set(false);
    });
}

/// Drive renders and tasks until `done` holds.
pub(crate) async fn pump_until(dom: &mut VirtualDom, mut done: impl FnMut(&VirtualDom) -> bool) {
    let deadline = tokio::time::Instant::now() + DEADLINE;
    while !done(dom) {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached within {DEADLINE:?}");
        step(dom).await;
    }
}

/// Drive renders and tasks for `period`.
pub(crate) async fn pump_for(dom: &mut VirtualDom, period: Duration) {
    let until = tokio::time::Instant::now() + period;
    while tokio::time::Instant::now() < until {
        step(dom).await;
    }
}

async fn step(dom: &mut VirtualDom) {
    tokio::select! {
        _ = dom.wait_for_work() => {}
        _ = tokio::time::sleep(Duration::from_millis(5)) => {}
    }
    dom.render_immediate(&mut NoOpMutations);
}
