//! Lifecycle driver: launch/quit events out, lifecycle configuration in.
//!
//! The sink carries [`LifecycleConfig`] snapshots. Each snapshot replaces
//! the previous one's gate subscriptions: with `quitting_enabled == false`
//! every before-quit event has its default prevented, with
//! `auto_exit_enabled == false` the same happens to will-quit. A snapshot
//! asking for `Quitting` or `Exiting` additionally triggers the host's quit
//! or exit.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::stream::forward_filtered;
use crate::subscription::SinkSet;
use crosswire_host::{EventGate, Host, HostEvent};
use crosswire_types::{LifecycleConfig, LifecycleState};

pub struct LifecycleDriver {
    host: Arc<dyn Host>,
}

impl LifecycleDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// Start the driver. Source streams are independent of the sink: they
    /// can be subscribed before any configuration arrives.
    #[must_use]
    pub fn run(self, mut config: mpsc::Receiver<LifecycleConfig>) -> LifecycleSource {
        let source = LifecycleSource {
            host: Arc::clone(&self.host),
        };

        let host = self.host;
        tokio::spawn(async move {
            let mut gates = SinkSet::new();
            while let Some(snapshot) = config.recv().await {
                apply(&host, &mut gates, &snapshot);
            }
        });

        source
    }
}

fn apply(host: &Arc<dyn Host>, gates: &mut SinkSet, snapshot: &LifecycleConfig) {
    gates.clear();

    if !snapshot.quitting_enabled {
        gates.spawn(prevent_defaults(host.events(), |event| match event {
            HostEvent::BeforeQuit { gate } => Some(gate),
            _ => None,
        }));
    }
    if !snapshot.auto_exit_enabled {
        gates.spawn(prevent_defaults(host.events(), |event| match event {
            HostEvent::WillQuit { gate } => Some(gate),
            _ => None,
        }));
    }

    match snapshot.state {
        LifecycleState::Started => {}
        LifecycleState::Quitting => {
            tracing::debug!("lifecycle config requested quit");
            host.quit();
        }
        LifecycleState::Exiting => {
            let code = snapshot.exit_code.unwrap_or(0);
            tracing::debug!(code, "lifecycle config requested exit");
            host.exit(code);
        }
    }
}

async fn prevent_defaults(
    mut events: broadcast::Receiver<HostEvent>,
    select_gate: impl Fn(HostEvent) -> Option<EventGate>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(gate) = select_gate(event) {
                    gate.prevent_default();
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Observable side of the lifecycle driver.
pub struct LifecycleSource {
    host: Arc<dyn Host>,
}

impl LifecycleSource {
    #[must_use]
    pub fn will_finish_launching(&self) -> mpsc::Receiver<()> {
        forward_filtered(self.host.events(), |event| {
            matches!(event, HostEvent::WillFinishLaunching).then_some(())
        })
    }

    #[must_use]
    pub fn ready(&self) -> mpsc::Receiver<()> {
        forward_filtered(self.host.events(), |event| {
            matches!(event, HostEvent::Ready).then_some(())
        })
    }

    #[must_use]
    pub fn window_all_closed(&self) -> mpsc::Receiver<()> {
        forward_filtered(self.host.events(), |event| {
            matches!(event, HostEvent::WindowAllClosed).then_some(())
        })
    }

    #[must_use]
    pub fn before_quit(&self) -> mpsc::Receiver<EventGate> {
        forward_filtered(self.host.events(), |event| match event {
            HostEvent::BeforeQuit { gate } => Some(gate),
            _ => None,
        })
    }

    #[must_use]
    pub fn will_quit(&self) -> mpsc::Receiver<EventGate> {
        forward_filtered(self.host.events(), |event| match event {
            HostEvent::WillQuit { gate } => Some(gate),
            _ => None,
        })
    }

    /// Quit events, carrying the exit code the host reported.
    #[must_use]
    pub fn quit(&self) -> mpsc::Receiver<i32> {
        forward_filtered(self.host.events(), |event| match event {
            HostEvent::Quit { exit_code } => Some(exit_code),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settle, stub_host, wait_for_calls};
    use crosswire_host::stub::HostCall;

    fn started() -> LifecycleConfig {
        LifecycleConfig::default()
    }

    #[tokio::test]
    async fn forwards_lifecycle_events() {
        let host = stub_host();
        let (_config_tx, config_rx) = mpsc::channel(1);
        let source = LifecycleDriver::new(host.clone()).run(config_rx);

        let mut ready = source.ready();
        let mut quit = source.quit();

        host.emit(HostEvent::Ready);
        host.emit(HostEvent::Quit { exit_code: 255 });

        assert_eq!(ready.recv().await, Some(()));
        assert_eq!(quit.recv().await, Some(255));
    }

    #[tokio::test]
    async fn prevents_before_quit_when_quitting_disabled() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(1);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                quitting_enabled: false,
                ..started()
            })
            .await
            .unwrap();
        settle().await;

        let gate = EventGate::new();
        host.emit(HostEvent::BeforeQuit { gate: gate.clone() });
        settle().await;

        assert!(gate.is_default_prevented());
    }

    #[tokio::test]
    async fn prevents_will_quit_when_auto_exit_disabled() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(1);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                auto_exit_enabled: false,
                ..started()
            })
            .await
            .unwrap();
        settle().await;

        let gate = EventGate::new();
        host.emit(HostEvent::WillQuit { gate: gate.clone() });
        settle().await;

        assert!(gate.is_default_prevented());
    }

    #[tokio::test]
    async fn reenabling_quitting_replaces_the_gate_subscription() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(2);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                quitting_enabled: false,
                ..started()
            })
            .await
            .unwrap();
        settle().await;
        config_tx.send(started()).await.unwrap();
        settle().await;

        let gate = EventGate::new();
        host.emit(HostEvent::BeforeQuit { gate: gate.clone() });
        settle().await;

        assert!(!gate.is_default_prevented());
    }

    #[tokio::test]
    async fn quitting_state_quits_the_host() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(1);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                state: LifecycleState::Quitting,
                ..started()
            })
            .await
            .unwrap();

        wait_for_calls(&host, |calls| calls.contains(&HostCall::Quit)).await;
    }

    #[tokio::test]
    async fn exiting_without_code_exits_zero() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(1);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                state: LifecycleState::Exiting,
                ..started()
            })
            .await
            .unwrap();

        wait_for_calls(&host, |calls| calls.contains(&HostCall::Exit(0))).await;
    }

    #[tokio::test]
    async fn exiting_uses_the_configured_code() {
        let host = stub_host();
        let (config_tx, config_rx) = mpsc::channel(1);
        let _source = LifecycleDriver::new(host.clone()).run(config_rx);

        config_tx
            .send(LifecycleConfig {
                state: LifecycleState::Exiting,
                exit_code: Some(12),
                ..started()
            })
            .await
            .unwrap();

        wait_for_calls(&host, |calls| calls.contains(&HostCall::Exit(12))).await;
    }
}
