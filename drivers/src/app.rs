//! Main application driver.
//!
//! Wraps the host surface the other drivers leave uncovered: the
//! single-instance lock, the app user-model id, Chromium command-line
//! parameters, the dock, and terminal error/exit handling. The sink carries
//! [`AppSinks`] snapshots bundling optional channels; every new snapshot
//! aborts the previous snapshot's tasks and subscribes the new channels
//! from scratch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc, watch};

use crate::stream::forward_filtered;
use crate::subscription::SinkSet;
use crosswire_host::{Host, HostEvent};
use crosswire_types::{
    BounceId, BounceKind, ChromiumParams, DockMenu, HostQuitError, NativeBounceId,
};

/// A request to start bouncing the dock icon under a caller-chosen id.
#[derive(Debug, Clone, Copy)]
pub struct BounceRequest {
    pub id: BounceId,
    /// Defaults to informational when constructed via [`BounceRequest::informational`].
    pub kind: BounceKind,
}

impl BounceRequest {
    #[must_use]
    pub fn informational(id: BounceId) -> Self {
        Self {
            id,
            kind: BounceKind::Informational,
        }
    }

    #[must_use]
    pub fn critical(id: BounceId) -> Self {
        Self {
            id,
            kind: BounceKind::Critical,
        }
    }
}

/// Dock-related sink channels of one [`AppSinks`] snapshot.
#[derive(Debug, Default)]
pub struct DockSinks {
    pub bounce_start: Option<mpsc::Receiver<BounceRequest>>,
    pub bounce_cancel: Option<mpsc::Receiver<BounceId>>,
    pub badge_label: Option<mpsc::Receiver<String>>,
    pub visibility: Option<mpsc::Receiver<bool>>,
    pub menu: Option<mpsc::Receiver<DockMenu>>,
    pub icon: Option<mpsc::Receiver<PathBuf>>,
}

/// One sink snapshot for the app driver. Channels left `None` simply have
/// no subscription in that configuration.
#[derive(Debug, Default)]
pub struct AppSinks {
    pub app_user_model_id: Option<mpsc::Receiver<String>>,
    pub chromium_params: Option<mpsc::Receiver<ChromiumParams>>,
    /// Application-level failures; each one exits the host with the error's
    /// code, or 1 when it carries none.
    pub errors: Option<mpsc::Receiver<HostQuitError>>,
    /// Exit requests; `None` items exit with code 0.
    pub exit: Option<mpsc::Receiver<Option<i32>>>,
    pub dock: Option<DockSinks>,
}

/// Payload of a launch attempt by a second process instance.
#[derive(Debug, Clone)]
pub struct SecondInstance {
    pub argv: Vec<String>,
    pub cwd: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppDriverOptions {
    /// Claim the single-instance lock on startup and quit when another
    /// instance already holds it.
    pub single_instance: bool,
}

pub struct AppDriver {
    host: Arc<dyn Host>,
    options: AppDriverOptions,
}

impl AppDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            options: AppDriverOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(host: Arc<dyn Host>, options: AppDriverOptions) -> Self {
        Self { host, options }
    }

    #[must_use]
    pub fn run(self, mut sinks: mpsc::Receiver<AppSinks>) -> AppSource {
        let Self { host, options } = self;

        if options.single_instance && host.make_single_instance() {
            tracing::debug!("another instance holds the lock, quitting");
            host.quit();
        }

        let badge = Arc::new(watch::channel(host.dock().badge()).0);

        let source = AppSource {
            host: Arc::clone(&host),
            badge: Arc::clone(&badge),
            single_instance: options.single_instance,
        };

        tokio::spawn(async move {
            let mut active = SinkSet::new();
            while let Some(snapshot) = sinks.recv().await {
                active.clear();
                subscribe_snapshot(&host, &badge, &mut active, snapshot);
            }
        });

        source
    }
}

fn subscribe_snapshot(
    host: &Arc<dyn Host>,
    badge: &Arc<watch::Sender<String>>,
    active: &mut SinkSet,
    snapshot: AppSinks,
) {
    if let Some(mut ids) = snapshot.app_user_model_id {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(id) = ids.recv().await {
                host.set_app_user_model_id(&id);
            }
        });
    }

    if let Some(mut params) = snapshot.chromium_params {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(batch) = params.recv().await {
                for switch in &batch.switches {
                    host.append_switch(&switch.name, switch.value.as_deref());
                }
                for arg in &batch.args {
                    host.append_argument(arg);
                }
            }
        });
    }

    if let Some(mut errors) = snapshot.errors {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(err) = errors.recv().await {
                tracing::error!(%err, "error sink item, exiting");
                host.exit(err.exit_code());
            }
        });
    }

    if let Some(mut exits) = snapshot.exit {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(code) = exits.recv().await {
                host.exit(code.unwrap_or(0));
            }
        });
    }

    if let Some(dock) = snapshot.dock {
        subscribe_dock(host, badge, active, dock);
    }
}

fn subscribe_dock(
    host: &Arc<dyn Host>,
    badge: &Arc<watch::Sender<String>>,
    active: &mut SinkSet,
    dock: DockSinks,
) {
    // Bounce bookkeeping lives exactly as long as this snapshot's
    // subscriptions: caller id to the native id the host handed back.
    let bounces: Arc<Mutex<HashMap<BounceId, NativeBounceId>>> = Arc::default();

    if let Some(mut starts) = dock.bounce_start {
        let host = Arc::clone(host);
        let bounces = Arc::clone(&bounces);
        active.spawn(async move {
            while let Some(request) = starts.recv().await {
                let native = host.dock().bounce(request.kind);
                if let Ok(mut map) = bounces.lock() {
                    map.insert(request.id, native);
                }
            }
        });
    }

    if let Some(mut cancels) = dock.bounce_cancel {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(id) = cancels.recv().await {
                let native = bounces.lock().ok().and_then(|mut map| map.remove(&id));
                match native {
                    Some(native) => host.dock().cancel_bounce(native),
                    // Unknown or already-cancelled id: nothing to do.
                    None => tracing::debug!(%id, "cancel for unknown bounce id"),
                }
            }
        });
    }

    if let Some(mut labels) = dock.badge_label {
        let host = Arc::clone(host);
        let badge = Arc::clone(badge);
        active.spawn(async move {
            while let Some(label) = labels.recv().await {
                host.dock().set_badge(&label);
                badge.send_replace(label);
            }
        });
    }

    if let Some(mut visibility) = dock.visibility {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(visible) = visibility.recv().await {
                if visible {
                    host.dock().show();
                } else {
                    host.dock().hide();
                }
            }
        });
    }

    if let Some(mut menus) = dock.menu {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(menu) = menus.recv().await {
                host.dock().set_menu(menu);
            }
        });
    }

    if let Some(mut icons) = dock.icon {
        let host = Arc::clone(host);
        active.spawn(async move {
            while let Some(icon) = icons.recv().await {
                host.dock().set_icon(icon);
            }
        });
    }
}

/// Observable side of the app driver.
pub struct AppSource {
    host: Arc<dyn Host>,
    badge: Arc<watch::Sender<String>>,
    single_instance: bool,
}

impl AppSource {
    /// Raw subscription to the host event stream.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<HostEvent> {
        self.host.events()
    }

    /// Launch attempts by other process instances. Ends immediately when the
    /// driver was not configured as single-instance.
    #[must_use]
    pub fn second_instance(&self) -> mpsc::Receiver<SecondInstance> {
        if !self.single_instance {
            let (_, rx) = mpsc::channel(1);
            return rx;
        }
        forward_filtered(self.host.events(), |event| match event {
            HostEvent::SecondInstance { argv, cwd } => Some(SecondInstance { argv, cwd }),
            _ => None,
        })
    }

    /// The dock badge label: starts at the host's current badge and follows
    /// every label applied through the active snapshot's badge sink.
    #[must_use]
    pub fn badge_label(&self) -> watch::Receiver<String> {
        self.badge.subscribe()
    }

    #[must_use]
    pub fn is_aero_glass_enabled(&self) -> bool {
        self.host.is_aero_glass_enabled()
    }
}
