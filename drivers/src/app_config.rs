//! Application-configuration driver.
//!
//! Sink: [`AppConfig`] snapshots bundling user tasks, the NTLM credential
//! policy, and path registry overrides. Absent fields leave host state
//! untouched. Sources re-expose what was applied: a tasks watch (initially
//! empty), the NTLM flag (initially false), and per-name path watches with
//! the same semantics as the paths driver.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};

use crosswire_host::Host;
use crosswire_types::{AppConfig, PathName, UserTask};

type PathWatches = Arc<Mutex<HashMap<PathName, watch::Sender<PathBuf>>>>;

pub struct AppConfigDriver {
    host: Arc<dyn Host>,
}

impl AppConfigDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn run(self, mut config: mpsc::Receiver<AppConfig>) -> AppConfigSource {
        let (tasks_tx, tasks_rx) = watch::channel(Vec::new());
        let (ntlm_tx, ntlm_rx) = watch::channel(false);
        let watches: PathWatches = Arc::default();

        let source = AppConfigSource {
            host: Arc::clone(&self.host),
            tasks: tasks_rx,
            ntlm: ntlm_rx,
            watches: Arc::clone(&watches),
        };

        let host = self.host;
        tokio::spawn(async move {
            while let Some(snapshot) = config.recv().await {
                apply(&host, &tasks_tx, &ntlm_tx, &watches, snapshot);
            }
        });

        source
    }
}

fn apply(
    host: &Arc<dyn Host>,
    tasks_tx: &watch::Sender<Vec<UserTask>>,
    ntlm_tx: &watch::Sender<bool>,
    watches: &PathWatches,
    snapshot: AppConfig,
) {
    if let Some(tasks) = snapshot.tasks {
        host.set_user_tasks(tasks.clone());
        tasks_tx.send_replace(tasks);
    }

    if let Some(allow) = snapshot.allow_ntlm_for_non_intranet {
        host.allow_ntlm_for_non_intranet(allow);
        ntlm_tx.send_replace(allow);
    }

    for (name, path) in snapshot.paths {
        host.set_path(name, path.clone());
        let Ok(mut map) = watches.lock() else {
            continue;
        };
        let sender = map
            .entry(name)
            .or_insert_with(|| watch::channel(path.clone()).0);
        sender.send_if_modified(|current| {
            if *current == path {
                false
            } else {
                *current = path.clone();
                true
            }
        });
    }
}

/// Observable side of the configuration driver.
pub struct AppConfigSource {
    host: Arc<dyn Host>,
    tasks: watch::Receiver<Vec<UserTask>>,
    ntlm: watch::Receiver<bool>,
    watches: PathWatches,
}

impl AppConfigSource {
    /// The most recently applied task list; empty until a snapshot carries
    /// one.
    #[must_use]
    pub fn tasks(&self) -> watch::Receiver<Vec<UserTask>> {
        self.tasks.clone()
    }

    /// The most recently applied NTLM policy; false until a snapshot
    /// carries one.
    #[must_use]
    pub fn allow_ntlm_for_non_intranet(&self) -> watch::Receiver<bool> {
        self.ntlm.clone()
    }

    /// The application's own path.
    #[must_use]
    pub fn app_path(&self) -> PathBuf {
        self.host.app_path()
    }

    /// Watch one path name, seeded with the host's current value.
    #[must_use]
    pub fn path(&self, name: PathName) -> watch::Receiver<PathBuf> {
        let Ok(mut map) = self.watches.lock() else {
            return watch::channel(self.host.path(name)).1;
        };
        map.entry(name)
            .or_insert_with(|| watch::channel(self.host.path(name)).0)
            .subscribe()
    }
}
