//! Path registry driver.
//!
//! Sink: [`PathChange`] items; the host setter runs first, then the new
//! value is republished. Source: one watch per path name, seeded with the
//! host's current value at subscription time. Re-publishing a value equal
//! to the current one is suppressed.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};

use crosswire_host::Host;
use crosswire_types::{PathChange, PathName};

type PathWatches = Arc<Mutex<HashMap<PathName, watch::Sender<PathBuf>>>>;

pub struct PathsDriver {
    host: Arc<dyn Host>,
}

impl PathsDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    #[must_use]
    pub fn run(self, mut changes: mpsc::Receiver<PathChange>) -> PathsSource {
        let watches: PathWatches = Arc::default();
        let source = PathsSource {
            host: Arc::clone(&self.host),
            watches: Arc::clone(&watches),
        };

        let host = self.host;
        tokio::spawn(async move {
            while let Some(PathChange { name, path }) = changes.recv().await {
                host.set_path(name, path.clone());
                tracing::debug!(name = %name, path = %path.display(), "path updated");
                publish(&watches, name, path);
            }
        });

        source
    }
}

fn publish(watches: &PathWatches, name: PathName, path: PathBuf) {
    let Ok(mut map) = watches.lock() else {
        return;
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

/// Observable side of the path driver.
pub struct PathsSource {
    host: Arc<dyn Host>,
    watches: PathWatches,
}

impl PathsSource {
    /// The application's own path. Fixed for the process lifetime.
    #[must_use]
    pub fn app(&self) -> PathBuf {
        self.host.app_path()
    }

    /// Watch one path name. The receiver starts at the host's current value
    /// and changes only when a sink write for the same name lands.
    #[must_use]
    pub fn watch(&self, name: PathName) -> watch::Receiver<PathBuf> {
        let Ok(mut map) = self.watches.lock() else {
            // Lock poisoning means a panicked driver task; hand back a
            // receiver frozen at the host's current value.
            return watch::channel(self.host.path(name)).1;
        };
        map.entry(name)
            .or_insert_with(|| watch::channel(self.host.path(name)).0)
            .subscribe()
    }
}
