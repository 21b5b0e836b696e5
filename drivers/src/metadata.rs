//! Application-metadata driver. Source-only: publishes one snapshot of the
//! host's name, version and locale.

use std::sync::Arc;

use tokio::sync::mpsc;

use crosswire_host::Host;
use crosswire_types::AppMetadata;

pub struct MetadataDriver {
    host: Arc<dyn Host>,
}

impl MetadataDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// A stream yielding exactly one metadata snapshot, taken now.
    #[must_use]
    pub fn run(self) -> mpsc::Receiver<AppMetadata> {
        let (tx, rx) = mpsc::channel(1);
        let snapshot = AppMetadata {
            name: self.host.name(),
            version: self.host.version(),
            locale: self.host.locale(),
        };
        // Capacity 1 on a fresh channel: this cannot fail.
        let _ = tx.try_send(snapshot);
        rx
    }
}
