//! Recent-documents driver. Sink-only.

use std::sync::Arc;

use tokio::sync::mpsc;

use crosswire_host::Host;
use crosswire_types::RecentDocsOp;

pub struct RecentDocsDriver {
    host: Arc<dyn Host>,
}

impl RecentDocsDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    /// Apply every operation from the sink. Clearing happens before adding,
    /// so one op can reset the list to a single document.
    pub fn run(self, mut ops: mpsc::Receiver<RecentDocsOp>) {
        let host = self.host;
        tokio::spawn(async move {
            while let Some(op) = ops.recv().await {
                if op.clear {
                    host.clear_recent_documents();
                }
                if let Some(path) = op.add {
                    host.add_recent_document(path);
                }
            }
        });
    }
}
