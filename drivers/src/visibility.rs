//! Application-visibility driver. Sink-only: true shows, false hides.

use std::sync::Arc;

use tokio::sync::mpsc;

use crosswire_host::Host;

pub struct VisibilityDriver {
    host: Arc<dyn Host>,
}

impl VisibilityDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    pub fn run(self, mut visibility: mpsc::Receiver<bool>) {
        let host = self.host;
        tokio::spawn(async move {
            while let Some(visible) = visibility.recv().await {
                if visible {
                    host.show();
                } else {
                    host.hide();
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stub_host, wait_for_calls};
    use crosswire_host::stub::HostCall;

    #[tokio::test]
    async fn toggles_show_and_hide() {
        let host = stub_host();
        let (tx, rx) = mpsc::channel(3);
        VisibilityDriver::new(host.clone()).run(rx);

        tx.send(true).await.unwrap();
        tx.send(false).await.unwrap();
        tx.send(true).await.unwrap();

        wait_for_calls(&host, |calls| {
            calls == [HostCall::Show, HostCall::Hide, HostCall::Show]
        })
        .await;
    }
}
