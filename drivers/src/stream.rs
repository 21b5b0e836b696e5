//! Broadcast-to-typed-channel forwarding shared by the source side of every
//! driver.

use tokio::sync::{broadcast, mpsc};

use crosswire_host::HostEvent;

/// Capacity of the per-source channels handed to consumers.
const SOURCE_CHANNEL_CAPACITY: usize = 64;

/// Subscribe to a host event stream and forward the items `filter` keeps
/// into a typed channel.
///
/// The forwarding task ends when the consumer drops the receiver or the
/// host side closes. A lagging subscription logs and skips ahead; host
/// events are fire-and-forget, there is no replay.
pub(crate) fn forward_filtered<T, F>(
    mut events: broadcast::Receiver<HostEvent>,
    mut filter: F,
) -> mpsc::Receiver<T>
where
    T: Send + 'static,
    F: FnMut(HostEvent) -> Option<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(item) = filter(event) {
                        if tx.send(item).await.is_err() {
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "source fell behind the host event stream");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
    rx
}
