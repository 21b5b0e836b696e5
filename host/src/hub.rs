//! Broadcast hub host implementations emit events through.

use tokio::sync::broadcast;

use crate::event::HostEvent;

/// Capacity of the event broadcast channel. Drivers drain their receivers
/// promptly; a slow one sees a lag error and skips ahead rather than
/// stalling the host.
const EVENT_HUB_CAPACITY: usize = 128;

/// Multi-consumer fan-out for [`HostEvent`]s.
///
/// The hub replaces the native event emitter: each driver subscribes
/// independently, every emission reaches every live subscriber.
#[derive(Debug)]
pub struct EventHub {
    tx: broadcast::Sender<HostEvent>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_HUB_CAPACITY);
        Self { tx }
    }

    /// A fresh receiver positioned at the next emission.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all current subscribers. Returns the number of
    /// subscribers that received it; an event emitted with no subscribers is
    /// simply dropped, like a native emitter with no listeners.
    pub fn emit(&self, event: HostEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
