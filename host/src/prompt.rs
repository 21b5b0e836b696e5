//! One-shot resolution handles for prompt events.
//!
//! A prompt event (login, certificate trust, client-certificate selection)
//! carries a native callback that must be invoked to let the underlying
//! operation continue. [`Responder`] wraps that callback as a shared handle
//! that resolves at most once: the first `resolve` consumes the underlying
//! sender, every later attempt reports [`DriverError::PromptAlreadyResolved`].

use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crosswire_types::DriverError;

/// A cloneable, resolve-at-most-once handle for a pending prompt.
///
/// Cloning shares the same underlying slot, so a prompt forwarded through
/// several streams still resolves exactly once no matter which copy answers
/// first.
pub struct Responder<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Responder<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

impl<T> Responder<T> {
    /// Create a responder and the receiver the native side awaits on.
    #[must_use]
    pub fn new() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                slot: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Resolve the prompt with `value`.
    ///
    /// Errors with [`DriverError::PromptAlreadyResolved`] when the prompt was
    /// resolved before, and [`DriverError::PromptDropped`] when the native
    /// side gave up waiting.
    pub fn resolve(&self, value: T) -> Result<(), DriverError> {
        let sender = {
            let mut slot = self
                .slot
                .lock()
                .map_err(|_| DriverError::PromptDropped)?;
            slot.take().ok_or(DriverError::PromptAlreadyResolved)?
        };
        sender.send(value).map_err(|_| DriverError::PromptDropped)
    }

    /// Whether this prompt has already been answered.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_exactly_once() {
        let (responder, rx) = Responder::new();
        assert!(!responder.is_resolved());

        responder.resolve(7).unwrap();
        assert!(responder.is_resolved());
        assert_eq!(rx.await.unwrap(), 7);

        assert_eq!(
            responder.resolve(8),
            Err(DriverError::PromptAlreadyResolved)
        );
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let (responder, rx) = Responder::new();
        let copy = responder.clone();

        copy.resolve("first").unwrap();
        assert_eq!(
            responder.resolve("second"),
            Err(DriverError::PromptAlreadyResolved)
        );
        assert_eq!(rx.await.unwrap(), "first");
    }

    #[test]
    fn reports_dropped_receiver() {
        let (responder, rx) = Responder::new();
        drop(rx);
        assert_eq!(responder.resolve(1), Err(DriverError::PromptDropped));
    }
}
