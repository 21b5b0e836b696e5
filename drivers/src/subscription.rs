//! Replaceable batches of sink subscriptions.
//!
//! Drivers that take configuration snapshots do no incremental diffing: when
//! a new snapshot arrives, every task spawned for the previous one is
//! aborted and a fresh batch is spawned from the new snapshot.

use std::future::Future;

use futures_util::future::{AbortHandle, Abortable};

/// The set of sink tasks serving the most recent configuration snapshot.
///
/// Dropping the set aborts whatever is still active.
#[derive(Debug, Default)]
pub struct SinkSet {
    handles: Vec<AbortHandle>,
}

impl SinkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` as part of the active batch.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        tokio::spawn(async move {
            // Aborted tasks resolve with Err(Aborted); nothing to do either way.
            let _ = Abortable::new(task, registration).await;
        });
        self.handles.push(handle);
    }

    /// Abort every task of the current batch. The set is empty afterwards
    /// and ready to receive the next snapshot's tasks.
    pub fn clear(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for SinkSet {
    fn drop(&mut self) {
        self.clear();
    }
}
