//! Shared helpers for driver tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::yield_now;
use tokio::time::timeout;

use crosswire_host::stub::{HostCall, StubHost};

pub(crate) fn stub_host() -> Arc<StubHost> {
    Arc::new(StubHost::new())
}

/// Wait until the stub's call log satisfies `pred`, yielding to let driver
/// tasks run. Panics after one second.
pub(crate) async fn wait_for_calls(host: &StubHost, pred: impl Fn(&[HostCall]) -> bool) {
    timeout(Duration::from_secs(1), async {
        loop {
            if pred(&host.calls()) {
                return;
            }
            yield_now().await;
        }
    })
    .await
    .expect("host call log never reached the expected state");
}

/// Yield a few scheduler turns so spawned driver tasks settle, without
/// asserting anything. Used before negative assertions ("no call happened").
pub(crate) async fn settle() {
    for _ in 0..16 {
        yield_now().await;
    }
}
