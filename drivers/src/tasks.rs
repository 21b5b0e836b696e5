//! User-tasks driver. Sink-only: every item replaces the platform task
//! list.

use std::sync::Arc;

use tokio::sync::mpsc;

use crosswire_host::Host;
use crosswire_types::UserTask;

pub struct TasksDriver {
    host: Arc<dyn Host>,
}

impl TasksDriver {
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self { host }
    }

    pub fn run(self, mut tasks: mpsc::Receiver<Vec<UserTask>>) {
        let host = self.host;
        tokio::spawn(async move {
            while let Some(list) = tasks.recv().await {
                host.set_user_tasks(list);
            }
        });
    }
}
