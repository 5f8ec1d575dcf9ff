use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::services::sync_controller::SyncController;

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic reload timer. Aborted on [`PollHandle::cancel`] or drop.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Arm the periodic reload. The first tick fires one full interval from now;
/// the session start performs its own initial load.
pub fn spawn_poller(controller: SyncController, every: Duration) -> PollHandle {
    let every = every.max(MIN_POLL_INTERVAL);

    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            debug!("Poll tick, reloading announcements");
            controller.load_snapshot(true).await;
        }
    });

    PollHandle { task }
}
