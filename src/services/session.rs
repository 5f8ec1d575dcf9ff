use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinError, JoinSet};

use crate::domain::SyncState;
use crate::services::poller::{spawn_poller, PollHandle};
use crate::services::refresh_coordinator::{RefreshCoordinator, RefreshOutcome};
use crate::services::sync_controller::SyncController;

/// A running view of the feed: initial load, periodic polling and manual
/// refreshes, all torn down together by [`FeedSession::shutdown`].
pub struct FeedSession {
    controller: SyncController,
    refresh: RefreshCoordinator,
    poller: Option<PollHandle>,
    tasks: JoinSet<()>,
}

impl FeedSession {
    /// Kick off the initial (silent) load and arm the poller.
    pub fn start(
        controller: SyncController,
        refresh_delay: Duration,
        poll_interval: Duration,
    ) -> Self {
        let refresh = RefreshCoordinator::new(controller.clone(), refresh_delay);

        let mut tasks = JoinSet::new();
        let initial = controller.load_snapshot(false);
        tasks.spawn(async move {
            initial.await;
        });

        let poller = spawn_poller(controller.clone(), poll_interval);
        info!("Session started, polling every {:?}", poll_interval);

        Self {
            controller,
            refresh,
            poller: Some(poller),
            tasks,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.controller.subscribe()
    }

    pub fn state(&self) -> SyncState {
        self.controller.state()
    }

    /// Reload on demand, with a success notification.
    pub fn reload(&mut self) {
        self.reap_finished();
        let load = self.controller.load_snapshot(true);
        self.tasks.spawn(async move {
            load.await;
        });
    }

    /// Start a manual refresh. Ignored (returns `false`) while a refresh
    /// command is still outstanding, like a disabled refresh button.
    pub fn request_refresh(&mut self) -> bool {
        if self.controller.state().is_refreshing {
            debug!("Refresh already in progress, ignoring request");
            return false;
        }

        self.reap_finished();
        let refresh = self.refresh.request_refresh();
        self.tasks.spawn(async move {
            if let RefreshOutcome::Scheduled(reload) = refresh.await {
                // Aborting this task must also abort the delayed reload
                let _guard = AbortOnDrop(reload.abort_handle());
                if let Err(e) = reload.await {
                    report_reload_failure(&e);
                }
            }
        });
        true
    }

    /// Disarm the poller and cancel pending loads and refreshes. Late
    /// completions of cancelled work never reach the snapshot.
    pub async fn shutdown(mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
        self.tasks.shutdown().await;
        info!("Session stopped");
    }

    fn reap_finished(&mut self) {
        while self.tasks.try_join_next().is_some() {}
    }
}

/// Log a delayed reload that died. Returns `false` for plain cancellation.
fn report_reload_failure(err: &JoinError) -> bool {
    if err.is_cancelled() {
        return false;
    }
    error!("Delayed reload failed: {}", err);
    true
}

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
