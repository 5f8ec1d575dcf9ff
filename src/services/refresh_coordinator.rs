use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::task::JoinHandle;

use crate::domain::Notification;
use crate::errors::NewsError;
use crate::services::sync_controller::{LoadOutcome, SyncController};
use crate::storage::SnapshotStore;

#[derive(Debug)]
pub enum RefreshOutcome {
    /// Command acknowledged; the reload runs once the delay has passed
    Scheduled(JoinHandle<LoadOutcome>),
    Failed(NewsError),
}

/// Two-phase manual refresh: ask the backend to regenerate, wait, reload.
///
/// The backend regenerates asynchronously after acknowledging the command,
/// so a reload issued immediately would usually see the old data. The fixed
/// delay is a best-effort wait, not a completion signal.
#[derive(Clone)]
pub struct RefreshCoordinator {
    controller: SyncController,
    delay: Duration,
}

impl RefreshCoordinator {
    pub fn new(controller: SyncController, delay: Duration) -> Self {
        Self { controller, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Send the regeneration command and schedule the follow-up reload.
    ///
    /// The refreshing flag is raised immediately and covers only the command
    /// round-trip. Concurrent requests are not rejected here.
    pub fn request_refresh(&self) -> impl Future<Output = RefreshOutcome> + Send + 'static {
        let flag = RefreshingFlag::raise(self.controller.store());
        let controller = self.controller.clone();
        let delay = self.delay;

        async move {
            let result = controller.source().trigger_refresh().await;
            drop(flag);

            match result {
                Ok(()) => {
                    info!("Refresh acknowledged, reloading in {:?}", delay);
                    let deadline = tokio::time::Instant::now() + delay;
                    let reload = tokio::spawn(async move {
                        tokio::time::sleep_until(deadline).await;
                        controller.load_snapshot(true).await
                    });
                    RefreshOutcome::Scheduled(reload)
                }
                Err(e) => {
                    error!("Error refreshing news: {}", e);
                    controller.notifier().notify(Notification::refresh_failed());
                    RefreshOutcome::Failed(e)
                }
            }
        }
    }
}

/// Holds `is_refreshing` up until dropped, including when the command
/// future is cancelled.
struct RefreshingFlag(Arc<SnapshotStore>);

impl RefreshingFlag {
    fn raise(store: &Arc<SnapshotStore>) -> Self {
        store.set_refreshing(true);
        Self(Arc::clone(store))
    }
}

impl Drop for RefreshingFlag {
    fn drop(&mut self) {
        self.0.set_refreshing(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Announcement;
    use crate::services::notification_service::{ChannelNotifier, MockNotifier};
    use crate::sources::traits::MockNewsSource;
    use std::sync::Mutex;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_secs(2);

    fn recording_source(calls: Arc<Mutex<Vec<&'static str>>>, refresh_ok: bool) -> MockNewsSource {
        let mut source = MockNewsSource::new();
        let refresh_calls = Arc::clone(&calls);
        source.expect_trigger_refresh().returning(move || {
            refresh_calls.lock().unwrap().push("refresh");
            if refresh_ok {
                Ok(())
            } else {
                Err(NewsError::Status {
                    endpoint: "/api/news/refresh".to_string(),
                    status: 500,
                })
            }
        });
        source.expect_fetch_news().returning(move || {
            calls.lock().unwrap().push("fetch");
            Ok(vec![Announcement::new("HDFCBANK", "HDFC Bank", "Results")])
        });
        source
    }

    #[tokio::test(start_paused = true)]
    async fn test_command_then_delayed_reload() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (notifier, mut rx) = ChannelNotifier::new();
        let controller = SyncController::new(
            Arc::new(recording_source(Arc::clone(&calls), true)),
            Arc::new(notifier),
        );
        let coordinator = RefreshCoordinator::new(controller.clone(), DELAY);
        let started = Instant::now();

        let reload = match coordinator.request_refresh().await {
            RefreshOutcome::Scheduled(reload) => reload,
            RefreshOutcome::Failed(e) => panic!("refresh failed: {}", e),
        };
        assert_eq!(*calls.lock().unwrap(), vec!["refresh"]);
        assert!(!controller.state().is_refreshing);

        tokio::time::advance(DELAY - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(*calls.lock().unwrap(), vec!["refresh"]);

        let outcome = reload.await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Applied(1)));
        assert!(started.elapsed() >= DELAY);
        assert_eq!(*calls.lock().unwrap(), vec!["refresh", "fetch"]);
        assert_eq!(rx.try_recv().unwrap(), Notification::news_updated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_command_skips_reload() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.is_error() && n.message == "Failed to refresh news")
            .times(1)
            .return_const(());
        let controller = SyncController::new(
            Arc::new(recording_source(Arc::clone(&calls), false)),
            Arc::new(notifier),
        );
        let coordinator = RefreshCoordinator::new(controller.clone(), DELAY);

        let outcome = coordinator.request_refresh().await;
        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert!(!controller.state().is_refreshing);

        tokio::time::sleep(DELAY * 5).await;
        assert_eq!(*calls.lock().unwrap(), vec!["refresh"]);
        assert!(controller.state().last_update.is_none());
    }

    #[tokio::test]
    async fn test_refreshing_flag_covers_command_only() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (notifier, _rx) = ChannelNotifier::new();
        let controller = SyncController::new(
            Arc::new(recording_source(calls, true)),
            Arc::new(notifier),
        );
        let coordinator = RefreshCoordinator::new(controller.clone(), Duration::from_millis(10));

        let pending = coordinator.request_refresh();
        assert!(controller.state().is_refreshing);
        assert!(!controller.state().is_loading);

        let outcome = pending.await;
        assert!(!controller.state().is_refreshing);

        if let RefreshOutcome::Scheduled(reload) = outcome {
            reload.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_dropped_request_clears_flag() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let (notifier, _rx) = ChannelNotifier::new();
        let controller = SyncController::new(
            Arc::new(recording_source(Arc::clone(&calls), true)),
            Arc::new(notifier),
        );
        let coordinator = RefreshCoordinator::new(controller.clone(), DELAY);

        let pending = coordinator.request_refresh();
        assert!(controller.state().is_refreshing);
        drop(pending);

        assert!(!controller.state().is_refreshing);
        assert!(calls.lock().unwrap().is_empty());
    }
}
