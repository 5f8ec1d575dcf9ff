use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info};
use tokio::sync::watch;

use crate::domain::{Notification, SyncState};
use crate::errors::NewsError;
use crate::services::notification_service::Notifier;
use crate::sources::NewsSource;
use crate::storage::SnapshotStore;

/// Result of one `load_snapshot` call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Snapshot replaced with this many items
    Applied(usize),
    /// Fetch succeeded but a newer load had already been applied
    Superseded,
    Failed(NewsError),
}

impl LoadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }
}

/// Loads snapshots from the news source into the [`SnapshotStore`].
#[derive(Clone)]
pub struct SyncController {
    source: Arc<dyn NewsSource>,
    store: Arc<SnapshotStore>,
    notifier: Arc<dyn Notifier>,
}

impl SyncController {
    pub fn new(source: Arc<dyn NewsSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            store: SnapshotStore::new(),
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> SyncState {
        self.store.current()
    }

    pub(crate) fn source(&self) -> &Arc<dyn NewsSource> {
        &self.source
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Fetch the full list and replace the snapshot.
    ///
    /// The loading flag is raised when this is called, not when the returned
    /// future is first polled. Failures always notify; successes only when
    /// `notify_on_success` is set.
    pub fn load_snapshot(
        &self,
        notify_on_success: bool,
    ) -> impl Future<Output = LoadOutcome> + Send + 'static {
        let ticket = self.store.begin_load();
        let source = Arc::clone(&self.source);
        let notifier = Arc::clone(&self.notifier);

        async move {
            let epoch = ticket.epoch();

            match source.fetch_news().await {
                Ok(items) => {
                    let count = items.len();
                    if !ticket.apply(items, Utc::now()) {
                        debug!("Load #{} superseded by a newer snapshot", epoch);
                        return LoadOutcome::Superseded;
                    }

                    info!("Loaded {} announcements (load #{})", count, epoch);
                    if notify_on_success {
                        notifier.notify(Notification::news_updated());
                    }
                    LoadOutcome::Applied(count)
                }
                Err(e) => {
                    error!("Error fetching news: {}", e);
                    ticket.fail();
                    notifier.notify(Notification::fetch_failed());
                    LoadOutcome::Failed(e)
                }
            }
        }
    }
}
