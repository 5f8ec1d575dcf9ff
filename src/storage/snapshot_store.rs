use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::watch;

use crate::domain::{Announcement, SyncState};

/// Bookkeeping for overlapping loads.
///
/// Every load gets an epoch when it starts. A completed load is only applied
/// if its epoch is newer than the snapshot currently shown, so a slow early
/// request cannot overwrite the result of a later one.
#[derive(Debug, Default)]
struct LoadFence {
    issued: u64,
    applied: u64,
    in_flight: usize,
}

/// Single-writer home of the [`SyncState`].
///
/// Writers go through [`SnapshotStore::begin_load`] and
/// [`SnapshotStore::set_refreshing`]; readers get a `watch` subscription and
/// never see a partially applied update.
#[derive(Debug)]
pub struct SnapshotStore {
    state: watch::Sender<SyncState>,
    fence: Mutex<LoadFence>,
}

impl SnapshotStore {
    pub fn new() -> Arc<Self> {
        let (state, _) = watch::channel(SyncState::default());
        Arc::new(Self {
            state,
            fence: Mutex::new(LoadFence::default()),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn current(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn set_refreshing(&self, refreshing: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.is_refreshing != refreshing;
            state.is_refreshing = refreshing;
            changed
        });
    }

    /// Mark a load as outstanding and hand out its ticket.
    pub fn begin_load(self: &Arc<Self>) -> LoadTicket {
        let mut fence = self.lock_fence();
        fence.issued += 1;
        fence.in_flight += 1;
        let epoch = fence.issued;

        self.state.send_modify(|state| state.is_loading = true);

        LoadTicket {
            store: Arc::clone(self),
            epoch,
            settled: false,
        }
    }

    fn settle(&self, epoch: u64, snapshot: Option<(Vec<Announcement>, DateTime<Utc>)>) -> bool {
        let mut fence = self.lock_fence();
        fence.in_flight = fence.in_flight.saturating_sub(1);
        let still_loading = fence.in_flight > 0;

        let apply = match snapshot {
            Some(_) if epoch <= fence.applied => {
                debug!(
                    "Discarding snapshot from load #{} (already showing #{})",
                    epoch, fence.applied
                );
                false
            }
            Some(_) => {
                fence.applied = epoch;
                true
            }
            None => false,
        };

        self.state.send_modify(|state| {
            if apply {
                if let Some((items, at)) = snapshot {
                    state.items = items;
                    state.last_update = Some(at);
                }
            }
            state.is_loading = still_loading;
        });

        apply
    }

    fn lock_fence(&self) -> MutexGuard<'_, LoadFence> {
        self.fence.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Outstanding load. Dropping it unsettled (e.g. an aborted task) releases
/// the loading flag without touching the snapshot.
#[derive(Debug)]
pub struct LoadTicket {
    store: Arc<SnapshotStore>,
    epoch: u64,
    settled: bool,
}

impl LoadTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replace the snapshot. Returns `false` when a newer load has already
    /// been applied and this result was discarded.
    pub fn apply(mut self, items: Vec<Announcement>, at: DateTime<Utc>) -> bool {
        self.settled = true;
        self.store.settle(self.epoch, Some((items, at)))
    }

    /// Finish without changing the snapshot.
    pub fn fail(mut self) {
        self.settled = true;
        self.store.settle(self.epoch, None);
    }
}

impl Drop for LoadTicket {
    fn drop(&mut self) {
        if !self.settled {
            self.store.settle(self.epoch, None);
        }
    }
}
