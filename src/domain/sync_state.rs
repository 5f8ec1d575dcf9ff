use chrono::{DateTime, Utc};

use super::Announcement;

/// Lifecycle phase derived from the sync flags.
///
/// Failures never persist as a phase: they surface as a notification and
/// the state falls back to `Idle` or `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Loading,
    Ready,
}

/// Everything the presentation layer may read about the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    pub items: Vec<Announcement>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub last_update: Option<DateTime<Utc>>,
}

impl SyncState {
    pub fn phase(&self) -> SyncPhase {
        if self.is_loading {
            SyncPhase::Loading
        } else if self.last_update.is_some() {
            SyncPhase::Ready
        } else {
            SyncPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_idle() {
        assert_eq!(SyncState::default().phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_loading_dominates() {
        let state = SyncState {
            is_loading: true,
            last_update: Some(Utc::now()),
            ..Default::default()
        };
        assert_eq!(state.phase(), SyncPhase::Loading);
    }

    #[test]
    fn test_ready_after_load() {
        let state = SyncState {
            last_update: Some(Utc::now()),
            ..Default::default()
        };
        assert_eq!(state.phase(), SyncPhase::Ready);
    }

    #[test]
    fn test_refreshing_does_not_change_phase() {
        let state = SyncState {
            is_refreshing: true,
            ..Default::default()
        };
        assert_eq!(state.phase(), SyncPhase::Idle);
    }
}
