pub mod notification_service;
pub mod poller;
pub mod refresh_coordinator;
pub mod session;
pub mod sync_controller;

pub use notification_service::{ChannelNotifier, Notifier};
pub use poller::{spawn_poller, PollHandle};
pub use refresh_coordinator::{RefreshCoordinator, RefreshOutcome};
pub use session::FeedSession;
pub use sync_controller::{LoadOutcome, SyncController};
