pub mod announcement;
pub mod notification;
pub mod sync_state;

pub use announcement::{Announcement, ItemKey};
pub use notification::{Notification, NotificationKind};
pub use sync_state::{SyncPhase, SyncState};
