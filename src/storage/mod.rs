pub mod snapshot_store;

pub use snapshot_store::{LoadTicket, SnapshotStore};
