//! Persistence - snapshot capture and storage

mod snapshot;
mod snapshot_store;

pub use snapshot::GameSnapshot;
pub use snapshot_store::SnapshotStore;
