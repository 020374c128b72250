//! Repository Layer
//!
//! Data access abstractions and implementations.

mod file_snapshot;
mod http_api;
mod memory_snapshot;
mod traits;

#[cfg(test)]
mod tests;

pub use file_snapshot::FileSnapshotStore;
pub use http_api::HttpApi;
pub use memory_snapshot::MemorySnapshotStore;
pub use traits::{
    AdoptionApi, ParticipationOutcome, RemoteError, SnapshotError, SnapshotStore, ToggleReceipt,
};
