pub mod snapshot;

pub use snapshot::{snapshot_for, summarize, RoomSnapshot, RoomSummary};
