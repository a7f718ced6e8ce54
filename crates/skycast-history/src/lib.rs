//! Search history for SkyCast
//!
//! Owns the persisted list of searched cities: normalization, validation,
//! CRUD with merge-on-rename, pin-aware ordering and capacity eviction.
//! The only I/O is an injected load/save blob.

pub mod blob;
pub mod entry;
pub mod name;
pub mod store;

pub use blob::{FileBlob, HistoryBlob, MemoryBlob};
pub use entry::{HistoryEntry, HISTORY_CAPACITY};
pub use name::{normalize, validate, NameError};
pub use store::{HistoryError, HistoryStore};
