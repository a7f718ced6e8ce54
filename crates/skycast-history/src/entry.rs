//! History entry type, stored-format decoding and rank ordering.

use serde::{Deserialize, Serialize};

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 8;

/// One searched city.
///
/// `last_touched` is milliseconds since epoch and is used only for
/// ordering, never for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub pinned: bool,
    #[serde(alias = "lastTouched")]
    pub last_touched: i64,
}

/// Stored blob formats: current records, or the legacy bare list of
/// name strings. Resolved once at load time, never re-checked per
/// operation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredHistory {
    Records(Vec<HistoryEntry>),
    Names(Vec<String>),
}

impl StoredHistory {
    /// Upgrade to entry form. Legacy names become unpinned entries with
    /// synthesized strictly-descending timestamps so the stored order is
    /// preserved under rank sorting.
    pub(crate) fn into_entries(self, base_ms: i64) -> Vec<HistoryEntry> {
        match self {
            Self::Records(entries) => entries,
            Self::Names(names) => names
                .into_iter()
                .enumerate()
                .map(|(i, name)| HistoryEntry {
                    name,
                    pinned: false,
                    last_touched: base_ms - i as i64,
                })
                .collect(),
        }
    }
}

/// Sort by rank: pinned first, then most recently touched.
pub(crate) fn sort_ranked(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then(b.last_touched.cmp(&a.last_touched))
    });
}
