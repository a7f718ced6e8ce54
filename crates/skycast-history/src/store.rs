//! The history store: CRUD with merge semantics over the persisted list.
//!
//! Every operation runs to completion on `&mut self`: read state, mutate,
//! re-sort, rewrite the whole list through the blob, return the resulting
//! snapshot. Concurrent writers in other processes are unguarded; the last
//! writer wins.

use thiserror::Error;

use crate::blob::HistoryBlob;
use crate::entry::{sort_ranked, HistoryEntry, StoredHistory, HISTORY_CAPACITY};
use crate::name::{normalize, validate, NameError};

/// Errors from store operations. Not-found is never an error: entries may
/// have been removed elsewhere without the current action being wrong.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Millisecond clock that never repeats a stamp, so `last_touched` values
/// are distinct and the sort tie-break is never exercised.
#[derive(Debug, Default)]
struct MonotonicClock {
    last: i64,
}

impl MonotonicClock {
    fn now_ms(&mut self) -> i64 {
        let wall = chrono::Utc::now().timestamp_millis();
        self.last = wall.max(self.last + 1);
        self.last
    }
}

/// The persisted search-history list and its operations.
pub struct HistoryStore<B: HistoryBlob> {
    blob: B,
    entries: Vec<HistoryEntry>,
    clock: MonotonicClock,
}

impl<B: HistoryBlob> HistoryStore<B> {
    /// Load the store from the blob. Malformed or missing payloads start
    /// an empty history rather than failing; legacy bare-name payloads are
    /// upgraded in memory and only written back on the next real mutation.
    pub fn open(blob: B) -> Self {
        let mut clock = MonotonicClock::default();
        let entries = match blob.load() {
            Ok(Some(payload)) => match serde_json::from_str::<StoredHistory>(&payload) {
                Ok(stored) => {
                    let mut entries = stored.into_entries(clock.now_ms());
                    sort_ranked(&mut entries);
                    entries
                }
                Err(e) => {
                    tracing::warn!("Discarding malformed history payload: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load history, starting empty: {}", e);
                Vec::new()
            }
        };

        // New stamps must outrank whatever was loaded, even across clock skew.
        clock.last = entries
            .iter()
            .map(|e| e.last_touched)
            .max()
            .unwrap_or(0)
            .max(clock.last);

        Self {
            blob,
            entries,
            clock,
        }
    }

    /// Current snapshot, ranked pinned-first then most-recent.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Record a search. An existing entry (case-insensitive) adopts the new
    /// casing and a fresh timestamp, keeping its pin; otherwise a new
    /// unpinned entry is added. The list is then ranked and truncated to
    /// the eight highest-ranked entries.
    pub fn upsert(&mut self, raw: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let name = normalize(raw);
        validate(&name)?;
        let now = self.clock.now_ms();

        match self.find(&name) {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.name = name;
                entry.last_touched = now;
            }
            None => self.entries.push(HistoryEntry {
                name,
                pinned: false,
                last_touched: now,
            }),
        }

        sort_ranked(&mut self.entries);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()?;
        Ok(self.entries.clone())
    }

    /// Remove the case-insensitively matching entry; no-op when absent.
    pub fn remove(&mut self, name: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        if let Some(i) = self.find(&normalize(name)) {
            let removed = self.entries.remove(i);
            tracing::debug!("Removed history entry: {}", removed.name);
            self.persist()?;
        }
        Ok(self.entries.clone())
    }

    /// Empty the list.
    pub fn clear(&mut self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.entries.clear();
        self.persist()?;
        Ok(self.entries.clone())
    }

    /// Flip the pin on the matching entry and refresh its timestamp;
    /// no-op when absent.
    pub fn toggle_pin(&mut self, name: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        if let Some(i) = self.find(&normalize(name)) {
            let now = self.clock.now_ms();
            let entry = &mut self.entries[i];
            entry.pinned = !entry.pinned;
            entry.last_touched = now;
            sort_ranked(&mut self.entries);
            self.persist()?;
        }
        Ok(self.entries.clone())
    }

    /// Rename an entry. When the normalized target name already belongs to
    /// another entry, the two collapse into one: the existing entry keeps
    /// its casing, is pinned if either side was pinned, and takes a fresh
    /// timestamp. Validation failure aborts with no state change; a missing
    /// source is a no-op.
    pub fn rename(&mut self, old: &str, new_raw: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let Some(source) = self.find(&normalize(old)) else {
            return Ok(self.entries.clone());
        };

        let target_name = normalize(new_raw);
        validate(&target_name)?;
        let now = self.clock.now_ms();

        match self.find(&target_name) {
            Some(target) if target != source => {
                let source_pinned = self.entries[source].pinned;
                let entry = &mut self.entries[target];
                entry.pinned = entry.pinned || source_pinned;
                entry.last_touched = now;
                self.entries.remove(source);
            }
            _ => {
                let entry = &mut self.entries[source];
                entry.name = target_name;
                entry.last_touched = now;
            }
        }

        sort_ranked(&mut self.entries);
        self.persist()?;
        Ok(self.entries.clone())
    }

    fn find(&self, name: &str) -> Option<usize> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .position(|e| e.name.to_lowercase() == needle)
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let payload = serde_json::to_string(&self.entries)
            .map_err(|e| HistoryError::Storage(e.to_string()))?;
        self.blob
            .save(&payload)
            .map_err(|e| HistoryError::Storage(e.to_string()))?;
        tracing::debug!("Persisted {} history entries", self.entries.len());
        Ok(())
    }
}
