//! Persistence port for the history store.
//!
//! The store's only I/O dependency: a load/save pair over a single
//! string payload. `FileBlob` keeps it in one JSON file; `MemoryBlob`
//! backs tests and ephemeral sessions.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load/save pair over the persisted history payload.
pub trait HistoryBlob {
    /// Read the stored payload, `None` when nothing was persisted yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored payload.
    fn save(&self, payload: &str) -> Result<()>;
}

/// File-backed blob: one JSON file, rewritten whole on each save.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryBlob for FileBlob {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(&self.path).context("Failed to read history file")?;
        Ok(Some(payload))
    }

    fn save(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }
        fs::write(&self.path, payload).context("Failed to write history file")?;
        tracing::debug!("Wrote history to {:?}", self.path);
        Ok(())
    }
}

/// In-memory blob sharing one slot across clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlob {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with an existing payload.
    pub fn with_payload(payload: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(payload.to_string()))),
        }
    }

    /// The last saved payload, if any.
    pub fn snapshot(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl HistoryBlob for MemoryBlob {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, payload: &str) -> Result<()> {
        *self.slot.lock() = Some(payload.to_string());
        Ok(())
    }
}
