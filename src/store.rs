// src/store.rs
//! Checkpointing of the result set.
//!
//! Every save is a full snapshot of all records accepted so far, so the file
//! on disk always equals the in-memory set as of the last accepted record.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::file::write_atomic;
use crate::record::FirmRecord;

/// Full-state snapshot sink. `save` is called with *all* records each time.
pub trait Checkpoint {
    fn save(&mut self, records: &[FirmRecord]) -> Result<()>;

    /// Where the snapshot lives, for progress messages.
    fn location(&self) -> String;
}

/// Pretty JSON array on disk, replaced atomically on every save.
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Checkpoint for JsonSnapshot {
    fn save(&mut self, records: &[FirmRecord]) -> Result<()> {
        let body = to_json(records)?;
        write_atomic(&self.path, body.as_bytes())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// UTF-8, two-space indent, non-ASCII left as is.
pub fn to_json(records: &[FirmRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(Error::Encode)
}

/// Read a snapshot written by [`JsonSnapshot`].
pub fn load(path: &Path) -> Result<Vec<FirmRecord>> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::Persist { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| Error::Decode { path: path.to_path_buf(), source })
}
