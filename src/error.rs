// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: timeout, DNS, refused connection or a non-2xx status.
    #[error("fetch failed for FirmId {id}: {source}")]
    Fetch {
        id: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("no table found for FirmId {0}")]
    NoTable(u32),

    #[error("no fields found for FirmId {0}")]
    NoFields(u32),

    #[error("could not write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode records: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid id list: {0}")]
    InvalidIds(String),
}

impl Error {
    /// Errors the collector turns into "no data" for a single id.
    /// Everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::NoTable(_) | Error::NoFields(_))
    }
}

/// `err` and every `source()` below it, joined with `": "`.
/// Transport errors keep the real reason (refused, timed out, DNS) in the
/// lower levels, so the top-level text alone is not enough to log.
pub fn cause_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut next = err.source();
    while let Some(e) = next {
        let text = e.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        next = e.source();
    }
    out
}
