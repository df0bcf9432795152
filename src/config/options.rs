// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::{Error, Result};

/// Everything one collection run needs. `Default` is the production setup;
/// tests shrink the range, zero the delay and point `out_path` at a temp dir.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    pub ids: IdSelector,
    pub net: NetOptions,
    pub out_path: PathBuf,
    /// Pause after every id, stored or not.
    pub delay: Duration,
    /// Row key (compared case-insensitively) that ends field extraction.
    pub sentinel: String,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            ids: IdSelector::default(),
            net: NetOptions::default(),
            out_path: PathBuf::from(DEFAULT_OUT_FILE),
            delay: Duration::from_millis(REQUEST_PAUSE_MS),
            sentinel: s!(SENTINEL_KEY),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    /// Page URL without the query string.
    pub base_url: String,
    pub id_param: String,
    pub timeout: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            id_param: s!(ID_PARAM),
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdSelector {
    /// Inclusive on both ends.
    Range { first: u32, last: u32 },
    /// Any order; `resolve` sorts and dedups.
    Ids(Vec<u32>),
}

impl Default for IdSelector {
    fn default() -> Self {
        IdSelector::Range { first: FIRST_ID, last: LAST_ID }
    }
}

impl IdSelector {
    /// Ids in the order they will be visited: increasing, no duplicates,
    /// however the list was built.
    pub fn resolve(&self) -> Vec<u32> {
        match self {
            IdSelector::Range { first, last } => (*first..=*last).collect(),
            IdSelector::Ids(v) => {
                let mut ids = v.clone();
                ids.sort_unstable();
                ids.dedup();
                ids
            }
        }
    }

    /// Parse `"1-5,9,12-14"` into a sorted, deduplicated id list.
    pub fn parse_list(s: &str) -> Result<Self> {
        let mut out = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() { continue; }
            if let Some(dash) = part.find('-') {
                let a = parse_id(&part[..dash])?;
                let b = parse_id(&part[dash + 1..])?;
                if a > b { return Err(Error::InvalidIds(format!("range {part} is reversed"))); }
                out.extend(a..=b);
            } else {
                out.push(parse_id(part)?);
            }
        }
        if out.is_empty() {
            return Err(Error::InvalidIds(format!("no ids in {s:?}")));
        }
        out.sort_unstable();
        out.dedup();
        Ok(IdSelector::Ids(out))
    }
}

fn parse_id(s: &str) -> Result<u32> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|e| Error::InvalidIds(format!("{s:?}: {e}")))
}
