// src/scrape.rs
use std::{fmt, thread};

use crate::{
    config::options::CollectOptions,
    core::PageSource,
    error::{Error, Result, cause_chain},
    progress::Progress,
    record::{FirmRecord, ResultSet},
    specs::firm,
    store::Checkpoint,
};

/// Why an id produced no record. None of these stop the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Absence {
    /// Timeout, connection error or non-2xx status. Carries the full cause chain.
    FetchFailed(String),
    NoTable,
    NoFields,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::FetchFailed(cause) => write!(f, "fetch failed: {cause}"),
            Absence::NoTable => f.write_str("no table on page"),
            Absence::NoFields => f.write_str("no fields before sentinel"),
        }
    }
}

/// What happened to one id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Stored(FirmRecord),
    Absent(Absence),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub attempted: usize,
    pub accepted: usize,
    pub location: String,
}

impl CollectSummary {
    pub fn absent(&self) -> usize {
        self.attempted - self.accepted
    }
}

/// Fetch and parse one id. Recoverable failures come back as `Absent`.
pub fn scrape_one(source: &dyn PageSource, id: u32, sentinel: &str) -> Result<Outcome> {
    let parsed = source
        .fetch(id)
        .and_then(|doc| firm::parse_doc(&doc, id, sentinel));

    match parsed {
        Ok(record) => Ok(Outcome::Stored(record)),
        Err(e) if e.is_recoverable() => {
            let why = match e {
                Error::NoTable(_) => Absence::NoTable,
                Error::NoFields(_) => Absence::NoFields,
                Error::Fetch { source, .. } => Absence::FetchFailed(cause_chain(&source)),
                other => Absence::FetchFailed(cause_chain(&other)),
            };
            Ok(Outcome::Absent(why))
        }
        Err(e) => Err(e),
    }
}

/// Walk the configured ids in order, one request at a time.
///
/// Each accepted record is appended to the result set and the whole set is
/// handed to `checkpoint` right away. A checkpoint failure ends the run;
/// anything that goes wrong for a single id is logged and skipped.
/// `opts.delay` is slept after every id.
pub fn collect_firms(
    opts: &CollectOptions,
    source: &dyn PageSource,
    checkpoint: &mut dyn Checkpoint,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(ResultSet, CollectSummary)> {
    let ids = opts.ids.resolve();
    let location = checkpoint.location();

    logf!("Collect: begin ids={} out={}", ids.len(), location);
    if let Some(p) = progress.as_deref_mut() {
        if ids.is_empty() {
            p.log("No firm ids to process.");
        }
        p.begin(ids.len());
    }

    let mut results = ResultSet::new();
    let mut summary = CollectSummary { location, ..CollectSummary::default() };

    for id in ids {
        summary.attempted += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.item_start(id);
        }

        match scrape_one(source, id, &opts.sentinel)? {
            Outcome::Stored(record) => {
                logf!("FirmId {id}: stored {} field(s)", record.field_count());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(id, &record);
                }
                results.push(record);
                summary.accepted += 1;

                if let Err(e) = checkpoint.save(results.as_slice()) {
                    loge!("Checkpoint: save failed after FirmId {id}: {e}");
                    return Err(e);
                }
                if let Some(p) = progress.as_deref_mut() {
                    p.saved(results.len(), &summary.location);
                }
            }
            Outcome::Absent(why) => {
                match &why {
                    Absence::FetchFailed(_) => loge!("FirmId {id}: {why}"),
                    other => logf!("FirmId {id}: skipped, {other}"),
                }
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(id, &why);
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.item_end(id);
        }
        if !opts.delay.is_zero() {
            thread::sleep(opts.delay); // be polite
        }
    }

    logf!("Collect: done accepted={} attempted={}", summary.accepted, summary.attempted);
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }

    Ok((results, summary))
}
