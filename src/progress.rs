// src/progress.rs
use crate::record::FirmRecord;
use crate::scrape::{Absence, CollectSummary};

/// Lightweight progress reporting for a collection run.
/// The CLI implements this to print status lines; tests use `NullProgress`
/// or a recorder.
pub trait Progress {
    /// Called at the start with the number of ids to visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// About to fetch `id`.
    fn item_start(&mut self, _id: u32) {}

    /// `id` produced a record and it was added to the result set.
    fn item_done(&mut self, _id: u32, _record: &FirmRecord) {}

    /// `id` produced nothing.
    fn item_failed(&mut self, _id: u32, _why: &Absence) {}

    /// A checkpoint of `count` records was written to `location`.
    fn saved(&mut self, _count: usize, _location: &str) {}

    /// One id is finished, stored or not.
    fn item_end(&mut self, _id: u32) {}

    /// Called once after the last id.
    fn finish(&mut self, _summary: &CollectSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
