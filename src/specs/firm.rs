// src/specs/firm.rs
//! Spec for the Law List *Firm Detail* page.
//!
//! The page has one `<table>` of two-column rows (`Firm Name | …`, `Address | …`).
//! Partway down a `Staff` row starts the personnel listing, which is not
//! collected: extraction ends at that row and nothing after it is read.

use scraper::Html;

use crate::core::html::{first_table, table_rows};
use crate::error::{Error, Result};
use crate::record::FirmRecord;

/// Key/value pairs from table rows, stopping at the sentinel row.
///
/// - only rows with exactly two cells produce a pair; others are skipped
/// - the sentinel row (key equal to `sentinel`, ignoring case) is not yielded
/// - once the sentinel is seen the iterator is exhausted for good
pub struct FieldRows<I> {
    rows: I,
    /// Already lowercased.
    sentinel: String,
    done: bool,
}

impl<I> FieldRows<I>
where
    I: Iterator<Item = Vec<String>>,
{
    pub fn new(rows: I, sentinel: &str) -> Self {
        Self { rows, sentinel: sentinel.to_lowercase(), done: false }
    }
}

impl<I> Iterator for FieldRows<I>
where
    I: Iterator<Item = Vec<String>>,
{
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for cells in self.rows.by_ref() {
            let pair: std::result::Result<[String; 2], _> = cells.try_into();
            let Ok([key, value]) = pair else {
                continue;
            };
            if key.to_lowercase() == self.sentinel {
                self.done = true;
                return None;
            }
            return Some((key, value));
        }
        self.done = true;
        None
    }
}

impl<I> std::iter::FusedIterator for FieldRows<I> where I: Iterator<Item = Vec<String>> {}

/// Parse one detail page into a record.
///
/// `Err(NoTable)` when the page has no table, `Err(NoFields)` when the table
/// yields nothing before the sentinel.
pub fn parse_doc(doc: &str, firm_id: u32, sentinel: &str) -> Result<FirmRecord> {
    let html = Html::parse_document(doc);
    let table = first_table(&html).ok_or(Error::NoTable(firm_id))?;

    let fields = FieldRows::new(table_rows(table), sentinel);
    FirmRecord::from_fields(firm_id, fields).ok_or(Error::NoFields(firm_id))
}
