// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page. A spec knows *where the data lives in the HTML*
//! and how to turn it into a record; it does not fetch on its own schedule,
//! persist, or print progress. Those live in `scrape` and `store`.
//!
//! ```text
//! cli → scrape::collect_firms → PageSource::fetch(id)
//!                             → specs::firm::parse_doc(html)
//!                             → store::Checkpoint::save(records)
//! ```
//!
//! Specs are testable offline against saved or inline HTML.
pub mod firm;
