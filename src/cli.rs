// src/cli.rs
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::consts::*;
use crate::config::options::{CollectOptions, IdSelector, NetOptions};
use crate::core::Fetcher;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::record::FirmRecord;
use crate::scrape::{self, Absence, CollectSummary};
use crate::store::JsonSnapshot;

/// Collect firm details from the Law List into a JSON file.
///
/// With no flags: FirmId 1..=2000, 10 s timeout, 1 s pause,
/// output `law_firms_data.json`.
#[derive(Debug, Parser)]
#[command(name = "lawlist_scrape", version, about)]
pub struct Args {
    /// First FirmId (inclusive)
    #[arg(long, default_value_t = FIRST_ID)]
    pub start: u32,

    /// Last FirmId (inclusive)
    #[arg(long, default_value_t = LAST_ID)]
    pub end: u32,

    /// Explicit ids instead of --start/--end, e.g. "1-20,42"
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub ids: Option<String>,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUT_FILE)]
    pub out: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pause after every id, in milliseconds
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub delay_ms: u64,

    /// Detail page URL without the query string
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// Debug log file [default: .store/debug.log]
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    pub fn to_options(&self) -> Result<CollectOptions> {
        let ids = match &self.ids {
            Some(list) => IdSelector::parse_list(list)?,
            None if self.start > self.end => {
                return Err(Error::InvalidIds(format!(
                    "--start {} is after --end {}",
                    self.start, self.end
                )));
            }
            None => IdSelector::Range { first: self.start, last: self.end },
        };

        Ok(CollectOptions {
            ids,
            net: NetOptions {
                base_url: self.base_url.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
                ..NetOptions::default()
            },
            out_path: self.out.clone(),
            delay: Duration::from_millis(self.delay_ms),
            ..CollectOptions::default()
        })
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let opts = args.to_options()?;

    let log_path = args.log.clone().unwrap_or_else(crate::log::default_log_path);
    crate::log::init(&log_path)?;

    let fetcher = Fetcher::new(&opts.net)?;
    let mut checkpoint = JsonSnapshot::new(&opts.out_path);
    let mut console = ConsoleProgress::stdout();

    scrape::collect_firms(&opts, &fetcher, &mut checkpoint, Some(&mut console))?;
    Ok(())
}

/// Human progress lines: attempt, fields or skip, save, a dash separator
/// per id, and a closing summary. Stdout in the CLI, a buffer in tests.
/// Console write errors are ignored; the log file has the same facts.
pub struct ConsoleProgress<W: Write = io::Stdout> {
    out: W,
    total: usize,
    seen: usize,
}

impl ConsoleProgress {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, total: 0, seen: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{args}");
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.line(format_args!("Collecting {total} firm id(s)"));
    }

    fn log(&mut self, msg: &str) {
        self.line(format_args!("{msg}"));
    }

    fn item_start(&mut self, id: u32) {
        self.seen += 1;
        let (seen, total) = (self.seen, self.total);
        self.line(format_args!("[{seen}/{total}] Fetching FirmId: {id}"));
    }

    fn item_done(&mut self, id: u32, record: &FirmRecord) {
        self.line(format_args!("Found data for FirmId: {id}"));
        for (key, value) in record.fields() {
            self.line(format_args!("  {key}: {value}"));
        }
    }

    fn item_failed(&mut self, id: u32, why: &Absence) {
        self.line(format_args!("Skipping FirmId: {id} ({why})"));
    }

    fn saved(&mut self, count: usize, location: &str) {
        self.line(format_args!("Saved {count} record(s) to {location}"));
    }

    fn item_end(&mut self, _id: u32) {
        self.line(format_args!("{}", "-".repeat(50)));
    }

    fn finish(&mut self, summary: &CollectSummary) {
        self.line(format_args!(
            "Finished: {} of {} firm(s) collected, {} skipped",
            summary.accepted, summary.attempted, summary.absent()
        ));
        self.line(format_args!("All data saved in '{}'", summary.location));
        let _ = self.out.flush();
    }
}
