// tests/collect.rs
//
// The collection loop with canned pages and an in-memory checkpoint.
//
use std::collections::HashMap;
use std::time::Duration;

use lawlist_scrape::Error;
use lawlist_scrape::config::options::{CollectOptions, IdSelector};
use lawlist_scrape::core::PageSource;
use lawlist_scrape::progress::Progress;
use lawlist_scrape::record::FirmRecord;
use lawlist_scrape::scrape::{self, Absence, CollectSummary, Outcome};
use lawlist_scrape::store::{self, Checkpoint, JsonSnapshot};

/// Pages by id; ids not in the map fail like a dead connection.
struct CannedPages(HashMap<u32, String>);

impl CannedPages {
    fn new(pages: &[(u32, &str)]) -> Self {
        Self(pages.iter().map(|(id, html)| (*id, html.to_string())).collect())
    }
}

impl PageSource for CannedPages {
    fn fetch(&self, id: u32) -> lawlist_scrape::Result<String> {
        match self.0.get(&id) {
            Some(html) => Ok(html.clone()),
            None => Err(refused(id)),
        }
    }
}

/// A real transport error: connect to a port nobody listens on.
fn refused(id: u32) -> Error {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let source = reqwest::blocking::Client::new()
        .get(format!("http://127.0.0.1:{port}/"))
        .timeout(Duration::from_secs(2))
        .send()
        .unwrap_err();
    Error::Fetch { id, source }
}

#[derive(Default)]
struct MemoryCheckpoint {
    snapshots: Vec<Vec<u32>>,
}

impl Checkpoint for MemoryCheckpoint {
    fn save(&mut self, records: &[FirmRecord]) -> lawlist_scrape::Result<()> {
        self.snapshots.push(records.iter().map(FirmRecord::firm_id).collect());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}

struct BrokenCheckpoint;

impl Checkpoint for BrokenCheckpoint {
    fn save(&mut self, _records: &[FirmRecord]) -> lawlist_scrape::Result<()> {
        Err(Error::Persist {
            path: "broken.json".into(),
            source: std::io::Error::other("disk full"),
        })
    }

    fn location(&self) -> String {
        "broken.json".into()
    }
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.events.push(format!("begin {total}"));
    }
    fn item_done(&mut self, id: u32, _record: &FirmRecord) {
        self.events.push(format!("done {id}"));
    }
    fn item_failed(&mut self, id: u32, why: &Absence) {
        let tag = match why {
            Absence::FetchFailed(_) => "fetch",
            Absence::NoTable => "notable",
            Absence::NoFields => "nofields",
        };
        self.events.push(format!("failed {id} {tag}"));
    }
    fn saved(&mut self, count: usize, _location: &str) {
        self.events.push(format!("saved {count}"));
    }
    fn finish(&mut self, summary: &CollectSummary) {
        self.events.push(format!("finish {}/{}", summary.accepted, summary.attempted));
    }
}

const FIRM_1: &str = "<table><tr><td>Firm Name</td><td>Alpha</td></tr></table>";
const FIRM_3: &str = "<table><tr><td>Firm Name</td><td>Gamma</td></tr>\
                      <tr><td>Staff</td><td>Jane Doe</td></tr></table>";
const NO_TABLE: &str = "<html><body>Not found</body></html>";
const ONLY_STAFF: &str = "<table><tr><td>Staff</td><td>Jane Doe</td></tr></table>";

fn opts(first: u32, last: u32) -> CollectOptions {
    CollectOptions {
        ids: IdSelector::Range { first, last },
        delay: Duration::ZERO,
        ..CollectOptions::default()
    }
}

#[test]
fn failures_are_skipped_and_successes_checkpointed() {
    // 2: connection refused, 4: no table, 5: only a staff row
    let pages = CannedPages::new(&[(1, FIRM_1), (3, FIRM_3), (4, NO_TABLE), (5, ONLY_STAFF)]);
    let mut cp = MemoryCheckpoint::default();
    let mut rec = Recorder::default();

    let (results, summary) =
        scrape::collect_firms(&opts(1, 5), &pages, &mut cp, Some(&mut rec)).unwrap();

    let ids: Vec<_> = results.iter().map(FirmRecord::firm_id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(summary.attempted, 5);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.absent(), 3);
    assert_eq!(summary.location, "memory");

    // one full snapshot per accepted record
    assert_eq!(cp.snapshots, vec![vec![1], vec![1, 3]]);

    assert_eq!(
        rec.events,
        vec![
            "begin 5", "done 1", "saved 1", "failed 2 fetch", "done 3", "saved 2",
            "failed 4 notable", "failed 5 nofields", "finish 2/5",
        ]
    );
}

#[test]
fn nothing_found_means_nothing_saved() {
    let pages = CannedPages::new(&[(1, NO_TABLE)]);
    let mut cp = MemoryCheckpoint::default();

    let (results, summary) = scrape::collect_firms(&opts(1, 3), &pages, &mut cp, None).unwrap();

    assert!(results.is_empty());
    assert_eq!(summary.accepted, 0);
    assert!(cp.snapshots.is_empty());
}

#[test]
fn checkpoint_failure_ends_the_run() {
    let pages = CannedPages::new(&[(1, FIRM_1), (2, FIRM_1)]);
    let err = scrape::collect_firms(&opts(1, 2), &pages, &mut BrokenCheckpoint, None).unwrap_err();
    assert!(matches!(err, Error::Persist { .. }));
}

#[test]
fn explicit_id_list_is_walked_in_order() {
    let pages = CannedPages::new(&[(1, FIRM_1), (3, FIRM_3)]);
    let mut cp = MemoryCheckpoint::default();
    let mut o = opts(1, 1);
    o.ids = IdSelector::parse_list("3,1").unwrap();

    let (results, _) = scrape::collect_firms(&o, &pages, &mut cp, None).unwrap();
    let ids: Vec<_> = results.iter().map(FirmRecord::firm_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn json_file_matches_result_set_after_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("law_firms_data.json");
    let pages = CannedPages::new(&[(1, FIRM_1), (3, FIRM_3)]);
    let mut snap = JsonSnapshot::new(&path);

    let (results, _) = scrape::collect_firms(&opts(1, 3), &pages, &mut snap, None).unwrap();

    let on_disk = store::load(&path).unwrap();
    assert_eq!(on_disk.as_slice(), results.as_slice());
    assert_eq!(on_disk[1].get("Firm Name"), Some("Gamma"));
    assert_eq!(on_disk[1].get("Staff"), None);
}

#[test]
fn scrape_one_maps_errors_to_absence() {
    let pages = CannedPages::new(&[(4, NO_TABLE)]);
    assert_eq!(scrape::scrape_one(&pages, 4, "staff").unwrap(), Outcome::Absent(Absence::NoTable));
    assert!(matches!(
        scrape::scrape_one(&pages, 8, "staff").unwrap(),
        Outcome::Absent(Absence::FetchFailed(_))
    ));
}

#[test]
fn delay_is_applied_per_id() {
    let pages = CannedPages::new(&[]);
    let mut cp = MemoryCheckpoint::default();
    let mut o = opts(1, 3);
    o.delay = Duration::from_millis(20);

    let started = std::time::Instant::now();
    scrape::collect_firms(&o, &pages, &mut cp, None).unwrap();
    assert!(started.elapsed() >= Duration::from_millis(60));
}
