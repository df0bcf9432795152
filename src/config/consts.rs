// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.hklawsoc.org.hk/en/Serve-the-Public/The-Law-List/Firm-Detail";
pub const ID_PARAM: &str = "FirmId";
pub const TIMEOUT_SECS: u64 = 10;

// Range (inclusive)
pub const FIRST_ID: u32 = 1;
pub const LAST_ID: u32 = 2000;

// Scrape
pub const SENTINEL_KEY: &str = "staff";
pub const REQUEST_PAUSE_MS: u64 = 1000; // be polite

// Output
pub const DEFAULT_OUT_FILE: &str = "law_firms_data.json";

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
