// src/core/net.rs
// Blocking HTTP GET, one request per id, no retries.

use reqwest::blocking::Client;

use crate::config::options::NetOptions;
use crate::error::{Error, Result};

/// Anything that can hand back the raw HTML for a firm id.
/// The collector only sees this trait, so tests can feed it canned pages.
pub trait PageSource {
    fn fetch(&self, id: u32) -> Result<String>;
}

pub struct Fetcher {
    client: Client,
    base_url: String,
    id_param: String,
}

impl Fetcher {
    pub fn new(net: &NetOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(net.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: net.base_url.trim_end_matches('?').to_string(),
            id_param: net.id_param.clone(),
        })
    }

    /// `<base>?FirmId=<id>`, id as a plain decimal.
    pub fn url_for(&self, id: u32) -> String {
        format!("{}?{}={}", self.base_url, self.id_param, id)
    }
}

impl PageSource for Fetcher {
    fn fetch(&self, id: u32) -> Result<String> {
        let url = self.url_for(id);
        logd!("GET {url}");

        let fetch_err = |source| Error::Fetch { id, source };
        let resp = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;

        resp.text().map_err(fetch_err)
    }
}
