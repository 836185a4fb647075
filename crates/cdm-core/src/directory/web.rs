//! HTTP server directory client.
//!
//! Uses the curl crate (libcurl) to query a directory endpoint over plain
//! HTTPS and parses its JSON response into endpoint records. Plays the
//! anonymous-session role for deployments where the directory is reachable
//! without a login.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pool::{ContentId, Endpoint, EndpointKind};

use super::{ContentSession, SessionProvider};

/// One server record as the directory reports it on the wire.
#[derive(Debug, Clone, Deserialize)]
struct WireServer {
    host: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default = "default_num_entries")]
    num_entries: u32,
    #[serde(default)]
    allowed_content_ids: Vec<ContentId>,
    #[serde(default)]
    load: f32,
    #[serde(default)]
    use_as_proxy: bool,
}

fn default_num_entries() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct WireDirectory {
    servers: Vec<WireServer>,
}

/// Directory client bound to one endpoint URL.
#[derive(Debug, Clone)]
pub struct WebDirectory {
    url: String,
}

impl WebDirectory {
    /// Validates the URL up front so a typo in config fails at startup, not
    /// mid-session.
    pub fn new(url: &str) -> Result<Self> {
        url::Url::parse(url).with_context(|| format!("invalid directory URL: {url}"))?;
        Ok(Self {
            url: url.to_string(),
        })
    }

    /// GET the directory and parse the response body.
    pub fn fetch(&self) -> Result<Vec<Endpoint>> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(30))?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("directory request failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if code < 200 || code >= 300 {
            anyhow::bail!("directory {} returned HTTP {}", self.url, code);
        }

        parse_directory(&body)
    }
}

/// Parse a directory response body into endpoint records.
///
/// Unknown `type` strings are kept as `Other` rather than rejected: the
/// eligibility filter decides what to do with them, and a proxy-only record
/// must survive this far.
fn parse_directory(body: &[u8]) -> Result<Vec<Endpoint>> {
    let wire: WireDirectory =
        serde_json::from_slice(body).context("malformed directory response")?;
    Ok(wire
        .servers
        .into_iter()
        .map(|s| Endpoint {
            kind: EndpointKind::from_wire(&s.kind),
            host: s.host,
            capacity: s.num_entries,
            allowed_content_ids: s.allowed_content_ids,
            load: s.load,
            use_as_proxy: s.use_as_proxy,
        })
        .collect())
}

impl ContentSession for WebDirectory {
    fn wait_for_credentials(&self, _timeout: Duration) -> bool {
        // Plain HTTP directory: nothing to establish.
        true
    }

    fn server_directory(&self) -> Result<Vec<Endpoint>> {
        self.fetch()
    }

    fn disconnect(&self) {}
}

impl SessionProvider for WebDirectory {
    fn open_anonymous(&self) -> Result<Box<dyn ContentSession>> {
        Ok(Box::new(self.clone()))
    }
}
