use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use serde_json::Value;

use crate::error::CrawlError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One fetched page. A non-2xx status is data, not an error; callers branch
/// on `status` themselves.
#[derive(Debug)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP client with a realistic browser header set.
///
/// Requests `identity` encoding so bodies come back as parseable text
/// without a decompression step. No redirect or cookie handling beyond what
/// reqwest does natively, and no retries.
pub struct FetchClient {
    client: Client,
}

impl FetchClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, BROWSER_USER_AGENT.parse()?);
        headers.insert(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".parse()?,
        );
        headers.insert(ACCEPT_LANGUAGE, "en-US,en;q=0.5".parse()?);
        headers.insert(ACCEPT_ENCODING, "identity".parse()?);

        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and return status plus body text. Only connection-level
    /// failures (DNS, refusal, timeout) surface as `Err`.
    pub fn get(&self, url: &str) -> Result<PageResponse, CrawlError> {
        debug!("GET {url}");
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(PageResponse { status, body })
    }

    /// POST a JSON body and return status plus raw response text. Used for
    /// the clipper service; a non-2xx status is returned to the caller via
    /// the tuple, matching `get`, and the body stays unparsed so an HTML
    /// error page never masks the status.
    pub fn post_json(&self, url: &str, body: &Value) -> Result<(u16, String), CrawlError> {
        debug!("POST {url}");
        let response = self.client.post(url).json(body).send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        Ok((status, text))
    }
}
