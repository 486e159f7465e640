//! Client for the optional upstream recipe-scraping service.
//!
//! The service exposes a `/health` probe and a `/clip` endpoint that accepts
//! `{"url": ...}` and returns a scraped recipe object directly. When
//! configured, the processing loop delegates extraction here instead of
//! parsing pages locally; the response still goes through the same
//! normalizer so both paths converge on one canonical shape.

use log::{info, warn};
use serde_json::{json, Value};

use crate::error::CrawlError;
use crate::fetch::FetchClient;
use crate::model::Recipe;
use crate::normalize::normalize;

pub struct ClipperClient<'a> {
    fetcher: &'a FetchClient,
    base_url: String,
}

impl<'a> ClipperClient<'a> {
    pub fn new(fetcher: &'a FetchClient, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /health and check for `{"status": "healthy"}`. Any transport or
    /// shape problem reads as unhealthy rather than an error.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.fetcher.get(&url) {
            Ok(page) if page.is_ok() => {
                let status = serde_json::from_str::<Value>(&page.body)
                    .ok()
                    .and_then(|body| body.get("status").and_then(Value::as_str).map(String::from))
                    .unwrap_or_else(|| "unknown".to_string());
                info!("Clipper health: {status}");
                status == "healthy"
            }
            Ok(page) => {
                warn!("Clipper health check failed with status {}", page.status);
                false
            }
            Err(err) => {
                warn!("Clipper health check error: {err}");
                false
            }
        }
    }

    /// POST /clip for one recipe URL and normalize the returned object.
    /// The status is checked before the body is parsed, so a gateway error
    /// page reports its HTTP status rather than a JSON parse failure.
    pub fn clip(&self, url: &str) -> Result<Recipe, CrawlError> {
        let endpoint = format!("{}/clip", self.base_url);
        let (status, body) = self.fetcher.post_json(&endpoint, &json!({ "url": url }))?;

        if !(200..300).contains(&status) {
            return Err(CrawlError::ClipperUnavailable(format!("HTTP {status}")));
        }

        let body: Value = serde_json::from_str(&body)?;
        let recipe = normalize(&body, url);
        if recipe.is_valid() {
            Ok(recipe)
        } else {
            Err(CrawlError::InvalidRecipe)
        }
    }
}
