//! Discovery and processing loops.
//!
//! Discovery walks the paginated listing site and accumulates a deduplicated,
//! ordered set of candidate recipe URLs. Processing then visits each URL
//! strictly sequentially, extracting and normalizing recipe data and
//! recording one outcome per URL in discovery order. Both loops rate-limit
//! themselves with fixed sleeps; there is no concurrency and no retrying.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::classify::is_recipe_url;
use crate::clipper::ClipperClient;
use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::extract::{extract_hrefs, extract_json_ld_blocks, locate_recipe_object};
use crate::fetch::FetchClient;
use crate::model::{Recipe, RunStatistics, UrlOutcome};
use crate::normalize::normalize;

/// Accumulated discovery state threaded through the page loop.
///
/// `urls` keeps discovery order for the report; `seen` backs the
/// exact-string dedup check.
#[derive(Debug, Default)]
pub struct DiscoveredSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl DiscoveredSet {
    /// Merge one page's candidate links, returning how many were new.
    pub fn merge(&mut self, links: Vec<String>) -> usize {
        let mut added = 0;
        for link in links {
            if self.seen.insert(link.clone()) {
                self.urls.push(link);
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Results of the processing phase
#[derive(Debug, Default)]
pub struct ProcessingOutcome {
    pub results: Vec<UrlOutcome>,
    pub stats: RunStatistics,
}

pub struct Crawler {
    config: CrawlerConfig,
    fetcher: FetchClient,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        let fetcher = FetchClient::new(Some(Duration::from_secs(config.timeout)))?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Probe the configured clipper service, if any. `None` when no clipper
    /// is configured.
    pub fn clipper_healthy(&self) -> Option<bool> {
        self.config
            .clipper_url
            .as_deref()
            .map(|url| ClipperClient::new(&self.fetcher, url).health_check())
    }

    /// Walk the paginated listing and accumulate recipe URLs.
    ///
    /// Stops on the first non-200 listing page, the first page yielding no
    /// new URLs, the recipe cap, or the page cap. A fetch error stops
    /// discovery entirely; the partial set gathered so far is kept. Losing a
    /// listing page risks missing an unknown number of URLs, so discovery is
    /// conservative where per-recipe processing is not.
    pub fn discover(&self) -> Vec<String> {
        info!(
            "Starting recipe discovery from {}",
            self.config.listing_url
        );

        let mut discovered = DiscoveredSet::default();
        let mut page = 1u32;

        while page <= self.config.max_pages && discovered.len() < self.config.max_recipes {
            let page_url = page_url(&self.config.listing_url, page);
            info!("Discovering recipes from page {page}: {page_url}");

            let response = match self.fetcher.get(&page_url) {
                Ok(response) => response,
                Err(err) => {
                    error!("Error discovering recipes from page {page}: {err}");
                    break;
                }
            };

            if !response.is_ok() {
                warn!("Failed to fetch page {page}: HTTP {}", response.status);
                break;
            }

            let links = collect_recipe_links(&response.body, &self.config.base_url);
            let found = links.len();
            let added = discovered.merge(links);
            info!("Page {page}: Found {found} links, {added} new");

            if added == 0 {
                info!("No new recipe URLs found on page {page}, stopping discovery");
                break;
            }

            if discovered.len() >= self.config.max_recipes {
                info!(
                    "Reached maximum recipe limit ({})",
                    self.config.max_recipes
                );
                break;
            }

            page += 1;
            sleep_ms(self.config.page_delay_ms);
        }

        info!(
            "Recipe discovery complete. Found {} total recipe URLs",
            discovered.len()
        );
        discovered.into_urls()
    }

    /// Fetch, extract, and normalize every discovered URL in order.
    ///
    /// Each failure is terminal for its URL only; the loop always runs to
    /// the end of the list. Outcomes land in one ordered sequence so the
    /// report can reconstruct a 1:1 URL-to-outcome mapping.
    pub fn process(&self, urls: &[String]) -> ProcessingOutcome {
        let mut outcome = ProcessingOutcome {
            stats: RunStatistics {
                discovered: urls.len(),
                ..RunStatistics::default()
            },
            ..ProcessingOutcome::default()
        };

        let clipper = self
            .config
            .clipper_url
            .as_deref()
            .map(|url| ClipperClient::new(&self.fetcher, url));

        let total = urls.len();
        for (index, url) in urls.iter().enumerate() {
            info!("Processing recipe {}/{}: {}", index + 1, total, url);

            let result = match &clipper {
                Some(clipper) => self.process_via_clipper(clipper, url, &mut outcome.stats),
                None => self.process_locally(url, &mut outcome.stats),
            };

            outcome.stats.processed += 1;
            match result {
                Ok(recipe) => {
                    info!("Successfully extracted recipe: {}", recipe.name);
                    outcome.stats.succeeded += 1;
                    outcome.results.push(UrlOutcome::success(url, recipe));
                }
                Err(err) => {
                    let reason = failure_reason(&err);
                    warn!("Failed to extract {url}: {reason}");
                    outcome.stats.failed += 1;
                    outcome.results.push(UrlOutcome::failure(url, reason));
                }
            }

            if index + 1 < total {
                sleep_ms(self.config.delay_ms);
            }
        }

        info!(
            "Recipe processing complete. {} successful, {} failed",
            outcome.stats.succeeded, outcome.stats.failed
        );
        outcome
    }

    fn process_locally(&self, url: &str, stats: &mut RunStatistics) -> Result<Recipe, CrawlError> {
        let response = self.fetcher.get(url)?;
        if !response.is_ok() {
            return Err(CrawlError::HttpStatus(response.status));
        }

        let blocks = extract_json_ld_blocks(&response.body);
        let Some(object) = locate_recipe_object(&blocks) else {
            stats.no_structured_data += 1;
            return Err(CrawlError::NoStructuredData);
        };
        stats.has_structured_data += 1;

        let recipe = normalize(object, url);
        if recipe.is_valid() {
            Ok(recipe)
        } else {
            Err(CrawlError::InvalidRecipe)
        }
    }

    fn process_via_clipper(
        &self,
        clipper: &ClipperClient<'_>,
        url: &str,
        stats: &mut RunStatistics,
    ) -> Result<Recipe, CrawlError> {
        match clipper.clip(url) {
            Ok(recipe) => {
                stats.has_structured_data += 1;
                Ok(recipe)
            }
            Err(CrawlError::InvalidRecipe) => {
                stats.no_structured_data += 1;
                Err(CrawlError::InvalidRecipe)
            }
            Err(err) => Err(err),
        }
    }
}

/// Failure string recorded in the report for one URL. Uses the wording
/// downstream consumers already match on.
fn failure_reason(err: &CrawlError) -> String {
    match err {
        CrawlError::NoStructuredData => "no structured data".to_string(),
        CrawlError::InvalidRecipe => "invalid recipe data".to_string(),
        other => other.to_string(),
    }
}

/// Page 1 is the bare listing URL; later pages use the query template.
fn page_url(listing_url: &str, page: u32) -> String {
    if page == 1 {
        listing_url.to_string()
    } else {
        format!("{listing_url}?page={page}")
    }
}

/// Classify one page's hyperlinks and resolve survivors to absolute URLs,
/// deduplicated within the page in document order.
fn collect_recipe_links(html: &str, base_url: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_hrefs(html)
        .into_iter()
        .filter(|href| is_recipe_url(href))
        .map(|href| resolve_url(&href, base_url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Root-relative links join the configured base; absolute links pass as-is.
fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

fn sleep_ms(millis: u64) {
    if millis > 0 {
        thread::sleep(Duration::from_millis(millis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_template() {
        assert_eq!(
            page_url("https://example.com/recipes", 1),
            "https://example.com/recipes"
        );
        assert_eq!(
            page_url("https://example.com/recipes", 3),
            "https://example.com/recipes?page=3"
        );
    }

    #[test]
    fn test_collect_recipe_links_filters_and_resolves() {
        let html = r#"
            <html><body>
                <a href="/recipe/pasta">Pasta</a>
                <a href="/recipes/pag/2">Next</a>
                <a href="/recipe/photo.jpg">Photo</a>
                <a href="https://example.com/recipe/soup">Soup</a>
                <a href="/recipe/pasta">Pasta again</a>
            </body></html>
        "#;

        let links = collect_recipe_links(html, "https://example.com/");
        assert_eq!(
            links,
            vec![
                "https://example.com/recipe/pasta",
                "https://example.com/recipe/soup"
            ]
        );
    }

    #[test]
    fn test_discovered_set_merge_counts_only_new() {
        let mut set = DiscoveredSet::default();
        assert!(set.is_empty());
        assert_eq!(set.merge(vec!["a".into(), "b".into()]), 2);
        assert!(!set.is_empty());
        assert_eq!(set.merge(vec!["b".into(), "c".into()]), 1);
        assert_eq!(set.len(), 3);
        assert_eq!(set.into_urls(), vec!["a", "b", "c"]);
    }
}
