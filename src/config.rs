use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Crawler run configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlerConfig {
    /// Site root used to resolve relative recipe links
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paginated listing page that discovery walks
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// Optional upstream scraping service; when set, processing delegates
    /// extraction to its /clip endpoint
    #[serde(default)]
    pub clipper_url: Option<String>,
    /// Maximum listing pages to walk during discovery
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Maximum recipe URLs to accumulate during discovery
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,
    /// Delay between recipe fetches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Delay between listing-page fetches in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_url: default_listing_url(),
            clipper_url: None,
            max_pages: default_max_pages(),
            max_recipes: default_max_recipes(),
            delay_ms: default_delay_ms(),
            page_delay_ms: default_page_delay_ms(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.lacucinaitaliana.com".to_string()
}

fn default_listing_url() -> String {
    "https://www.lacucinaitaliana.com/recipes".to_string()
}

fn default_max_pages() -> u32 {
    10
}

fn default_max_recipes() -> usize {
    200
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_page_delay_ms() -> u64 {
    2000
}

fn default_timeout() -> u64 {
    30
}

impl CrawlerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CRAWLER__ prefix
    /// 2. crawler.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CRAWLER__MAX_PAGES
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("crawler").required(false))
            .add_source(
                Environment::with_prefix("CRAWLER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CrawlerConfig::default();
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.max_recipes, 200);
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.page_delay_ms, 2000);
        assert_eq!(config.timeout, 30);
        assert!(config.clipper_url.is_none());
    }

    #[test]
    fn test_listing_url_lives_under_base() {
        let config = CrawlerConfig::default();
        assert!(config.listing_url.starts_with(&config.base_url));
    }
}
