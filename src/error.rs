use thiserror::Error;

/// Errors that can occur during a crawl run
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Connection-level failure (DNS, refusal, timeout)
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Malformed JSON-LD or service response body
    #[error("Failed to parse structured data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-2xx response; never raised by the fetch client itself, recorded
    /// per URL by the processing loop
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Page carries no schema.org Recipe markup
    #[error("No structured data found")]
    NoStructuredData,

    /// Normalized record lacks a usable name
    #[error("Invalid recipe data")]
    InvalidRecipe,

    /// Upstream clipper service is unreachable or reported itself unhealthy
    #[error("Clipper service unavailable: {0}")]
    ClipperUnavailable(String),

    /// Failed to write the run report
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
