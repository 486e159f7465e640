use std::path::PathBuf;

use clap::Parser;

/// Crawl a recipe listing site and extract structured recipe data
#[derive(Parser, Debug)]
#[command(name = "recipe-crawler", version, about)]
pub struct Cli {
    /// Maximum number of listing pages to crawl for discovery (default: 10)
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Maximum number of recipe URLs to discover (default: 200)
    #[arg(long, value_name = "N")]
    pub max_recipes: Option<usize>,

    /// Delay between recipe requests in milliseconds (default: 1000)
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Only discover URLs, don't process recipes
    #[arg(long)]
    pub discover_only: bool,

    /// Output filename for the run report
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Base URL of the site to crawl
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Paginated listing URL to discover recipes from
    #[arg(long, value_name = "URL")]
    pub listing_url: Option<String>,

    /// URL of an upstream recipe scraping service to delegate extraction to
    #[arg(long, value_name = "URL", env = "CLIPPER_URL")]
    pub clipper_url: Option<String>,

    /// Perform a clipper health check before crawling
    #[arg(long)]
    pub health_check: bool,
}
