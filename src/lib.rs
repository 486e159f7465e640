pub mod classify;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod report;

pub use config::CrawlerConfig;
pub use crawler::Crawler;
pub use error::CrawlError;
pub use model::{Recipe, RunStatistics, UrlOutcome};
pub use report::RunReport;

/// Run one end-to-end crawl: discover recipe URLs from the configured
/// listing site, process each one, and assemble the run report. The report
/// is returned, not written; callers decide where it lands.
pub fn crawl_site(config: CrawlerConfig) -> Result<RunReport, CrawlError> {
    let crawler = Crawler::new(config)?;
    let discovered = crawler.discover();
    let outcome = crawler.process(&discovered);

    Ok(RunReport::from_run(
        &crawler.config().base_url,
        discovered,
        outcome.results,
        &outcome.stats,
    ))
}
