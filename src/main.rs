use std::process;

use clap::Parser;
use log::{error, info, warn};

use recipe_crawler::cli::Cli;
use recipe_crawler::report::RunReport;
use recipe_crawler::{CrawlError, Crawler, CrawlerConfig};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CrawlError> {
    let mut config = CrawlerConfig::load()?;

    // CLI flags take precedence over file/env configuration
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(max_recipes) = cli.max_recipes {
        config.max_recipes = max_recipes;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(listing_url) = cli.listing_url {
        config.listing_url = listing_url;
    }
    if cli.clipper_url.is_some() {
        config.clipper_url = cli.clipper_url;
    }

    let crawler = Crawler::new(config)?;

    if cli.health_check {
        match crawler.clipper_healthy() {
            Some(true) => info!("Clipper health check passed"),
            Some(false) => {
                return Err(CrawlError::ClipperUnavailable(
                    "health check failed".to_string(),
                ))
            }
            None => warn!("No clipper configured, skipping health check"),
        }
    }

    let discovered = crawler.discover();
    if discovered.is_empty() {
        warn!("No recipe URLs discovered");
    }

    let report = if cli.discover_only {
        RunReport::discovery_only(&crawler.config().base_url, discovered)
    } else {
        let outcome = crawler.process(&discovered);
        RunReport::from_run(
            &crawler.config().base_url,
            discovered,
            outcome.results,
            &outcome.stats,
        )
    };

    let path = report.save(cli.output.as_deref())?;
    report.print_summary();
    info!("All results saved to {}", path.display());

    Ok(())
}
