//! Run reporter: serializes one crawl execution to a JSON artifact and
//! prints the console summary. Pure sink, no recovery logic.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::CrawlError;
use crate::model::{RunStatistics, UrlOutcome};

const CRAWLER_NAME: &str = "Recipe Crawler";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub crawler: String,
    pub timestamp: String,
    pub base_url: String,
    pub total_discovered: usize,
    pub total_scraped: usize,
    pub successful: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportUrls {
    pub discovered: Vec<String>,
    pub successful: Vec<String>,
    pub failed: Vec<String>,
}

/// The single JSON artifact summarizing one end-to-end crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub metadata: ReportMetadata,
    pub results: Vec<UrlOutcome>,
    pub urls: ReportUrls,
}

impl RunReport {
    pub fn from_run(
        base_url: &str,
        discovered: Vec<String>,
        results: Vec<UrlOutcome>,
        stats: &RunStatistics,
    ) -> Self {
        let successful = results
            .iter()
            .filter(|outcome| outcome.success)
            .map(|outcome| outcome.url.clone())
            .collect();
        let failed = results
            .iter()
            .filter(|outcome| !outcome.success)
            .map(|outcome| outcome.url.clone())
            .collect();

        Self {
            metadata: ReportMetadata {
                crawler: CRAWLER_NAME.to_string(),
                timestamp: Local::now().to_rfc3339(),
                base_url: base_url.to_string(),
                total_discovered: discovered.len(),
                total_scraped: stats.processed,
                successful: stats.succeeded,
                failed: stats.failed,
                mode: None,
            },
            results,
            urls: ReportUrls {
                discovered,
                successful,
                failed,
            },
        }
    }

    /// Report for a discovery-only run: just the URL list, no outcomes.
    pub fn discovery_only(base_url: &str, discovered: Vec<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                crawler: CRAWLER_NAME.to_string(),
                timestamp: Local::now().to_rfc3339(),
                base_url: base_url.to_string(),
                total_discovered: discovered.len(),
                total_scraped: 0,
                successful: 0,
                failed: 0,
                mode: Some("discovery_only".to_string()),
            },
            results: Vec::new(),
            urls: ReportUrls {
                discovered,
                successful: Vec::new(),
                failed: Vec::new(),
            },
        }
    }

    /// Write the report as pretty JSON. Without an override path the file
    /// lands in the working directory under a sortable timestamped name.
    pub fn save(&self, output: Option<&Path>) -> Result<PathBuf, CrawlError> {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!(
                "recipe_crawl_{}.json",
                Local::now().format("%Y%m%d_%H%M%S")
            )),
        };

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        info!("Results saved to {}", path.display());
        Ok(path)
    }

    /// Aggregate text summary with a small sample of each outcome set.
    pub fn print_summary(&self) {
        let processed = self.metadata.total_scraped;
        let rate = if processed == 0 {
            0.0
        } else {
            self.metadata.successful as f64 / processed as f64 * 100.0
        };

        println!();
        println!("{}", "=".repeat(60));
        println!("RECIPE CRAWLER SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Base URL: {}", self.metadata.base_url);
        println!("Total URLs discovered: {}", self.metadata.total_discovered);
        println!("Total recipes scraped: {processed}");
        println!("Successful scrapes: {}", self.metadata.successful);
        println!("Failed scrapes: {}", self.metadata.failed);
        println!("Success rate: {rate:.1}%");

        if !self.urls.successful.is_empty() {
            println!("\nSample successful recipes:");
            for url in self.urls.successful.iter().take(5) {
                println!("  - {url}");
            }
        }

        if !self.urls.failed.is_empty() {
            println!("\nSample failed URLs:");
            for url in self.urls.failed.iter().take(5) {
                println!("  - {url}");
            }
        }

        println!("{}", "=".repeat(60));
    }
}
