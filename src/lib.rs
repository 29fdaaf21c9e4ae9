// Re-export modules
pub mod config;
pub mod crawlers;
pub mod driver;
pub mod fetcher;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod sink;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use results::ListingRecord;

use thiserror::Error;

/// Conditions fatal to a harvest run.
///
/// Everything recoverable (transient UI state, stale references, per-listing
/// fetch or parse trouble) is absorbed closer to where it happens; what
/// reaches this level stops the run.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("could not establish a WebDriver session via {0}")]
    DriverSession(String),

    #[error("catalog traversal failed: {0}")]
    Traversal(#[from] driver::DriverError),

    #[error("invalid listing filter pattern: {0}")]
    Filter(#[from] regex::Error),

    #[error(transparent)]
    Sink(#[from] sink::SinkError),

    #[error("could not build the HTTP fetcher: {0}")]
    Fetcher(#[from] fetcher::FetchError),
}

/// Totals reported at the end of a run.
#[derive(Debug)]
pub struct HarvestSummary {
    pub pages_visited: usize,
    pub urls_collected: usize,
    pub records_written: usize,
    pub failures: usize,
}

/// A configured harvest: catalog traversal followed by detail extraction.
pub struct Harvest {
    config: HarvestConfig,
}

impl Harvest {
    pub fn new(config: HarvestConfig) -> Self {
        Self { config }
    }

    /// Runs both phases to completion.
    ///
    /// Phase 1 owns the browser session and yields the full URL list before
    /// phase 2 starts; the output sink is opened first so a bad destination
    /// fails the run before any crawling happens.
    pub async fn run(self) -> Result<HarvestSummary, HarvestError> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let sink = sink::RecordSink::open(&config.output_path)?;

        let driver = driver::webdriver::connect(&config.webdriver_url)
            .await
            .ok_or_else(|| HarvestError::DriverSession(config.webdriver_url.clone()))?;
        let crawler = crawlers::CatalogCrawler::new(driver, &config)?;
        let outcome = crawler.traverse().await?;
        ::log::info!(
            "finished collecting: {} listing urls from {} catalog pages",
            outcome.urls.len(),
            outcome.pages_visited
        );

        ::log::info!("now extracting the collected listing pages");
        let fetcher = fetcher::HttpFetcher::new(&config.user_agent)?;
        let pipeline = pipeline::DetailPipeline::new(
            fetcher,
            sink,
            config.record_report_interval,
            config.max_concurrency,
        );
        let urls_collected = outcome.urls.len();
        let summary = pipeline.run(outcome.urls).await?;

        Ok(HarvestSummary {
            pages_visited: outcome.pages_visited,
            urls_collected,
            records_written: summary.records_written,
            failures: summary.failures,
        })
    }
}
