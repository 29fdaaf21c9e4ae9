use clap::Parser;
use room_harvest::HarvestConfig;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "room-harvest")]
#[command(about = "Harvests rental listings from a paginated catalog into newline-delimited JSON")]
#[command(version)]
pub struct Args {
    /// Catalog URL to start from (required unless --config provides one)
    pub catalog_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,

    /// Destination file for harvested records
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Progress notification interval, in catalog pages
    #[arg(long)]
    pub page_report_interval: Option<usize>,

    /// Progress notification interval, in extracted records
    #[arg(long)]
    pub record_report_interval: Option<usize>,

    /// Upper bound on element waits, in seconds
    #[arg(long)]
    pub element_wait_timeout: Option<u64>,

    /// Pause after each catalog page transition, in seconds
    #[arg(long)]
    pub inter_page_delay: Option<u64>,

    /// Number of concurrent listing-page fetches
    #[arg(short = 'n', long)]
    pub concurrency: Option<usize>,
}

impl Args {
    /// Builds the run configuration: config file first, then CLI overrides.
    pub fn into_config(self) -> Result<HarvestConfig, Box<dyn Error>> {
        let mut config = match (&self.config, &self.catalog_url) {
            (Some(path), _) => HarvestConfig::from_file(path)?,
            (None, Some(url)) => HarvestConfig::new(url),
            (None, None) => return Err("a catalog URL or --config file is required".into()),
        };

        if let Some(url) = self.catalog_url {
            config.catalog_url = url;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(url) = self.webdriver_url {
            config.webdriver_url = url;
        }
        if let Some(interval) = self.page_report_interval {
            config.page_report_interval = interval;
        }
        if let Some(interval) = self.record_report_interval {
            config.record_report_interval = interval;
        }
        if let Some(timeout) = self.element_wait_timeout {
            config.element_wait_timeout = timeout;
        }
        if let Some(delay) = self.inter_page_delay {
            config.inter_page_delay = delay;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }

        Ok(config)
    }
}
