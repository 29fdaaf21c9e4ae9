use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// URL of the first catalog index page
    pub catalog_url: String,

    /// Destination for harvested records (newline-delimited JSON)
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Emit a progress notification every this many catalog pages
    #[serde(default = "default_page_report_interval")]
    pub page_report_interval: usize,

    /// Emit a progress notification every this many extracted records
    #[serde(default = "default_record_report_interval")]
    pub record_report_interval: usize,

    /// Upper bound, in seconds, on waits for page elements and conditions
    #[serde(default = "default_element_wait_timeout")]
    pub element_wait_timeout: u64,

    /// Fixed pause, in seconds, after each page transition
    #[serde(default = "default_inter_page_delay")]
    pub inter_page_delay: u64,

    /// Maximum number of concurrent listing-page fetches
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Regex patterns collected listing URLs must match (empty means all)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for listing URLs to drop (take precedence over includes)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// User agent sent with listing-page fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("room_data.ndjson")
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_report_interval() -> usize {
    10
}

fn default_record_report_interval() -> usize {
    25
}

fn default_element_wait_timeout() -> u64 {
    10
}

fn default_inter_page_delay() -> u64 {
    2
}

fn default_max_concurrency() -> usize {
    4
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

impl HarvestConfig {
    /// Create a new configuration with default values
    pub fn new(catalog_url: &str) -> Self {
        Self {
            catalog_url: catalog_url.to_string(),
            output_path: default_output_path(),
            webdriver_url: default_webdriver_url(),
            page_report_interval: default_page_report_interval(),
            record_report_interval: default_record_report_interval(),
            element_wait_timeout: default_element_wait_timeout(),
            inter_page_delay: default_inter_page_delay(),
            max_concurrency: default_max_concurrency(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Bound on element/condition waits
    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_timeout)
    }

    /// Settling pause after a page transition
    pub fn page_delay(&self) -> Duration {
        Duration::from_secs(self.inter_page_delay)
    }
}
