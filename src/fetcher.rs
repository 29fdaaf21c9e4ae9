use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Bound on a single listing-page request, connect through body.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from fetching a listing document.
///
/// These never abort the batch: the pipeline records them as per-listing
/// failures and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Capability interface for fetching a listing page as a decoded document body.
///
/// The returned future is `Send` so fetches can run on pipeline worker tasks.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP-backed fetcher for listing detail pages.
///
/// Detail pages render server-side, so no browser session is needed here; a
/// plain GET with the configured user agent is enough.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        // Decodes with the server-declared charset, falling back to UTF-8
        Ok(response.text().await?)
    }
}
