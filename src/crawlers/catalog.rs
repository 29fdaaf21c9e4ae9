use crate::config::HarvestConfig;
use crate::crawlers::{
    COOKIE_ACCEPT_SELECTOR, LOADING_SPINNER_SELECTOR, PAGINATION_GROUP_SELECTOR, links,
};
use crate::driver::{Condition, DriverError, PageDriver};
use crate::filter::ListingFilter;
use std::collections::HashSet;

/// Result of a full catalog traversal.
#[derive(Debug)]
pub struct TraversalOutcome {
    /// Distinct listing URLs in discovery order.
    pub urls: Vec<String>,

    /// Number of catalog pages visited.
    pub pages_visited: usize,
}

/// Walks the paginated catalog page by page, collecting listing URLs.
///
/// Owns the rendered-page session for the whole of phase 1; `traverse`
/// consumes the crawler and closes the session on every exit path.
///
/// The loop terminates when the pagination control is absent or disabled
/// (the normal end-of-catalog signal) or when activating it fails twice in a
/// row. Each successful transition strictly advances the page index, so the
/// traversal is bounded by the catalog length.
pub struct CatalogCrawler<D: PageDriver> {
    driver: D,
    config: HarvestConfig,
    filter: ListingFilter,
}

impl<D: PageDriver> CatalogCrawler<D> {
    pub fn new(driver: D, config: &HarvestConfig) -> Result<Self, regex::Error> {
        let filter = ListingFilter::new(&config.include_patterns, &config.exclude_patterns)?;
        Ok(Self {
            driver,
            config: config.clone(),
            filter,
        })
    }

    /// Runs the traversal to completion and releases the driver session.
    pub async fn traverse(mut self) -> Result<TraversalOutcome, DriverError> {
        let outcome = self.collect_catalog().await;
        if let Err(e) = self.driver.close().await {
            ::log::warn!("failed to close the rendered-page session: {}", e);
        }
        outcome
    }

    async fn collect_catalog(&mut self) -> Result<TraversalOutcome, DriverError> {
        self.driver.navigate(&self.config.catalog_url).await?;
        self.dismiss_cookie_banner().await;
        // Lazily-rendered tiles only load once the page has been scrolled
        if let Err(e) = self.driver.scroll_to_bottom().await {
            ::log::warn!("initial scroll failed: {}", e);
        }

        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        let mut page = 1usize;

        loop {
            let page_links =
                links::collect_current_page(&mut self.driver, self.config.element_wait()).await;
            ::log::debug!("catalog page {} yielded {} anchors", page, page_links.len());

            for link in page_links {
                if !self.filter.keep(&link) {
                    continue;
                }
                let normalized = self.filter.normalize(&link);
                if seen.insert(normalized.clone()) {
                    urls.push(normalized);
                }
            }

            if !self.advance().await {
                break;
            }
            if self.config.page_report_interval > 0 && page % self.config.page_report_interval == 0
            {
                ::log::info!("collected listing urls from {} catalog pages", page);
            }
            page += 1;
            // Fixed settling pause so asynchronous content finishes rendering
            tokio::time::sleep(self.config.page_delay()).await;
        }

        ::log::info!(
            "catalog traversal finished: {} pages, {} distinct listing urls",
            page,
            urls.len()
        );
        Ok(TraversalOutcome {
            urls,
            pages_visited: page,
        })
    }

    /// Clicks through to the next page. Returns false when the catalog is
    /// exhausted or the control could not be activated.
    async fn advance(&mut self) -> bool {
        if !self.next_page_enabled().await {
            return false;
        }

        if !self
            .driver
            .wait_until(
                Condition::Clickable(PAGINATION_GROUP_SELECTOR),
                self.config.element_wait(),
            )
            .await
        {
            ::log::debug!("pagination control never became clickable, treating as end of catalog");
            return false;
        }

        let button = match self
            .driver
            .find_last(PAGINATION_GROUP_SELECTOR, "button")
            .await
        {
            Ok(Some(button)) => button,
            Ok(None) => return false,
            Err(e) => {
                ::log::debug!("pagination control lookup failed: {}", e);
                return false;
            }
        };

        match self.driver.click(&button).await {
            Ok(()) => true,
            Err(DriverError::ClickBlocked) => {
                ::log::debug!("next-page click intercepted, waiting for the loading indicator");
                self.driver
                    .wait_until(
                        Condition::Hidden(LOADING_SPINNER_SELECTOR),
                        self.config.element_wait(),
                    )
                    .await;
                match self.driver.click(&button).await {
                    Ok(()) => true,
                    Err(e) => {
                        ::log::warn!("next-page activation failed twice, stopping: {}", e);
                        false
                    }
                }
            }
            Err(e) => {
                ::log::warn!("failed to activate the next-page control: {}", e);
                false
            }
        }
    }

    /// Whether an enabled next-page control exists. Absence, lookup failure
    /// and a `disabled` attribute all mean the catalog has no more pages.
    async fn next_page_enabled(&mut self) -> bool {
        match self
            .driver
            .find_last(PAGINATION_GROUP_SELECTOR, "button")
            .await
        {
            Ok(Some(button)) => match self.driver.attr(&button, "disabled").await {
                Ok(value) => value.is_none(),
                Err(e) => {
                    ::log::debug!("could not read the next-page state: {}", e);
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                ::log::debug!("no pagination control found: {}", e);
                false
            }
        }
    }

    /// One-shot consent dismissal; a missing prompt is the common case and
    /// not an error.
    async fn dismiss_cookie_banner(&mut self) {
        if !self
            .driver
            .wait_until(
                Condition::Clickable(COOKIE_ACCEPT_SELECTOR),
                self.config.element_wait(),
            )
            .await
        {
            ::log::info!("no cookie consent prompt, continuing");
            return;
        }

        match self.driver.find_all(COOKIE_ACCEPT_SELECTOR).await {
            Ok(buttons) if !buttons.is_empty() => {
                match self.driver.click(&buttons[0]).await {
                    Ok(()) => ::log::info!("cookie consent dismissed"),
                    Err(e) => ::log::warn!("failed to dismiss cookie consent: {}", e),
                }
            }
            _ => ::log::info!("no cookie consent prompt, continuing"),
        }
    }
}
