use crate::crawlers::LISTING_LINK_SELECTOR;
use crate::driver::{Condition, DriverError, PageDriver};
use std::time::Duration;

/// Collects the listing URLs rendered on the current catalog page.
///
/// Waits up to `wait` for the first anchors to appear, then reads every
/// anchor's href in one pass. Anchors without a target are skipped. When a
/// reference goes stale mid-read the rest of the batch is discarded: an
/// under-collected page is preferable to aborting the crawl, and no re-query
/// is attempted for this page.
pub async fn collect_current_page<D: PageDriver>(driver: &mut D, wait: Duration) -> Vec<String> {
    if !driver
        .wait_until(Condition::Present(LISTING_LINK_SELECTOR), wait)
        .await
    {
        ::log::debug!("no listing anchors appeared within {:?}", wait);
        return Vec::new();
    }

    let handles = match driver.find_all(LISTING_LINK_SELECTOR).await {
        Ok(handles) => handles,
        Err(e) => {
            ::log::warn!("listing anchor query failed: {}", e);
            return Vec::new();
        }
    };

    let mut links = Vec::with_capacity(handles.len());
    for handle in &handles {
        match driver.attr(handle, "href").await {
            Ok(Some(href)) if !href.is_empty() => links.push(href),
            Ok(_) => {} // anchor without a target, skip
            Err(DriverError::Stale) => {
                ::log::debug!(
                    "anchor batch went stale after {} of {} links, keeping the partial page",
                    links.len(),
                    handles.len()
                );
                break;
            }
            Err(e) => {
                ::log::warn!("failed to read a listing link: {}", e);
            }
        }
    }
    links
}
