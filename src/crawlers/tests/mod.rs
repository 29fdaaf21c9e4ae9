
use crate::crawlers::{COOKIE_ACCEPT_SELECTOR, LISTING_LINK_SELECTOR, PAGINATION_GROUP_SELECTOR};
use crate::driver::{Condition, DriverError, PageDriver};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One scripted catalog page for the stub driver.
#[derive(Debug, Clone, Default)]
pub struct StubPage {
    /// href per rendered anchor; `None` is an anchor without a target
    pub links: Vec<Option<String>>,

    /// Anchor index from which reads fail with a stale reference
    pub stale_from: Option<usize>,

    /// Whether the last pagination button is enabled on this page
    pub next_enabled: bool,
}

pub fn page(links: &[&str], next_enabled: bool) -> StubPage {
    StubPage {
        links: links.iter().map(|l| Some(l.to_string())).collect(),
        stale_from: None,
        next_enabled,
    }
}

/// Call counters that survive the driver being consumed by `traverse`.
#[derive(Clone, Default)]
pub struct Counters {
    pub collect_calls: Arc<AtomicUsize>,
    pub click_calls: Arc<AtomicUsize>,
    pub consent_clicks: Arc<AtomicUsize>,
    pub spinner_waits: Arc<AtomicUsize>,
}

#[derive(Debug, Clone)]
pub enum StubHandle {
    Anchor(usize),
    NextButton,
    Consent,
}

/// Scripted `PageDriver` used to exercise the traversal engine and the link
/// collector without a browser.
pub struct StubDriver {
    pub pages: Vec<StubPage>,
    pub current: usize,
    /// Number of upcoming next-page clicks that get intercepted
    pub blocked_clicks: usize,
    pub pagination_present: bool,
    pub has_consent_prompt: bool,
    pub counters: Counters,
}

impl StubDriver {
    pub fn new(pages: Vec<StubPage>) -> Self {
        Self {
            pages,
            current: 0,
            blocked_clicks: 0,
            pagination_present: true,
            has_consent_prompt: false,
            counters: Counters::default(),
        }
    }

    fn page(&self) -> &StubPage {
        &self.pages[self.current]
    }
}

impl PageDriver for StubDriver {
    type Handle = StubHandle;

    async fn navigate(&mut self, _url: &str) -> Result<(), DriverError> {
        Ok(())
    }

    async fn wait_until(&mut self, condition: Condition<'_>, _timeout: Duration) -> bool {
        match condition {
            Condition::Hidden(_) => {
                self.counters.spinner_waits.fetch_add(1, Ordering::SeqCst);
                true
            }
            Condition::Clickable(COOKIE_ACCEPT_SELECTOR) => self.has_consent_prompt,
            Condition::Present(LISTING_LINK_SELECTOR) => !self.page().links.is_empty(),
            _ => true,
        }
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<StubHandle>, DriverError> {
        if selector == LISTING_LINK_SELECTOR {
            self.counters.collect_calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..self.page().links.len()).map(StubHandle::Anchor).collect())
        } else if selector == COOKIE_ACCEPT_SELECTOR && self.has_consent_prompt {
            Ok(vec![StubHandle::Consent])
        } else {
            Ok(Vec::new())
        }
    }

    async fn find_last(
        &mut self,
        group_selector: &str,
        _tag: &str,
    ) -> Result<Option<StubHandle>, DriverError> {
        if group_selector == PAGINATION_GROUP_SELECTOR && self.pagination_present {
            Ok(Some(StubHandle::NextButton))
        } else {
            Ok(None)
        }
    }

    async fn click(&mut self, handle: &StubHandle) -> Result<(), DriverError> {
        match handle {
            StubHandle::NextButton => {
                self.counters.click_calls.fetch_add(1, Ordering::SeqCst);
                if self.blocked_clicks > 0 {
                    self.blocked_clicks -= 1;
                    return Err(DriverError::ClickBlocked);
                }
                if self.current + 1 < self.pages.len() {
                    self.current += 1;
                    Ok(())
                } else {
                    Err(DriverError::Command("clicked past the last page".to_string()))
                }
            }
            StubHandle::Consent => {
                self.counters.consent_clicks.fetch_add(1, Ordering::SeqCst);
                self.has_consent_prompt = false;
                Ok(())
            }
            StubHandle::Anchor(_) => Ok(()),
        }
    }

    async fn attr(
        &mut self,
        handle: &StubHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        match handle {
            StubHandle::Anchor(index) => {
                let page = self.page();
                if page.stale_from.is_some_and(|from| *index >= from) {
                    return Err(DriverError::Stale);
                }
                Ok(page.links.get(*index).cloned().flatten())
            }
            StubHandle::NextButton if name == "disabled" => Ok(if self.page().next_enabled {
                None
            } else {
                Some("true".to_string())
            }),
            _ => Ok(None),
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn close(self) -> Result<(), DriverError> {
        Ok(())
    }
}
