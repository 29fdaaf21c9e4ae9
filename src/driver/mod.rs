pub mod webdriver;

pub use webdriver::RenderedPage;

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced at the rendered-page capability boundary.
///
/// Most of these are recoverable by the caller: `NotFound` and `Timeout` on the
/// pagination control signal the end of the catalog, `Stale` truncates a
/// collection batch, and `ClickBlocked` triggers a single wait-and-retry.
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matched the selector.
    #[error("no element matched {0:?}")]
    NotFound(String),

    /// The element reference was invalidated by a re-render.
    #[error("element reference went stale")]
    Stale,

    /// The click was intercepted by an overlapping element.
    #[error("click intercepted by an overlapping element")]
    ClickBlocked,

    /// A bounded wait elapsed without its condition holding.
    #[error("timed out waiting on {0:?}")]
    Timeout(String),

    /// Any other WebDriver command failure.
    #[error("driver command failed: {0}")]
    Command(String),
}

/// A page condition that can be waited on.
#[derive(Debug, Clone, Copy)]
pub enum Condition<'a> {
    /// At least one element matching the selector exists.
    Present(&'a str),
    /// An element matching the selector exists, is displayed and enabled.
    Clickable(&'a str),
    /// No displayed element matches the selector.
    Hidden(&'a str),
}

impl Condition<'_> {
    /// The selector this condition watches.
    pub fn selector(&self) -> &str {
        match self {
            Condition::Present(s) | Condition::Clickable(s) | Condition::Hidden(s) => s,
        }
    }
}

/// Capability interface over a live, queryable rendered page.
///
/// The traversal engine owns exactly one implementation of this for the duration
/// of phase 1. Element handles are only valid against the driver that produced
/// them and may go stale at any time; reads report that as `DriverError::Stale`.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    type Handle;

    /// Navigate the session to `url` and wait for the document to load.
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Wait until `condition` holds, up to `timeout`. Returns whether it held.
    async fn wait_until(&mut self, condition: Condition<'_>, timeout: Duration) -> bool;

    /// All elements currently matching `selector`, in document order.
    async fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Handle>, DriverError>;

    /// The last `tag` element inside the element matched by `group_selector`,
    /// or `None` when either lookup comes up empty.
    async fn find_last(
        &mut self,
        group_selector: &str,
        tag: &str,
    ) -> Result<Option<Self::Handle>, DriverError>;

    /// Simulate a click; fails with `DriverError::ClickBlocked` when intercepted.
    async fn click(&mut self, handle: &Self::Handle) -> Result<(), DriverError>;

    /// Read an attribute value, `None` when the attribute is absent.
    async fn attr(
        &mut self,
        handle: &Self::Handle,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Scroll the viewport to the bottom of the document.
    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError>;

    /// End the session.
    async fn close(self) -> Result<(), DriverError>;
}
