use crate::driver::{Condition, DriverError, PageDriver};
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// How often a bounded wait re-checks its condition.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// `PageDriver` implementation backed by a live WebDriver session.
pub struct RenderedPage {
    client: Client,
}

impl RenderedPage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn holds(&mut self, condition: Condition<'_>) -> bool {
        match condition {
            Condition::Present(selector) => {
                self.client.find(Locator::Css(selector)).await.is_ok()
            }
            Condition::Clickable(selector) => {
                match self.client.find(Locator::Css(selector)).await {
                    Ok(element) => {
                        element.is_displayed().await.unwrap_or(false)
                            && element.is_enabled().await.unwrap_or(false)
                    }
                    Err(_) => false,
                }
            }
            Condition::Hidden(selector) => {
                match self.client.find(Locator::Css(selector)).await {
                    Ok(element) => !element.is_displayed().await.unwrap_or(false),
                    Err(e) if e.is_no_such_element() => true,
                    Err(_) => false,
                }
            }
        }
    }
}

impl PageDriver for RenderedPage {
    type Handle = Element;

    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| map_cmd_error(e, url))
    }

    async fn wait_until(&mut self, condition: Condition<'_>, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.holds(condition).await {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                ::log::debug!("condition on {:?} did not hold within {:?}", condition.selector(), timeout);
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Element>, DriverError> {
        self.client
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| map_cmd_error(e, selector))
    }

    async fn find_last(
        &mut self,
        group_selector: &str,
        tag: &str,
    ) -> Result<Option<Element>, DriverError> {
        let group = match self.client.find(Locator::Css(group_selector)).await {
            Ok(element) => element,
            Err(e) if e.is_no_such_element() => return Ok(None),
            Err(e) => return Err(map_cmd_error(e, group_selector)),
        };
        let mut children = group
            .find_all(Locator::Css(tag))
            .await
            .map_err(|e| map_cmd_error(e, tag))?;
        Ok(children.pop())
    }

    async fn click(&mut self, handle: &Element) -> Result<(), DriverError> {
        handle.click().await.map_err(|e| map_cmd_error(e, "click target"))
    }

    async fn attr(
        &mut self,
        handle: &Element,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        handle.attr(name).await.map_err(|e| map_cmd_error(e, name))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        self.client
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await
            .map(|_| ())
            .map_err(|e| map_cmd_error(e, "scroll"))
    }

    async fn close(self) -> Result<(), DriverError> {
        self.client
            .close()
            .await
            .map_err(|e| map_cmd_error(e, "session close"))
    }
}

/// Connects to a WebDriver server, trying common fallback ports when the
/// configured URL is unreachable.
pub async fn connect(webdriver_url: &str) -> Option<RenderedPage> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("connected to WebDriver at {}", webdriver_url);
            return Some(RenderedPage::new(client));
        }
        Err(e) => {
            ::log::error!("failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // Selenium / geckodriver default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }
        ::log::info!("trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("connected to fallback WebDriver at {}", url);
            return Some(RenderedPage::new(client));
        }
    }

    ::log::error!("failed to connect to any WebDriver server");
    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}

/// Translates fantoccini command failures into the capability error vocabulary.
fn map_cmd_error(err: CmdError, subject: &str) -> DriverError {
    match err {
        CmdError::WaitTimeout => DriverError::Timeout(subject.to_string()),
        CmdError::Standard(ref failure) => match failure.error {
            ErrorStatus::NoSuchElement => DriverError::NotFound(subject.to_string()),
            ErrorStatus::StaleElementReference => DriverError::Stale,
            ErrorStatus::ElementClickIntercepted => DriverError::ClickBlocked,
            ErrorStatus::Timeout => DriverError::Timeout(subject.to_string()),
            _ => DriverError::Command(err.to_string()),
        },
        other => DriverError::Command(other.to_string()),
    }
}
