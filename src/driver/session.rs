//! WebDriver-backed browser session
//!
//! Wraps a thirtyfour session with the handle surface the runner needs,
//! plus environment-aware session construction: remote grid vs local
//! driver, CI headless flags, and the browser matrix for the current
//! environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};

use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::keyword::step::{Locator, LocatorKind};

use super::Handle;

/// WebDriver server used when neither flag, environment, nor config
/// names one (a locally running driver or grid)
const DEFAULT_SERVER_URL: &str = "http://localhost:4444";

/// Browsers the runner can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Edge => "edge",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            "edge" => Ok(BrowserKind::Edge),
            other => Err(Error::Session(format!("Unsupported browser: '{other}'"))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Browsers to target in the current environment.
///
/// Jenkins agents only carry Chrome; everywhere else Chrome and Edge are
/// both exercised.
pub fn default_browsers() -> Vec<BrowserKind> {
    let jenkins = std::env::var_os("JENKINS_HOME").is_some()
        || std::env::var_os("BUILD_NUMBER").is_some();
    browsers_for(jenkins)
}

fn browsers_for(jenkins: bool) -> Vec<BrowserKind> {
    if jenkins {
        vec![BrowserKind::Chrome]
    } else {
        vec![BrowserKind::Chrome, BrowserKind::Edge]
    }
}

/// Whether we are running under CI (GitHub Actions sets `CI=true`)
pub fn is_ci() -> bool {
    std::env::var("CI")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Options for establishing a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub browser: BrowserKind,
    pub server_url: String,
    pub headless: bool,
    pub page_load: Duration,
    pub script: Duration,
    pub implicit_wait: Duration,
}

impl SessionOptions {
    /// Resolve options from config, flags, and environment.
    ///
    /// Server URL precedence: `--remote-url` flag, then
    /// `SELENIUM_REMOTE_URL`, then the config file, then the localhost
    /// default. Headless mode follows CI detection.
    pub fn resolve(
        config: &Config,
        browser: BrowserKind,
        remote_url: Option<&str>,
    ) -> Self {
        let server_url = remote_url
            .map(str::to_string)
            .or_else(|| std::env::var("SELENIUM_REMOTE_URL").ok())
            .or_else(|| config.remote.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Self {
            browser,
            server_url,
            headless: is_ci(),
            page_load: Duration::from_secs(config.timeouts.page_load_secs),
            script: Duration::from_secs(config.timeouts.script_secs),
            implicit_wait: Duration::from_secs(config.timeouts.implicit_wait_secs),
        }
    }
}

/// A live WebDriver session
pub struct WebSession {
    driver: WebDriver,
}

impl WebSession {
    /// Connect to the WebDriver server and configure the session.
    ///
    /// Timeouts from the config are installed on the server side here, so
    /// element lookups inherit the implicit wait without the runner ever
    /// polling.
    pub async fn connect(options: &SessionOptions) -> Result<Self> {
        tracing::debug!(
            browser = options.browser.name(),
            server = %options.server_url,
            headless = options.headless,
            "connecting"
        );

        let driver = match options.browser {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if options.headless {
                    caps.set_headless().map_err(session_err)?;
                    caps.set_no_sandbox().map_err(session_err)?;
                    caps.set_disable_dev_shm_usage().map_err(session_err)?;
                    caps.set_disable_gpu().map_err(session_err)?;
                    caps.add_arg("--window-size=1920,1080")
                        .map_err(session_err)?;
                }
                WebDriver::new(&options.server_url, caps).await
            }
            BrowserKind::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if options.headless {
                    caps.set_headless().map_err(session_err)?;
                }
                WebDriver::new(&options.server_url, caps).await
            }
            BrowserKind::Edge => {
                let caps = DesiredCapabilities::edge();
                WebDriver::new(&options.server_url, caps).await
            }
        }
        .map_err(|e| {
            Error::Session(format!(
                "Failed to start {} session at {}: {}",
                options.browser, options.server_url, e
            ))
        })?;

        driver
            .set_page_load_timeout(options.page_load)
            .await
            .map_err(session_err)?;
        driver
            .set_script_timeout(options.script)
            .await
            .map_err(session_err)?;
        driver
            .set_implicit_wait_timeout(options.implicit_wait)
            .await
            .map_err(session_err)?;

        if !options.headless {
            // local runs get a maximized window for visibility
            driver.maximize_window().await.map_err(session_err)?;
        }

        tracing::info!(browser = options.browser.name(), "session established");
        Ok(Self { driver })
    }

    /// End the session and close the browser
    pub async fn quit(self) -> Result<()> {
        self.driver
            .quit()
            .await
            .map_err(|e| Error::Session(format!("Failed to quit session: {e}")))
    }

    async fn find(&self, locator: &Locator) -> Result<WebElement> {
        self.driver
            .find(to_by(locator))
            .await
            .map_err(|e| Error::element_not_found(&locator.to_string(), &e.to_string()))
    }
}

/// Fixed mapping from locator kinds to WebDriver strategies
fn to_by(locator: &Locator) -> By {
    let target = locator.target.as_str();
    match locator.kind {
        LocatorKind::Id => By::Id(target),
        LocatorKind::Css => By::Css(target),
        LocatorKind::Xpath => By::XPath(target),
        LocatorKind::LinkText => By::LinkText(target),
        LocatorKind::PartialLinkText => By::PartialLinkText(target),
        LocatorKind::Name => By::Name(target),
    }
}

fn session_err(e: WebDriverError) -> Error {
    Error::Session(e.to_string())
}

#[async_trait]
impl Handle for WebSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| Error::navigation(url, &e.to_string()))
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let element = self.find(locator).await?;
        element
            .click()
            .await
            .map_err(|e| Error::Session(format!("Click on {locator} failed: {e}")))
    }

    async fn enter_text(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find(locator).await?;
        element
            .clear()
            .await
            .map_err(|e| Error::Session(format!("Clearing {locator} failed: {e}")))?;
        element
            .send_keys(text)
            .await
            .map_err(|e| Error::Session(format!("Typing into {locator} failed: {e}")))
    }

    async fn text_of(&self, locator: &Locator) -> Result<String> {
        let element = self.find(locator).await?;
        element
            .text()
            .await
            .map_err(|e| Error::Session(format!("Reading text of {locator} failed: {e}")))
    }

    async fn title(&self) -> Result<String> {
        self.driver
            .title()
            .await
            .map_err(|e| Error::Session(format!("Reading page title failed: {e}")))
    }

    async fn execute_js(&self, script: &str) -> Result<()> {
        self.driver
            .execute(script, Vec::new())
            .await
            .map(|_| ())
            .map_err(|e| Error::Script(e.to_string()))
    }
}
