//! Browser handle abstraction
//!
//! The runner drives a browser only through the [`Handle`] trait. The
//! WebDriver-backed implementation lives in [`session`]; [`mock`]
//! provides a scripted in-memory implementation for tests.

pub mod mock;
pub mod session;

use async_trait::async_trait;

use crate::common::Result;
use crate::keyword::step::Locator;

pub use session::{BrowserKind, SessionOptions, WebSession};

/// Capabilities the runner needs from a browser-automation session.
///
/// Each method performs one complete interaction. Element resolution and
/// any readiness waiting are the implementor's concern; the runner never
/// polls.
#[async_trait]
pub trait Handle: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Resolve an element and click it
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Resolve an element, clear its content, and type `text` into it
    async fn enter_text(&self, locator: &Locator, text: &str) -> Result<()>;

    /// Resolve an element and return its visible text
    async fn text_of(&self, locator: &Locator) -> Result<String>;

    /// Current page title
    async fn title(&self) -> Result<String>;

    /// Run a script in the page
    async fn execute_js(&self, script: &str) -> Result<()>;
}
