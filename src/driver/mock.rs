//! In-memory mock handle for tests
//!
//! Records every invocation in order so tests can assert call sequences
//! and the fail-fast guarantee without a browser. Element texts, missing
//! elements, and the page title are scripted per test.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::common::{Error, Result};
use crate::keyword::step::Locator;

use super::Handle;

#[derive(Debug, Default)]
pub struct MockHandle {
    calls: Mutex<Vec<String>>,
    texts: HashMap<String, String>,
    missing: HashSet<String>,
    title: String,
}

impl MockHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text a locator target resolves to
    pub fn with_text(mut self, target: &str, text: &str) -> Self {
        self.texts.insert(target.to_string(), text.to_string());
        self
    }

    /// Mark a locator target as unresolvable
    pub fn with_missing(mut self, target: &str) -> Self {
        self.missing.insert(target.to_string());
        self
    }

    /// Set the page title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Invocations recorded so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn resolve(&self, locator: &Locator) -> Result<()> {
        if self.missing.contains(locator.target.as_str()) {
            Err(Error::element_not_found(
                &locator.to_string(),
                "no such element",
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Handle for MockHandle {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate {url}"));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        self.record(format!("click {locator}"));
        self.resolve(locator)
    }

    async fn enter_text(&self, locator: &Locator, text: &str) -> Result<()> {
        self.record(format!("enter_text {locator} \"{text}\""));
        self.resolve(locator)
    }

    async fn text_of(&self, locator: &Locator) -> Result<String> {
        self.record(format!("text_of {locator}"));
        self.resolve(locator)?;
        Ok(self
            .texts
            .get(locator.target.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn title(&self) -> Result<String> {
        self.record("title".to_string());
        Ok(self.title.clone())
    }

    async fn execute_js(&self, script: &str) -> Result<()> {
        self.record(format!("execute_js {script}"));
        Ok(())
    }
}
