//! Step data model
//!
//! A step is one declarative instruction (action + locator + value) in a
//! keyword-driven scenario. Sequences preserve file order; duplicate
//! steps are legal and execute each time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// Action keyword understood by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Navigate to the URL in `value`
    OpenUrl,
    /// Suspend execution for `value` seconds (default 1.0)
    Sleep,
    /// Resolve an element and click it
    Click,
    /// Resolve an element, clear it, and type `value` into it
    EnterText,
    /// Resolve an element and require its text to contain `value`
    AssertText,
    /// Require the page title to contain `value`
    AssertTitle,
    /// Scroll the window by `value` pixels (`"dy"` or `"dx,dy"`)
    ScrollBy,
    /// Scroll the window to `value` (`"dx,dy"`, default top)
    ScrollTo,
    /// Set the page zoom to `value` percent (default 100)
    Zoom,
}

impl Action {
    /// Keyword as written in step files
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::OpenUrl => "open_url",
            Action::Sleep => "sleep",
            Action::Click => "click",
            Action::EnterText => "enter_text",
            Action::AssertText => "assert_text",
            Action::AssertTitle => "assert_title",
            Action::ScrollBy => "scroll_by",
            Action::ScrollTo => "scroll_to",
            Action::Zoom => "zoom",
        }
    }

    /// Whether this action resolves an element and therefore requires a
    /// non-empty `locator_type` and `locator`
    pub fn requires_locator(&self) -> bool {
        matches!(self, Action::Click | Action::EnterText | Action::AssertText)
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open_url" => Ok(Action::OpenUrl),
            "sleep" => Ok(Action::Sleep),
            "click" => Ok(Action::Click),
            "enter_text" => Ok(Action::EnterText),
            "assert_text" => Ok(Action::AssertText),
            "assert_title" => Ok(Action::AssertTitle),
            "scroll_by" => Ok(Action::ScrollBy),
            "scroll_to" => Ok(Action::ScrollTo),
            "zoom" => Ok(Action::Zoom),
            other => Err(Error::UnsupportedAction(format!("'{other}'"))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Element location strategy, mirroring the WebDriver strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    Id,
    Css,
    Xpath,
    LinkText,
    PartialLinkText,
    Name,
}

impl LocatorKind {
    /// Parse a step-file locator type name (case-insensitive).
    ///
    /// An unrecognized name is a hard error, never a silent no-op.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(LocatorKind::Id),
            "css" => Ok(LocatorKind::Css),
            "xpath" => Ok(LocatorKind::Xpath),
            "link_text" => Ok(LocatorKind::LinkText),
            "partial_link_text" => Ok(LocatorKind::PartialLinkText),
            "name" => Ok(LocatorKind::Name),
            other => Err(Error::Locator(format!("Unsupported locator type: '{other}'"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocatorKind::Id => "id",
            LocatorKind::Css => "css",
            LocatorKind::Xpath => "xpath",
            LocatorKind::LinkText => "link_text",
            LocatorKind::PartialLinkText => "partial_link_text",
            LocatorKind::Name => "name",
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (kind, string) pair identifying a DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub kind: LocatorKind,
    pub target: String,
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.kind, self.target)
    }
}

/// One declarative instruction in a keyword-driven scenario.
///
/// The locator type stays a raw string until an element step executes;
/// it is resolved through the kind lookup table at that point, so a step
/// with an unknown locator type fails before any element resolution is
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub action: Action,
    pub locator_type: String,
    pub locator: String,
    pub value: String,
}

impl Step {
    /// Resolve the raw locator fields into a typed [`Locator`].
    ///
    /// Errors if the step carries no locator or the kind is unknown.
    pub fn resolve_locator(&self) -> Result<Locator> {
        if self.locator_type.is_empty() || self.locator.is_empty() {
            return Err(Error::Locator(format!(
                "Missing locator for action {}",
                self.action
            )));
        }
        Ok(Locator {
            kind: LocatorKind::parse(&self.locator_type)?,
            target: self.locator.clone(),
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::OpenUrl => write!(f, "open_url {}", self.value),
            Action::Sleep => {
                let secs = if self.value.is_empty() { "1" } else { &self.value };
                write!(f, "sleep {secs}")
            }
            action if action.requires_locator() => {
                if self.value.is_empty() {
                    write!(f, "{} {}='{}'", action, self.locator_type, self.locator)
                } else {
                    write!(
                        f,
                        "{} {}='{}' \"{}\"",
                        action, self.locator_type, self.locator, self.value
                    )
                }
            }
            action => write!(f, "{} {}", action, self.value),
        }
    }
}

/// An ordered sequence of steps, consumed linearly by the runner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepSequence(Vec<Step>);

impl StepSequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
