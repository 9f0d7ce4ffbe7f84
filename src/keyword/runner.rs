//! Keyword step execution
//!
//! Translates each declarative step into one interaction with the
//! browser handle and executes sequences strictly in order, halting on
//! the first error (fail-fast). Element readiness is the handle's
//! concern: every step performs a single direct interaction call, with
//! no polling or retry here.

use std::time::Duration;

use colored::Colorize;

use crate::common::{Error, Result};
use crate::driver::Handle;

use super::step::{Action, Step, StepSequence};

/// A named step sequence ready to run
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    pub steps: StepSequence,
}

/// Outcome of one scenario run
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<Error>,
}

/// Execute a step sequence in order against the given handle.
///
/// The first failing step aborts the remaining sequence and its error is
/// returned wrapped with the step index and action keyword. No step is
/// retried.
pub async fn run(handle: &dyn Handle, steps: &StepSequence) -> Result<()> {
    for (idx, step) in steps.iter().enumerate() {
        let step_num = idx + 1;
        tracing::debug!(step = step_num, action = step.action.keyword(), "executing");
        execute_step(handle, step)
            .await
            .map_err(|e| Error::step_failed(step_num, step.action.keyword(), e))?;
    }
    Ok(())
}

/// Run a scenario with per-step progress output, capturing the outcome.
///
/// Step failures are folded into the report rather than propagated so
/// the caller can tear the session down and summarize multiple runs.
pub async fn run_scenario(handle: &dyn Handle, scenario: &Scenario) -> RunReport {
    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Running:".blue().bold(),
        scenario.name.white().bold()
    );

    for (idx, step) in scenario.steps.iter().enumerate() {
        let step_num = idx + 1;
        match execute_step(handle, step).await {
            Ok(()) => {
                println!(
                    "  {} Step {}: {}",
                    "✓".green(),
                    step_num,
                    step.to_string().dimmed()
                );
            }
            Err(e) => {
                println!("  {} Step {}: {} — {}", "✗".red(), step_num, step, e);
                return RunReport {
                    name: scenario.name.clone(),
                    passed: false,
                    steps_run: step_num,
                    steps_total,
                    error: Some(Error::step_failed(step_num, step.action.keyword(), e)),
                };
            }
        }
    }

    println!("{} {}", "✓".green().bold(), "Scenario passed".green().bold());

    RunReport {
        name: scenario.name.clone(),
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    }
}

/// Execute a single step against the handle
pub async fn execute_step(handle: &dyn Handle, step: &Step) -> Result<()> {
    match step.action {
        Action::OpenUrl => handle.navigate(&step.value).await,
        Action::Sleep => {
            tokio::time::sleep(sleep_duration(&step.value)?).await;
            Ok(())
        }
        Action::Click => {
            let locator = step.resolve_locator()?;
            handle.click(&locator).await
        }
        Action::EnterText => {
            let locator = step.resolve_locator()?;
            handle.enter_text(&locator, &step.value).await
        }
        Action::AssertText => {
            let locator = step.resolve_locator()?;
            let actual = handle.text_of(&locator).await?;
            if actual.contains(&step.value) {
                Ok(())
            } else {
                Err(Error::assertion(&step.value, &actual))
            }
        }
        Action::AssertTitle => {
            let actual = handle.title().await?;
            if actual.contains(&step.value) {
                Ok(())
            } else {
                Err(Error::assertion(&step.value, &actual))
            }
        }
        Action::ScrollBy => {
            let (dx, dy) = scroll_offsets(&step.value, None)?;
            handle
                .execute_js(&format!("window.scrollBy({dx}, {dy});"))
                .await
        }
        Action::ScrollTo => {
            let (dx, dy) = scroll_offsets(&step.value, Some((0.0, 0.0)))?;
            handle
                .execute_js(&format!("window.scrollTo({dx}, {dy});"))
                .await
        }
        Action::Zoom => {
            let percent = zoom_percent(&step.value)?;
            handle
                .execute_js(&format!("document.body.style.zoom='{percent}%';"))
                .await
        }
    }
}

/// Sleep durations default to 1 second when the value is empty.
/// Negative, NaN, and out-of-range values are rejected.
pub(crate) fn sleep_duration(value: &str) -> Result<Duration> {
    if value.is_empty() {
        return Ok(Duration::from_secs(1));
    }
    let secs: f64 = value
        .parse()
        .map_err(|_| Error::InvalidValue(value.to_string()))?;
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidValue(value.to_string()))
}

/// Parse a scroll offset value: either `"dy"` or `"dx,dy"`.
pub(crate) fn scroll_offsets(value: &str, default: Option<(f64, f64)>) -> Result<(f64, f64)> {
    if value.is_empty() {
        return default.ok_or_else(|| Error::InvalidValue(value.to_string()));
    }
    let parse = |part: &str| -> Result<f64> {
        let n: f64 = part
            .trim()
            .parse()
            .map_err(|_| Error::InvalidValue(value.to_string()))?;
        if n.is_finite() {
            Ok(n)
        } else {
            Err(Error::InvalidValue(value.to_string()))
        }
    };
    match value.split_once(',') {
        Some((dx, dy)) => Ok((parse(dx)?, parse(dy)?)),
        None => Ok((0.0, parse(value)?)),
    }
}

/// Parse a zoom percentage, defaulting to 100 (reset) when empty.
pub(crate) fn zoom_percent(value: &str) -> Result<f64> {
    if value.is_empty() {
        return Ok(100.0);
    }
    let percent: f64 = value
        .parse()
        .map_err(|_| Error::InvalidValue(value.to_string()))?;
    if percent.is_finite() && percent > 0.0 {
        Ok(percent)
    } else {
        Err(Error::InvalidValue(value.to_string()))
    }
}
