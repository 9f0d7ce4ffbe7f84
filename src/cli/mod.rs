//! CLI command handling
//!
//! Dispatches CLI commands and formats user-facing output.

use std::path::Path;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::driver::session::{default_browsers, BrowserKind, SessionOptions, WebSession};
use crate::keyword::runner::{RunReport, Scenario};
use crate::keyword::{data, loader, runner};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            path,
            browser,
            remote_url,
            data,
            all_browsers,
        } => {
            run_command(
                &path,
                browser.as_deref(),
                remote_url.as_deref(),
                data.as_deref(),
                all_browsers,
            )
            .await
        }

        Commands::Check { path, json } => check_command(&path, json),

        Commands::Browsers => {
            for browser in default_browsers() {
                println!("{browser}");
            }
            Ok(())
        }
    }
}

async fn run_command(
    path: &Path,
    browser: Option<&str>,
    remote_url: Option<&str>,
    data_path: Option<&Path>,
    all_browsers: bool,
) -> Result<()> {
    let config = Config::load()?;
    let steps = loader::load_steps(path)?;
    let name = scenario_name(path);

    // one scenario per data record, or just the file itself
    let scenarios: Vec<Scenario> = match data_path {
        Some(data_path) => data::load_records(data_path)?
            .iter()
            .enumerate()
            .map(|(i, record)| Scenario {
                name: format!("{} [row {}]", name, i + 1),
                steps: data::apply_record(&steps, record),
            })
            .collect(),
        None => vec![Scenario { name, steps }],
    };

    let browsers: Vec<BrowserKind> = if all_browsers {
        default_browsers()
    } else {
        let kind = match browser {
            Some(name) => name.parse()?,
            None => config.defaults.browser.parse()?,
        };
        vec![kind]
    };

    let mut reports: Vec<RunReport> = Vec::new();
    for kind in browsers {
        if all_browsers {
            println!("\n{} {}", "Browser:".cyan().bold(), kind);
        }

        let options = SessionOptions::resolve(&config, kind, remote_url);
        let session = WebSession::connect(&options).await?;

        for scenario in &scenarios {
            reports.push(runner::run_scenario(&session, scenario).await);
        }

        // teardown failure is deliberately non-fatal
        if let Err(e) = session.quit().await {
            tracing::warn!("session teardown failed: {e}");
        }
    }

    summarize(reports)
}

fn summarize(reports: Vec<RunReport>) -> Result<()> {
    let total = reports.len();
    let mut failed: Vec<RunReport> = reports.into_iter().filter(|r| !r.passed).collect();

    if failed.is_empty() {
        println!(
            "\n{} {} scenario(s) passed",
            "✓".green().bold(),
            total
        );
        return Ok(());
    }

    println!(
        "\n{} {} of {} scenario(s) failed",
        "✗".red().bold(),
        failed.len(),
        total
    );
    for report in &failed {
        if let Some(error) = &report.error {
            println!(
                "  {} {} (step {} of {}): {}",
                "✗".red(),
                report.name,
                report.steps_run,
                report.steps_total,
                error
            );
        }
    }

    let first = failed.remove(0);
    Err(first
        .error
        .unwrap_or_else(|| Error::Session("scenario failed".to_string())))
}

fn check_command(path: &Path, json: bool) -> Result<()> {
    let steps = loader::load_steps(path)?;
    loader::validate_strict(&steps)?;

    if json {
        let rendered = serde_json::to_string_pretty(steps.steps())
            .map_err(|e| Error::DataFormat(e.to_string()))?;
        println!("{rendered}");
    } else {
        for (idx, step) in steps.iter().enumerate() {
            println!("{:>3}  {}", idx + 1, step);
        }
        println!(
            "{} {} step(s) OK",
            "✓".green(),
            steps.len()
        );
    }
    Ok(())
}

fn scenario_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
