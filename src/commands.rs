//! CLI command definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a keyword scenario against a browser
    Run {
        /// Path to the steps CSV file (columns: action, locator_type, locator, value)
        path: PathBuf,

        /// Browser to drive: chrome, firefox, or edge (default from config)
        #[arg(long, short)]
        browser: Option<String>,

        /// WebDriver server URL (overrides SELENIUM_REMOTE_URL and config)
        #[arg(long)]
        remote_url: Option<String>,

        /// Data CSV file; the scenario runs once per row with {column}
        /// placeholders substituted into locators and values
        #[arg(long)]
        data: Option<PathBuf>,

        /// Run against every browser selected for this environment
        #[arg(long)]
        all_browsers: bool,
    },

    /// Parse and validate a steps file without touching a browser
    Check {
        /// Path to the steps CSV file
        path: PathBuf,

        /// Print the parsed steps as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the browsers selected for this environment
    Browsers,
}
