//! Keyword-driven WebDriver test runner CLI
//!
//! Runs declarative CSV step scenarios against a browser through a
//! WebDriver server (a local chromedriver/geckodriver or a Selenium
//! Grid).

use clap::Parser;
use webstep::commands::Commands;
use webstep::{cli, common};

#[derive(Parser)]
#[command(name = "webstep", about = "Keyword-driven WebDriver test runner")]
#[command(version, long_about = None)]
struct Cli {
    /// Verbose diagnostic logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    common::logging::init(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
