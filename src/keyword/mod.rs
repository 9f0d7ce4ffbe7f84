//! Keyword step interpreter
//!
//! Reads ordered sequences of declarative steps (action + locator +
//! value) from tabular files and executes them against a browser handle,
//! failing fast on the first error.

pub mod data;
pub mod loader;
pub mod runner;
pub mod step;

pub use loader::load_steps;
pub use runner::{run, run_scenario, RunReport, Scenario};
pub use step::{Action, Locator, LocatorKind, Step, StepSequence};
