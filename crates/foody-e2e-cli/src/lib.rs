//! Foody E2E CLI Library
//!
//! Command-line runner for the Foody end-to-end journey: builds a
//! [`foody_e2e::SuiteConfig`] from a YAML file, the environment and flags,
//! drives Chromium through the journey and reports each step.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, EditExpectationArg, FormatArg, RunArgs, SuiteArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_json, render_text, JourneyReport, OutputFormat, Reporter, StepReport};
pub use runner::run_in_browser;
