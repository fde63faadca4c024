//! CLI command definitions using clap

use crate::error::{CliError, CliResult};
use clap::{Args, Parser, Subcommand, ValueEnum};
use foody_e2e::{EditExpectation, SuiteConfig};
use std::path::PathBuf;

/// Foody E2E: run the Foody end-to-end browser journey
#[derive(Parser, Debug)]
#[command(name = "foody-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the journey in Chromium
    Run(RunArgs),

    /// Print the effective configuration as YAML
    Config(ConfigArgs),
}

/// Options that shape the suite configuration
#[derive(Args, Debug, Clone, Default)]
pub struct SuiteArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the Foody deployment
    #[arg(long, env = "FOODY_BASE_URL")]
    pub base_url: Option<String>,

    /// Element lookup timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Path to the Chromium binary
    #[arg(long)]
    pub chromium: Option<String>,

    /// Launch Chromium without its sandbox (containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// What the edit step expects the application to do
    #[arg(long)]
    pub edit_expectation: Option<EditExpectationArg>,
}

impl SuiteArgs {
    /// Read the config file (if any), apply command-line overrides, then
    /// validate the result
    pub fn suite_config(&self) -> CliResult<SuiteConfig> {
        let mut config = match &self.config {
            Some(path) => SuiteConfig::read(path)?,
            None => SuiteConfig::default(),
        };
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                return Err(CliError::invalid_argument(
                    "--timeout-secs must be positive",
                ));
            }
            config = config.with_timeout_ms(secs.saturating_mul(1000));
        }
        if self.headed {
            config = config.with_headless(false);
        }
        if let Some(path) = &self.chromium {
            config = config.with_chromium_path(path.clone());
        }
        if self.no_sandbox {
            config.driver = config.driver.with_no_sandbox();
        }
        if let Some(expectation) = self.edit_expectation {
            config = config.with_edit_expectation(expectation.into());
        }
        Ok(config.validated()?)
    }
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub suite: SuiteArgs,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub suite: SuiteArgs,
}

/// Expected edit behaviour
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditExpectationArg {
    /// Edit appends a new item (current application behaviour)
    CreatesNew,
    /// Edit renames the item
    InPlace,
}

impl From<EditExpectationArg> for EditExpectation {
    fn from(arg: EditExpectationArg) -> Self {
        match arg {
            EditExpectationArg::CreatesNew => Self::CreatesNew,
            EditExpectationArg::InPlace => Self::InPlace,
        }
    }
}

/// Report format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
