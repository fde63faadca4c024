//! Foody E2E CLI: run the Foody journey in Chromium
//!
//! ## Usage
//!
//! ```bash
//! foody-e2e run                                  # Headless run against the default site
//! foody-e2e run --base-url http://localhost:85   # Another deployment
//! foody-e2e run --headed --format json           # Watch it, JSON report
//! foody-e2e config -c suite.yaml                 # Print the effective configuration
//! ```

use clap::Parser;
use foody_e2e_cli::{
    logging, run_in_browser, Cli, CliConfig, CliError, CliResult, Commands, ConfigArgs, Reporter,
    RunArgs, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);

    match cli.command {
        Commands::Run(args) => run_journey(&config, &args),
        Commands::Config(args) => run_config(&args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
        .with_log_json(cli.log_json)
}

fn run_journey(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let suite = args.suite.suite_config()?;
    let results = run_in_browser(&suite)?;

    let reporter = Reporter::new(
        args.format.into(),
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );
    reporter.report(&results)?;

    if results.all_passed() {
        Ok(())
    } else {
        let failed = results.failed_count();
        let total = results.total();
        Err(CliError::journey_failed(format!(
            "{failed} of {total} steps failed"
        )))
    }
}

fn run_config(args: &ConfigArgs) -> CliResult<()> {
    let suite = args.suite.suite_config()?;
    print!("{}", suite.to_yaml()?);
    Ok(())
}
