//! Journey report rendering

use crate::error::CliResult;
use console::{style, Style, Term};
use foody_e2e::{StepResult, WorkflowResults};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format for the journey report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// One step in the JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step name
    pub name: String,
    /// Whether the step passed
    pub passed: bool,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl From<&StepResult> for StepReport {
    fn from(step: &StepResult) -> Self {
        Self {
            name: step.name.clone(),
            passed: step.passed,
            error: step.error.clone(),
            duration_ms: millis(step.duration),
        }
    }
}

/// The JSON report document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyReport {
    /// Workflow name
    pub journey: String,
    /// Setup and every step passed
    pub passed: bool,
    /// Setup outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<StepReport>,
    /// Steps in execution order
    pub steps: Vec<StepReport>,
    /// Passed step count
    pub passed_count: usize,
    /// Failed step count
    pub failed_count: usize,
    /// Total wall time in milliseconds
    pub duration_ms: u64,
}

impl From<&WorkflowResults> for JourneyReport {
    fn from(results: &WorkflowResults) -> Self {
        Self {
            journey: results.workflow_name.clone(),
            passed: results.all_passed(),
            setup: results.setup.as_ref().map(StepReport::from),
            steps: results.results.iter().map(StepReport::from).collect(),
            passed_count: results.passed_count(),
            failed_count: results.failed_count(),
            duration_ms: millis(results.duration),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Render the report as pretty JSON
pub fn render_json(results: &WorkflowResults) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(&JourneyReport::from(results))?)
}

fn step_line(step: &StepResult, use_color: bool) -> String {
    let prefix = match (step.passed, use_color) {
        (true, true) => style("✓").green().bold().to_string(),
        (false, true) => style("✗").red().bold().to_string(),
        (true, false) => "PASS".to_string(),
        (false, false) => "FAIL".to_string(),
    };
    let ms = millis(step.duration);
    match &step.error {
        Some(error) => format!("{prefix} {} ({ms}ms): {error}", step.name),
        None => format!("{prefix} {} ({ms}ms)", step.name),
    }
}

/// Render the report as text, one line per step plus a summary
#[must_use]
pub fn render_text(results: &WorkflowResults, use_color: bool) -> String {
    let mut out = Vec::with_capacity(results.total() + 4);

    let title = format!("Journey: {}", results.workflow_name);
    out.push(if use_color {
        style(title).bold().underlined().to_string()
    } else {
        format!("=== {title} ===")
    });

    if let Some(setup) = &results.setup {
        out.push(step_line(setup, use_color));
    }
    for step in &results.results {
        out.push(step_line(step, use_color));
    }
    out.push(String::new());

    let passed = results.passed_count();
    let failed = results.failed_count();
    let total = results.total();
    let secs = results.duration.as_secs_f64();
    let ok = results.all_passed();

    if use_color {
        let passed_style = Style::new().green().bold();
        let failed_style = Style::new().red().bold();
        let status = if ok {
            passed_style.apply_to("PASSED")
        } else {
            failed_style.apply_to("FAILED")
        };
        out.push(format!(
            "{status} {total} steps in {secs:.2}s ({} passed, {} failed)",
            passed_style.apply_to(passed),
            if failed > 0 {
                failed_style.apply_to(failed).to_string()
            } else {
                failed.to_string()
            },
        ));
    } else {
        let status = if ok { "PASSED" } else { "FAILED" };
        out.push(format!(
            "{status} {total} steps in {secs:.2}s ({passed} passed, {failed} failed)"
        ));
    }

    out.join("\n")
}

/// Writes journey reports to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    format: OutputFormat,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode: text reports print only on failure
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            format,
            use_color,
            quiet,
        }
    }

    /// Print the report for a finished run
    pub fn report(&self, results: &WorkflowResults) -> CliResult<()> {
        let rendered = match self.format {
            OutputFormat::Json => render_json(results)?,
            OutputFormat::Text if self.quiet && results.all_passed() => return Ok(()),
            OutputFormat::Text => render_text(results, self.use_color),
        };
        self.term.write_line(&rendered)?;
        Ok(())
    }
}
