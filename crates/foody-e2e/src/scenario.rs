//! Ordered workflows of named steps sharing one context.
//!
//! Steps run strictly in declaration order. A failing step is recorded and
//! the run moves on; later steps that depend on its fixture values fail on
//! their own with [`crate::FoodyError::MissingFixture`]. A failing setup
//! marks every step failed without running any.

use crate::result::FoodyResult;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn};

/// A step body
pub type StepFn<C> = fn(&mut C) -> FoodyResult<()>;

/// A named step
pub struct Step<C> {
    name: String,
    run: StepFn<C>,
}

impl<C> Step<C> {
    /// Create a step
    #[must_use]
    pub fn new(name: impl Into<String>, run: StepFn<C>) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }

    /// Step name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C> std::fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// Result of running a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Step name
    pub name: String,
    /// Whether the step passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Step duration
    pub duration: Duration,
}

impl StepResult {
    /// Create a passing step result
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing step result
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Results from running a workflow
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResults {
    /// Workflow name
    pub workflow_name: String,
    /// Setup outcome, if the workflow has a setup
    pub setup: Option<StepResult>,
    /// Step results in execution order
    pub results: Vec<StepResult>,
    /// Total duration
    pub duration: Duration,
}

impl WorkflowResults {
    /// Check if setup and every step passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.setup.as_ref().map_or(true, |s| s.passed) && self.results.iter().all(|r| r.passed)
    }

    /// Count passed steps
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed steps
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Get total step count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed steps
    #[must_use]
    pub fn failures(&self) -> Vec<&StepResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// An ordered list of steps with an optional setup
#[derive(Debug)]
pub struct Workflow<C> {
    name: String,
    setup: Option<Step<C>>,
    steps: Vec<Step<C>>,
}

impl<C> Workflow<C> {
    /// Create an empty workflow
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            steps: Vec::new(),
        }
    }

    /// Run `run` once before the first step
    #[must_use]
    pub fn with_setup(mut self, name: impl Into<String>, run: StepFn<C>) -> Self {
        self.setup = Some(Step::new(name, run));
        self
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, name: impl Into<String>, run: StepFn<C>) -> Self {
        self.steps.push(Step::new(name, run));
        self
    }

    /// Workflow name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Step names in execution order
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Get the number of steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Run setup and then every step against `ctx`
    pub fn run(&self, ctx: &mut C) -> WorkflowResults {
        let start = Instant::now();
        let _span = info_span!("workflow", name = %self.name).entered();

        let setup = self.setup.as_ref().map(|step| run_step(step, ctx));
        let results = match &setup {
            Some(StepResult {
                passed: false,
                error,
                ..
            }) => {
                let reason = format!(
                    "setup failed: {}",
                    error.as_deref().unwrap_or("unknown error")
                );
                warn!(%reason, skipped = self.steps.len(), "skipping all steps");
                self.steps
                    .iter()
                    .map(|step| StepResult::fail(step.name(), reason.clone()))
                    .collect()
            }
            _ => self.steps.iter().map(|step| run_step(step, ctx)).collect(),
        };

        let results = WorkflowResults {
            workflow_name: self.name.clone(),
            setup,
            results,
            duration: start.elapsed(),
        };
        info!(
            passed = results.passed_count(),
            failed = results.failed_count(),
            duration = ?results.duration,
            "workflow finished"
        );
        results
    }
}

fn run_step<C>(step: &Step<C>, ctx: &mut C) -> StepResult {
    let _span = info_span!("step", name = %step.name).entered();
    info!("step started");
    let start = Instant::now();
    let outcome = (step.run)(ctx);
    let duration = start.elapsed();
    match outcome {
        Ok(()) => {
            info!(?duration, "step passed");
            StepResult::pass(&step.name).with_duration(duration)
        }
        Err(e) => {
            error!(?duration, error = %e, "step failed");
            StepResult::fail(&step.name, e.to_string()).with_duration(duration)
        }
    }
}
