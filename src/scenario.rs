//! Scenario runner for batch goal projections
//!
//! Projections are independent and stateless, so batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::ProjectionConfig;
use crate::error::FinanceError;
use crate::projection::{GoalProjectionInput, ProjectionEngine, ProjectionResult};

/// Outcome of one projection scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub input: GoalProjectionInput,
    #[serde(serialize_with = "serialize_outcome")]
    pub result: Result<ProjectionResult, FinanceError>,
}

fn serialize_outcome<S>(
    result: &Result<ProjectionResult, FinanceError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(projection) => map.serialize_entry("ok", &projection.summary())?,
        Err(err) => map.serialize_entry("error", &err.to_string())?,
    }
    map.end()
}

/// Runs many projections with the same engine settings
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = GoalProjectionInput::new(10_000.0, 500.0, 0.0, 1_000_000.0);
///
/// for outcome in runner.run_rate_scenarios(&base, &[0.04, 0.06, 0.08]) {
///     println!("{:?}", outcome.result.map(|r| r.months_to_goal));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default 1200-month cap
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, input: &GoalProjectionInput) -> Result<ProjectionResult, FinanceError> {
        self.engine.project(input)
    }

    /// Run projections for many inputs, preserving input order
    pub fn run_batch(&self, inputs: &[GoalProjectionInput]) -> Vec<ScenarioOutcome> {
        log::info!("running {} projection scenarios", inputs.len());

        inputs
            .par_iter()
            .map(|input| ScenarioOutcome {
                input: *input,
                result: self.engine.project(input),
            })
            .collect()
    }

    /// Re-run one projection under each annual return rate
    pub fn run_rate_scenarios(
        &self,
        base: &GoalProjectionInput,
        annual_rates: &[f64],
    ) -> Vec<ScenarioOutcome> {
        let inputs: Vec<_> = annual_rates
            .iter()
            .map(|&annual_return_rate| GoalProjectionInput {
                annual_return_rate,
                ..*base
            })
            .collect();

        self.run_batch(&inputs)
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
