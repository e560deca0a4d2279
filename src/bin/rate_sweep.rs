//! Sweep a goal projection across annual return rates
//!
//! Prints how long the goal takes under each rate, or JSON with --json.
//! Accepts config via environment variables:
//!   SWEEP_INITIAL, SWEEP_MONTHLY, SWEEP_GOAL (amounts)
//!   SWEEP_MIN_RATE, SWEEP_MAX_RATE, SWEEP_STEP (annual percent)
//! plus the FINANCE_* engine overrides.

use std::env;
use std::time::Instant;

use anyhow::{bail, Result};
use serde::Serialize;

use personal_finance::export::to_json;
use personal_finance::scenario::ScenarioOutcome;
use personal_finance::{CalculatorConfig, GoalProjectionInput, ScenarioRunner};

#[derive(Serialize)]
struct SweepResponse {
    goal: f64,
    scenarios: Vec<ScenarioOutcome>,
    execution_time_ms: u64,
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let base = GoalProjectionInput::new(
        env_f64("SWEEP_INITIAL", 10_000.0),
        env_f64("SWEEP_MONTHLY", 1_000.0),
        0.0,
        env_f64("SWEEP_GOAL", 1_000_000.0),
    );
    let min_rate = env_f64("SWEEP_MIN_RATE", 2.0);
    let max_rate = env_f64("SWEEP_MAX_RATE", 15.0);
    let step = env_f64("SWEEP_STEP", 1.0);

    if step <= 0.0 || max_rate < min_rate {
        bail!("invalid sweep range {}..{} step {}", min_rate, max_rate, step);
    }

    let count = ((max_rate - min_rate) / step).floor() as usize + 1;
    let rates: Vec<f64> = (0..count)
        .map(|k| (min_rate + step * k as f64) / 100.0)
        .collect();

    let config = CalculatorConfig::from_env();
    let runner = ScenarioRunner::with_config(config.projection);
    let scenarios = runner.run_rate_scenarios(&base, &rates);

    if json_output {
        let response = SweepResponse {
            goal: base.goal,
            scenarios,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", to_json(&response)?);
        return Ok(());
    }

    println!(
        "Goal {:.2}: initial {:.2}, monthly {:.2}",
        base.goal, base.initial_investment, base.monthly_contribution
    );
    println!("{:>8} {:>6} {:>7} {:>16} {:>16}", "Rate%", "Years", "Months", "Invested", "Interest");
    println!("{}", "-".repeat(58));

    for outcome in &scenarios {
        let rate_pct = outcome.input.annual_return_rate * 100.0;
        match &outcome.result {
            Ok(result) => {
                let summary = result.summary();
                let marker = if summary.goal_reached { "" } else { " (cap)" };
                println!(
                    "{:>8.2} {:>6} {:>7} {:>16.2} {:>16.2}{}",
                    rate_pct,
                    summary.years,
                    summary.months,
                    summary.total_invested,
                    summary.interest,
                    marker
                );
            }
            Err(err) => println!("{:>8.2} error: {}", rate_pct, err),
        }
    }

    println!("\nCompleted {} scenarios in {:?}", scenarios.len(), start.elapsed());
    Ok(())
}
