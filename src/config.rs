//! Solver and projection configuration
//!
//! Defaults: Newton-Raphson from 0.1 with a 1e-7 tolerance and 50 iterations,
//! no bisection, 1200-month projection cap. Overrides can come from a JSON
//! file or from `FINANCE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Hard ceiling on simulated months for goal projections (100 years)
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// Sign convention for the zero-rate branches of the pv, pmt and fv solvers
///
/// `Legacy` is the reference behaviour of the calculator formulas. The
/// default, `Consistent`, differs only at i = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroRateSigns {
    /// i = 0 results are the i -> 0 limit of the i > 0 formulas,
    /// so `pv + pmt*n + fv = 0` holds.
    #[default]
    Consistent,
    /// Zero-rate results keep the sign of the plain cash-flow sum
    /// (`pv = fv + pmt*n`), matching the web calculator this engine replaced.
    Legacy,
}

impl FromStr for ZeroRateSigns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consistent" => Ok(ZeroRateSigns::Consistent),
            "legacy" => Ok(ZeroRateSigns::Legacy),
            other => Err(format!("Unknown zero-rate sign convention: {}", other)),
        }
    }
}

/// Newton-Raphson rate solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting periodic rate for Newton-Raphson
    pub initial_guess: f64,

    /// Stop when successive iterates differ by less than this
    pub tolerance: f64,

    /// Iteration budget before reporting a convergence failure
    pub max_iterations: u32,

    /// Iterates closer to zero than this are clamped to it (the annuity
    /// equation divides by r and r^2)
    pub min_rate_magnitude: f64,

    /// Bisect on `bracket` when Newton-Raphson fails
    pub bisection_fallback: bool,

    /// (low, high) periodic-rate bracket for the bisection fallback
    pub bracket: (f64, f64),

    /// Sign convention for i = 0 in the closed-form solvers
    pub zero_rate_signs: ZeroRateSigns,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            tolerance: 1e-7,
            max_iterations: 50,
            min_rate_magnitude: 1e-9,
            bisection_fallback: false,
            bracket: (-0.99, 1.0),
            zero_rate_signs: ZeroRateSigns::Consistent,
        }
    }
}

/// Goal projection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Maximum number of months simulated before giving up on the goal
    pub max_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Container for all engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub solver: SolverConfig,
    pub projection: ProjectionConfig,
}

impl CalculatorConfig {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Defaults with `FINANCE_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `FINANCE_*` environment overrides on top of these settings
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| env::var(key).ok());
        self
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "FINANCE_SOLVER_MAX_ITERATIONS") {
            self.solver.max_iterations = v;
        }
        if let Some(v) = parse_var(&lookup, "FINANCE_SOLVER_TOLERANCE") {
            self.solver.tolerance = v;
        }
        if let Some(v) = parse_var(&lookup, "FINANCE_SOLVER_INITIAL_GUESS") {
            self.solver.initial_guess = v;
        }
        if let Some(raw) = lookup("FINANCE_SOLVER_BISECTION") {
            self.solver.bisection_fallback = matches!(raw.trim(), "1" | "true" | "yes");
        }
        if let Some(v) = parse_var(&lookup, "FINANCE_ZERO_RATE_SIGNS") {
            self.solver.zero_rate_signs = v;
        }
        if let Some(v) = parse_var(&lookup, "FINANCE_MAX_MONTHS") {
            self.projection.max_months = v;
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let config = CalculatorConfig::default();
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.tolerance, 1e-7);
        assert_eq!(config.solver.initial_guess, 0.1);
        assert!(!config.solver.bisection_fallback);
        assert_eq!(config.projection.max_months, 1200);
    }

    #[test]
    fn test_zero_rate_signs_default_and_parse() {
        assert_eq!(ZeroRateSigns::default(), ZeroRateSigns::Consistent);
        assert_eq!(" Legacy ".parse::<ZeroRateSigns>(), Ok(ZeroRateSigns::Legacy));
        assert!("reference".parse::<ZeroRateSigns>().is_err());
    }

    #[test]
    fn test_overrides_skip_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("FINANCE_SOLVER_MAX_ITERATIONS", "200"),
            ("FINANCE_SOLVER_TOLERANCE", "not-a-number"),
            ("FINANCE_SOLVER_BISECTION", "true"),
            ("FINANCE_ZERO_RATE_SIGNS", "legacy"),
            ("FINANCE_MAX_MONTHS", "600"),
        ]
        .into_iter()
        .collect();

        let mut config = CalculatorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.solver.max_iterations, 200);
        assert_eq!(config.solver.tolerance, 1e-7);
        assert!(config.solver.bisection_fallback);
        assert_eq!(config.solver.zero_rate_signs, ZeroRateSigns::Legacy);
        assert_eq!(config.projection.max_months, 600);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{ "solver": { "bisection_fallback": true } }"#).unwrap();
        assert!(config.solver.bisection_fallback);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.projection.max_months, 1200);
    }
}
