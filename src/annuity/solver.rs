//! Five-variable annuity (time value of money) solver
//!
//! Given four of {n, i, pv, pmt, fv}, computes the fifth the way a financial
//! calculator does. Results for pv, pmt and fv carry calculator sign
//! convention: the algebraic result is negated so cash received is positive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::compound_growth_minus_one;
use super::rate::RateSolver;
use crate::config::{SolverConfig, ZeroRateSigns};
use crate::error::{ensure_finite, FinanceError};

/// Slack subtracted before rounding a solved term up, so a term that is an
/// integer up to float noise is not pushed to the next period
const PERIOD_ROUNDING_SLACK: f64 = 1e-9;

/// The annuity variable to solve for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvmVariable {
    /// Number of periods (n)
    Periods,
    /// Periodic interest rate (i)
    Rate,
    /// Present value (pv)
    PresentValue,
    /// Periodic payment (pmt)
    Payment,
    /// Future value (fv)
    FutureValue,
}

impl TvmVariable {
    /// Calculator key label
    pub fn key(&self) -> &'static str {
        match self {
            TvmVariable::Periods => "n",
            TvmVariable::Rate => "i",
            TvmVariable::PresentValue => "pv",
            TvmVariable::Payment => "pmt",
            TvmVariable::FutureValue => "fv",
        }
    }
}

impl fmt::Display for TvmVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TvmVariable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" => Ok(TvmVariable::Periods),
            "i" => Ok(TvmVariable::Rate),
            "pv" => Ok(TvmVariable::PresentValue),
            "pmt" => Ok(TvmVariable::Payment),
            "fv" => Ok(TvmVariable::FutureValue),
            other => Err(format!("Unknown annuity variable: {}", other)),
        }
    }
}

/// Annuity inputs. The field matching the solve target is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnuityParameters {
    /// Number of periods
    pub n: u32,
    /// Periodic rate as a fraction (0.01 = 1%)
    pub i: f64,
    /// Present value
    pub pv: f64,
    /// Periodic payment
    pub pmt: f64,
    /// Future value
    pub fv: f64,
}

impl AnnuityParameters {
    pub fn new(n: u32, i: f64, pv: f64, pmt: f64, fv: f64) -> Self {
        Self { n, i, pv, pmt, fv }
    }

    /// Copy with the solved variable filled in
    pub fn with_solution(mut self, solution: &AnnuitySolution) -> Self {
        match solution.variable {
            TvmVariable::Periods => self.n = solution.value as u32,
            TvmVariable::Rate => self.i = solution.value,
            TvmVariable::PresentValue => self.pv = solution.value,
            TvmVariable::Payment => self.pmt = solution.value,
            TvmVariable::FutureValue => self.fv = solution.value,
        }
        self
    }
}

/// Result of solving for one annuity variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuitySolution {
    pub variable: TvmVariable,
    /// Solved value, in the same units as the matching `AnnuityParameters` field
    pub value: f64,
}

impl AnnuitySolution {
    /// A solved rate as a percentage rounded to 4 decimal places
    pub fn rate_percent(&self) -> Option<f64> {
        match self.variable {
            TvmVariable::Rate => Some((self.value * 100.0 * 10_000.0).round() / 10_000.0),
            _ => None,
        }
    }
}

/// Closed-form solver for n, pv, pmt and fv; delegates i to [`RateSolver`]
#[derive(Debug, Clone, Default)]
pub struct AnnuitySolver {
    rate_solver: RateSolver,
    zero_rate_signs: ZeroRateSigns,
}

impl AnnuitySolver {
    pub fn new(config: SolverConfig) -> Self {
        let zero_rate_signs = config.zero_rate_signs;
        Self {
            rate_solver: RateSolver::new(config),
            zero_rate_signs,
        }
    }

    /// Solve for `target` using the other four fields of `params`
    pub fn solve(
        &self,
        target: TvmVariable,
        params: &AnnuityParameters,
    ) -> Result<AnnuitySolution, FinanceError> {
        let value = match target {
            TvmVariable::Periods => self.solve_periods(params.i, params.pv, params.pmt, params.fv)?,
            TvmVariable::Rate => self.solve_rate(params.n, params.pv, params.pmt, params.fv)?,
            TvmVariable::PresentValue => {
                self.solve_present_value(params.n, params.i, params.pmt, params.fv)?
            }
            TvmVariable::Payment => self.solve_payment(params.n, params.i, params.pv, params.fv)?,
            TvmVariable::FutureValue => {
                self.solve_future_value(params.n, params.i, params.pv, params.pmt)?
            }
        };

        log::debug!("solved {} = {}", target, value);
        Ok(AnnuitySolution {
            variable: target,
            value,
        })
    }

    /// Number of periods. Rounded up when i > 0, to the nearest period when i = 0.
    pub fn solve_periods(&self, i: f64, pv: f64, pmt: f64, fv: f64) -> Result<f64, FinanceError> {
        check_rate(i)?;
        ensure_finite("pv", pv)?;
        ensure_finite("pmt", pmt)?;
        ensure_finite("fv", fv)?;

        let n = if i == 0.0 {
            if pmt == 0.0 {
                return Err(FinanceError::invalid(
                    "pmt",
                    pmt,
                    "must be non-zero to solve for n at a zero rate",
                ));
            }
            (-(pv + fv) / pmt).round()
        } else {
            let ratio = (pmt - fv * i) / (pmt + pv * i);
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(FinanceError::invalid(
                    "pmt",
                    pmt,
                    "no real number of periods balances these cash flows",
                ));
            }
            (ratio.ln() / (1.0 + i).ln() - PERIOD_ROUNDING_SLACK).ceil()
        };

        if !n.is_finite() || n < 0.0 {
            return Err(FinanceError::invalid(
                "n",
                n,
                "cash flows imply a negative number of periods",
            ));
        }
        Ok(n)
    }

    /// Periodic rate as a fraction.
    ///
    /// Payment and present value are sign-flipped before solving, so the
    /// root satisfies `pv*(1+i)^n + pmt*((1+i)^n - 1)/i = fv`.
    pub fn solve_rate(&self, n: u32, pv: f64, pmt: f64, fv: f64) -> Result<f64, FinanceError> {
        check_term(n)?;
        ensure_finite("pv", pv)?;
        ensure_finite("pmt", pmt)?;
        ensure_finite("fv", fv)?;

        self.rate_solver.solve(n, -pmt, -pv, fv)
    }

    /// Present value
    pub fn solve_present_value(&self, n: u32, i: f64, pmt: f64, fv: f64) -> Result<f64, FinanceError> {
        check_rate(i)?;
        ensure_finite("pmt", pmt)?;
        ensure_finite("fv", fv)?;

        let nf = n as f64;
        let pv = if i == 0.0 {
            self.zero_rate(fv + pmt * nf)
        } else {
            let discount_minus_one = compound_growth_minus_one(i, -nf);
            -(-pmt * discount_minus_one / i + fv * (1.0 + discount_minus_one))
        };
        Ok(pv)
    }

    /// Periodic payment
    pub fn solve_payment(&self, n: u32, i: f64, pv: f64, fv: f64) -> Result<f64, FinanceError> {
        check_rate(i)?;
        check_term(n)?;
        ensure_finite("pv", pv)?;
        ensure_finite("fv", fv)?;

        let nf = n as f64;
        let growth_minus_one = compound_growth_minus_one(i, nf);
        let pmt = if i == 0.0 || growth_minus_one == 0.0 {
            self.zero_rate((pv + fv) / nf)
        } else {
            let growth = 1.0 + growth_minus_one;
            -((pv * i * growth + fv * i) / growth_minus_one)
        };
        Ok(pmt)
    }

    /// Future value
    pub fn solve_future_value(&self, n: u32, i: f64, pv: f64, pmt: f64) -> Result<f64, FinanceError> {
        check_rate(i)?;
        ensure_finite("pv", pv)?;
        ensure_finite("pmt", pmt)?;

        let nf = n as f64;
        let fv = if i == 0.0 {
            self.zero_rate(pv + pmt * nf)
        } else {
            let growth_minus_one = compound_growth_minus_one(i, nf);
            -(pv * (1.0 + growth_minus_one) + pmt * growth_minus_one / i)
        };
        Ok(fv)
    }

    /// Sign of a zero-rate result, given the plain cash-flow sum
    fn zero_rate(&self, sum: f64) -> f64 {
        match self.zero_rate_signs {
            ZeroRateSigns::Consistent => -sum,
            ZeroRateSigns::Legacy => sum,
        }
    }
}

fn check_rate(i: f64) -> Result<(), FinanceError> {
    ensure_finite("i", i)?;
    if i <= -1.0 {
        return Err(FinanceError::invalid("i", i, "must be greater than -100%"));
    }
    Ok(())
}

fn check_term(n: u32) -> Result<(), FinanceError> {
    if n == 0 {
        return Err(FinanceError::invalid("n", 0.0, "must be at least one period"));
    }
    Ok(())
}

/// Solve for one annuity variable with the default solver settings
pub fn solve_annuity(
    target: TvmVariable,
    params: &AnnuityParameters,
) -> Result<AnnuitySolution, FinanceError> {
    AnnuitySolver::default().solve(target, params)
}
