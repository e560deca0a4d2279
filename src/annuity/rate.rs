//! Periodic interest rate solver
//!
//! Finds r such that `pv*(1+r)^n + pmt*((1+r)^n - 1)/r + fv = 0`.

use crate::config::SolverConfig;
use crate::error::FinanceError;

/// Newton-Raphson root finder for the annuity equation
#[derive(Debug, Clone, Default)]
pub struct RateSolver {
    config: SolverConfig,
}

impl RateSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the periodic rate given term, payment, present and future value.
    ///
    /// Starts at `initial_guess` and returns the first iterate that moves by
    /// less than `tolerance`. After `max_iterations` without converging the
    /// result is [`FinanceError::ConvergenceFailure`], unless the bisection
    /// fallback is enabled and finds a root inside the bracket.
    pub fn solve(&self, n: u32, pmt: f64, pv: f64, fv: f64) -> Result<f64, FinanceError> {
        let cfg = &self.config;
        let mut rate = cfg.initial_guess;

        for iteration in 0..cfg.max_iterations {
            rate = self.clamp(rate);
            let (f, df) = equation_and_derivative(n, pmt, pv, fv, rate);
            let new_rate = rate - f / df;

            log::debug!(
                "newton iteration {}: rate={:.10} f={:.6e} f'={:.6e}",
                iteration, rate, f, df
            );

            // A flat or undefined derivative can never recover
            if !new_rate.is_finite() {
                log::debug!("newton step left the real line at iteration {}", iteration);
                break;
            }

            if (new_rate - rate).abs() < cfg.tolerance {
                return Ok(new_rate);
            }

            rate = new_rate;
        }

        if cfg.bisection_fallback {
            if let Some(rate) = self.bisect(n, pmt, pv, fv) {
                log::debug!("bisection fallback found rate {:.10}", rate);
                return Ok(rate);
            }
        }

        log::warn!(
            "rate solver failed to converge (n={}, pmt={}, pv={}, fv={})",
            n, pmt, pv, fv
        );
        Err(FinanceError::ConvergenceFailure {
            iterations: cfg.max_iterations,
        })
    }

    fn clamp(&self, rate: f64) -> f64 {
        if rate.abs() < self.config.min_rate_magnitude {
            self.config.min_rate_magnitude
        } else {
            rate
        }
    }

    /// Bisection on the configured bracket; None when the bracket does not
    /// straddle a sign change
    fn bisect(&self, n: u32, pmt: f64, pv: f64, fv: f64) -> Option<f64> {
        let (mut low, mut high) = self.config.bracket;
        let tolerance = 1e-10;
        let max_iterations = 1000;

        let f_low = self.value_at(n, pmt, pv, fv, low);
        let f_high = self.value_at(n, pmt, pv, fv, high);

        if !f_low.is_finite() || !f_high.is_finite() || f_low * f_high > 0.0 {
            return None;
        }

        for _ in 0..max_iterations {
            let mid = (low + high) / 2.0;
            let f_mid = self.value_at(n, pmt, pv, fv, mid);

            if f_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
                return Some(mid);
            }

            if f_mid * self.value_at(n, pmt, pv, fv, low) < 0.0 {
                high = mid;
            } else {
                low = mid;
            }
        }

        None
    }

    fn value_at(&self, n: u32, pmt: f64, pv: f64, fv: f64, rate: f64) -> f64 {
        equation_and_derivative(n, pmt, pv, fv, self.clamp(rate)).0
    }
}

/// Evaluate the annuity equation and its closed-form derivative at `rate`
fn equation_and_derivative(n: u32, pmt: f64, pv: f64, fv: f64, rate: f64) -> (f64, f64) {
    let nf = n as f64;
    let growth = (1.0 + rate).powf(nf);
    let growth_prev = (1.0 + rate).powf(nf - 1.0);

    let f = pv * growth + pmt * (growth - 1.0) / rate + fv;
    let df = nf * pv * growth_prev
        + pmt * (nf * rate * growth_prev - (growth - 1.0)) / rate.powi(2);

    (f, df)
}

/// Solve for the periodic rate with the default solver settings
pub fn solve_rate(n: u32, pmt: f64, pv: f64, fv: f64) -> Result<f64, FinanceError> {
    RateSolver::default().solve(n, pmt, pv, fv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loan_payment(principal: f64, rate: f64, n: u32) -> f64 {
        let growth = (1.0 + rate).powi(n as i32);
        principal * rate * growth / (growth - 1.0)
    }

    #[test]
    fn test_loan_rate() {
        // $10,000 borrowed, 12 payments of ~$888.49
        let pmt = loan_payment(10_000.0, 0.01, 12);
        let rate = solve_rate(12, pmt, -10_000.0, 0.0).unwrap();
        assert_relative_eq!(rate, 0.01, max_relative = 1e-6);
    }

    #[test]
    fn test_lump_sum_growth() {
        // 1000 grows to 1100 in one period: 10%, which is also the initial guess
        let rate = solve_rate(1, 0.0, -1000.0, 1100.0).unwrap();
        assert_relative_eq!(rate, 0.10, max_relative = 1e-9);
    }

    #[test]
    fn test_savings_with_contributions() {
        let rate: f64 = 0.015;
        let growth = (1.0 + rate).powi(24);
        let fv = 1000.0 * growth + 100.0 * (growth - 1.0) / rate;

        let solved = solve_rate(24, -100.0, -1000.0, fv).unwrap();
        assert_relative_eq!(solved, rate, max_relative = 1e-6);
    }

    #[test]
    fn test_no_root_reports_convergence_failure() {
        // Every cash flow has the same sign, nothing to balance
        let result = solve_rate(12, 100.0, 1000.0, 500.0);
        assert_eq!(result, Err(FinanceError::ConvergenceFailure { iterations: 50 }));
    }

    #[test]
    fn test_bisection_fallback_rescues_long_terms() {
        // 60-year loan at 0.05% per period: Newton needs about 70 steps from 0.1
        let pmt = loan_payment(100_000.0, 0.0005, 720);

        let plain = solve_rate(720, pmt, -100_000.0, 0.0);
        assert!(matches!(plain, Err(FinanceError::ConvergenceFailure { .. })));

        let solver = RateSolver::new(SolverConfig {
            bisection_fallback: true,
            ..Default::default()
        });
        let rate = solver.solve(720, pmt, -100_000.0, 0.0).unwrap();
        assert_relative_eq!(rate, 0.0005, max_relative = 1e-4);
    }

    #[test]
    fn test_bisection_without_sign_change_still_fails() {
        let solver = RateSolver::new(SolverConfig {
            bisection_fallback: true,
            ..Default::default()
        });
        assert!(solver.solve(12, 100.0, 1000.0, 500.0).is_err());
    }

    #[test]
    fn test_equation_for_terms_past_i32() {
        // 3 billion periods at 1e-10 compound to e^0.3
        let (f, df) = equation_and_derivative(3_000_000_000, 0.0, -1.0, 1.0, 1e-10);
        assert_relative_eq!(f, 1.0 - 0.3_f64.exp(), max_relative = 1e-4);
        assert!(df < 0.0);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let (n, pmt, pv, fv) = (36, -250.0, 5000.0, 1200.0);
        let rate = 0.02;
        let h = 1e-6;

        let (_, df) = equation_and_derivative(n, pmt, pv, fv, rate);
        let (f_up, _) = equation_and_derivative(n, pmt, pv, fv, rate + h);
        let (f_down, _) = equation_and_derivative(n, pmt, pv, fv, rate - h);

        assert_relative_eq!(df, (f_up - f_down) / (2.0 * h), max_relative = 1e-5);
    }
}
