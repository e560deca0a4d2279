//! Annuity (time value of money) calculations
//!
//! - `rate`: Newton-Raphson solver for the periodic rate
//! - `solver`: closed-form solvers for n, pv, pmt and fv

mod rate;
mod solver;

pub use rate::{solve_rate, RateSolver};
pub use solver::{solve_annuity, AnnuityParameters, AnnuitySolution, AnnuitySolver, TvmVariable};

/// `(1+rate)^periods - 1` without cancellation for rates near zero.
/// `rate` must be greater than -1.
pub(crate) fn compound_growth_minus_one(rate: f64, periods: f64) -> f64 {
    (periods * rate.ln_1p()).exp_m1()
}
