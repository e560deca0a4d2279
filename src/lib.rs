//! Personal Finance - calculation engine for everyday financial planning
//!
//! This library provides:
//! - Goal-based investment projections (months needed to reach a target)
//! - A five-variable annuity solver (n, i, pv, pmt, fv) like a financial calculator
//! - PRICE and SAC loan amortization schedules
//! - Parallel scenario runs and CSV/JSON export
//!
//! Every computation is a pure function of its inputs and reports failures as
//! [`FinanceError`] values.

pub mod error;
pub mod config;
pub mod annuity;
pub mod projection;
pub mod amortization;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::FinanceError;
pub use config::{CalculatorConfig, ProjectionConfig, SolverConfig, ZeroRateSigns};
pub use annuity::{solve_annuity, solve_rate, AnnuityParameters, AnnuitySolution, AnnuitySolver, RateSolver, TvmVariable};
pub use projection::{project, GoalProjectionInput, ProjectionEngine, ProjectionPoint, ProjectionResult};
pub use amortization::{
    generate_schedule, AmortizationMethod, AmortizationResult, AmortizationRow, LoanParameters,
    ScheduleGenerator,
};
pub use scenario::ScenarioRunner;
