//! Loan amortization schedules
//!
//! Two methods share the same loan inputs and result shape:
//! - **PRICE** (French): level payment rounded to cents, the last period
//!   absorbs rounding drift and lands exactly on the balloon
//! - **SAC**: level principal portion rounded to cents, payment declines with
//!   the interest
//!
//! Both refuse to run unless principal and term are positive.

mod types;
mod price;
mod sac;

pub use types::{AmortizationMethod, AmortizationResult, AmortizationRow, LoanParameters};
pub use price::PriceSchedule;
pub use sac::SacSchedule;

use crate::error::FinanceError;

/// Trait for schedule generators
pub trait ScheduleGenerator {
    /// Method this generator implements
    fn method(&self) -> AmortizationMethod;

    /// Build the full schedule for a loan
    fn generate(&self, loan: &LoanParameters) -> Result<AmortizationResult, FinanceError>;
}

/// Generator for a given method
pub fn generator_for(method: AmortizationMethod) -> Box<dyn ScheduleGenerator + Send + Sync> {
    match method {
        AmortizationMethod::Price => Box::new(PriceSchedule),
        AmortizationMethod::Sac => Box::new(SacSchedule),
    }
}

/// Build a PRICE or SAC schedule
pub fn generate_schedule(
    method: AmortizationMethod,
    loan: &LoanParameters,
) -> Result<AmortizationResult, FinanceError> {
    generator_for(method).generate(loan)
}
