//! SAC schedule: constant principal portion, declining payment

use super::types::{round_cents, AmortizationMethod, AmortizationResult, AmortizationRow, LoanParameters};
use super::ScheduleGenerator;
use crate::error::FinanceError;

/// Constant-amortization schedule generator
#[derive(Debug, Clone, Copy, Default)]
pub struct SacSchedule;

impl SacSchedule {
    /// Principal repaid each period, rounded to cents
    pub fn base_amortization(loan: &LoanParameters) -> f64 {
        round_cents(loan.total_amortized() / loan.term_periods as f64)
    }
}

impl ScheduleGenerator for SacSchedule {
    fn method(&self) -> AmortizationMethod {
        AmortizationMethod::Sac
    }

    fn generate(&self, loan: &LoanParameters) -> Result<AmortizationResult, FinanceError> {
        loan.validate()?;

        let base = Self::base_amortization(loan);
        let term = loan.term_periods;
        let mut result = AmortizationResult::new(AmortizationMethod::Sac, loan);
        let mut balance = loan.principal;

        log::debug!("SAC schedule: amortization {:.2} over {} periods", base, term);

        for period in 1..=term {
            let interest = balance * loan.periodic_rate;
            let principal_portion = if period == term {
                balance - loan.balloon_future_value
            } else {
                base
            };
            let payment = principal_portion + interest;
            balance -= principal_portion;

            result.add_row(AmortizationRow {
                period,
                payment,
                interest,
                principal_portion,
                remaining_balance: balance,
            });
        }

        Ok(result)
    }
}
