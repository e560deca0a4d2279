//! PRICE (French) schedule: constant payment, shifting interest/principal split

use super::types::{round_cents, AmortizationMethod, AmortizationResult, AmortizationRow, LoanParameters};
use super::ScheduleGenerator;
use crate::annuity::compound_growth_minus_one;
use crate::error::FinanceError;

/// Constant-payment schedule generator
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceSchedule;

impl PriceSchedule {
    /// Level payment that repays `principal` down to the balloon, rounded to cents
    pub fn payment(loan: &LoanParameters) -> f64 {
        let rate = loan.periodic_rate;
        let term = loan.term_periods as f64;

        let growth_minus_one = compound_growth_minus_one(rate, term);
        let raw = if rate == 0.0 || growth_minus_one == 0.0 {
            loan.total_amortized() / term
        } else {
            let growth = 1.0 + growth_minus_one;
            (loan.principal * rate * growth - loan.balloon_future_value * rate) / growth_minus_one
        };
        round_cents(raw)
    }
}

impl ScheduleGenerator for PriceSchedule {
    fn method(&self) -> AmortizationMethod {
        AmortizationMethod::Price
    }

    fn generate(&self, loan: &LoanParameters) -> Result<AmortizationResult, FinanceError> {
        loan.validate()?;

        let pmt = Self::payment(loan);
        let rate = loan.periodic_rate;
        let term = loan.term_periods;
        let mut result = AmortizationResult::new(AmortizationMethod::Price, loan);
        let mut balance = loan.principal;

        log::debug!("PRICE schedule: payment {:.2} over {} periods", pmt, term);

        for period in 1..=term {
            let interest = balance * rate;

            // Rounding drift from the level payment is absorbed by the last period
            let (payment, principal_portion) = if period == term {
                let principal_portion = balance - loan.balloon_future_value;
                balance = loan.balloon_future_value;
                (principal_portion + interest, principal_portion)
            } else {
                let principal_portion = pmt - interest;
                balance -= principal_portion;
                (pmt, principal_portion)
            };

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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_twelve_month_loan() {
        let loan = LoanParameters::new(10_000.0, 0.01, 12);
        let result = PriceSchedule.generate(&loan).unwrap();

        assert_eq!(result.rows.len(), 12);
        assert_eq!(result.final_balance(), Some(0.0));
        assert_eq!(result.total_amortized, 10_000.0);
        assert_abs_diff_eq!(result.total_paid - result.total_interest, result.total_amortized, epsilon = 0.01);

        // Every period but the last pays the rounded level payment
        for row in &result.rows[..11] {
            assert_eq!(row.payment, 888.49);
        }
        let last = result.row(12).unwrap();
        assert_abs_diff_eq!(last.payment, 888.49, epsilon = 0.05);

        assert_abs_diff_eq!(result.rows[0].interest, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.rows[0].principal_portion, 788.49, epsilon = 1e-9);
        assert_abs_diff_eq!(result.total_interest, 661.85, epsilon = 0.01);
    }

    #[test]
    fn test_rows_are_period_ordered() {
        let loan = LoanParameters::new(50_000.0, 0.008, 36);
        let result = PriceSchedule.generate(&loan).unwrap();

        for (idx, row) in result.rows.iter().enumerate() {
            assert_eq!(row.period, idx as u32 + 1);
        }
        // Interest falls and the principal share grows as the balance shrinks
        assert!(result.rows.windows(2).all(|w| w[1].interest < w[0].interest));
        assert!(result.rows[..35].windows(2).all(|w| w[1].principal_portion > w[0].principal_portion));
    }

    #[test]
    fn test_balloon_is_left_owing() {
        let loan = LoanParameters::new(10_000.0, 0.01, 12).with_balloon(2_000.0);
        let result = PriceSchedule.generate(&loan).unwrap();

        assert_eq!(result.final_balance(), Some(2_000.0));
        assert_eq!(result.total_amortized, 8_000.0);
        assert_abs_diff_eq!(result.total_paid - result.total_interest, 8_000.0, epsilon = 0.01);
        // Last payment still includes interest on the balloon
        assert!(result.row(12).unwrap().interest > 19.0);
    }

    #[test]
    fn test_zero_rate_splits_principal_evenly() {
        let loan = LoanParameters::new(1_200.0, 0.0, 12);
        let result = PriceSchedule.generate(&loan).unwrap();

        assert!(result.rows.iter().all(|r| r.payment == 100.0 && r.interest == 0.0));
        assert_eq!(result.total_interest, 0.0);
        assert_abs_diff_eq!(result.total_paid, 1_200.0);
    }

    #[test]
    fn test_tiny_rates_stay_near_even_split() {
        for rate in [1e-18, 1e-15] {
            let loan = LoanParameters::new(10_000.0, rate, 12);
            let result = PriceSchedule.generate(&loan).unwrap();

            assert_eq!(PriceSchedule::payment(&loan), 833.33);
            assert!(result.rows.iter().all(|r| r.payment.is_finite() && r.remaining_balance.is_finite()));
            assert_eq!(result.final_balance(), Some(0.0));
            assert_abs_diff_eq!(result.total_paid, 10_000.0, epsilon = 1e-6);
            assert_abs_diff_eq!(result.total_interest, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_single_period() {
        let loan = LoanParameters::new(1_000.0, 0.02, 1);
        let result = PriceSchedule.generate(&loan).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_abs_diff_eq!(result.rows[0].payment, 1_020.0, epsilon = 1e-9);
        assert_eq!(result.final_balance(), Some(0.0));
    }
}
