//! Running state of a goal projection

/// Balance and contributions at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Months simulated so far
    pub month: u32,

    /// Accumulated balance after `month` months
    pub balance: f64,

    /// Initial investment plus every contribution made so far
    pub invested: f64,
}

impl ProjectionState {
    /// State before the first month: nothing but the initial investment
    pub fn initial(initial_investment: f64) -> Self {
        Self {
            month: 0,
            balance: initial_investment,
            invested: initial_investment,
        }
    }

    /// Grow the balance by one month of return, then add the contribution
    pub fn advance_month(&mut self, monthly_rate: f64, contribution: f64) {
        self.month += 1;
        self.balance = self.balance * (1.0 + monthly_rate) + contribution;
        self.invested += contribution;
    }

    /// Return earned so far
    pub fn interest(&self) -> f64 {
        self.balance - self.invested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_contribution_lands_after_growth() {
        let mut state = ProjectionState::initial(1000.0);
        state.advance_month(0.01, 100.0);

        assert_eq!(state.month, 1);
        assert_abs_diff_eq!(state.balance, 1110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.invested, 1100.0);
        assert_abs_diff_eq!(state.interest(), 10.0, epsilon = 1e-9);
    }
}
