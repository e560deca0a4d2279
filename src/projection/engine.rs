//! Month-by-month goal projection engine

use serde::{Deserialize, Serialize};

use super::state::ProjectionState;
use super::trajectory::{ProjectionPoint, ProjectionResult};
use crate::config::ProjectionConfig;
use crate::error::{ensure_finite, FinanceError};

/// Inputs for a goal-based investment projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProjectionInput {
    /// Amount invested at month 0
    pub initial_investment: f64,

    /// Contribution added at the end of every month
    pub monthly_contribution: f64,

    /// Annual return as a fraction (0.12 = 12%), compounded monthly
    pub annual_return_rate: f64,

    /// Target balance; must be positive
    pub goal: f64,
}

impl GoalProjectionInput {
    pub fn new(
        initial_investment: f64,
        monthly_contribution: f64,
        annual_return_rate: f64,
        goal: f64,
    ) -> Self {
        Self {
            initial_investment,
            monthly_contribution,
            annual_return_rate,
            goal,
        }
    }

    /// Effective monthly rate equivalent to the annual rate
    pub fn monthly_rate(&self) -> f64 {
        (1.0 + self.annual_return_rate).powf(1.0 / 12.0) - 1.0
    }

    fn validate(&self) -> Result<(), FinanceError> {
        ensure_finite("initial_investment", self.initial_investment)?;
        ensure_finite("monthly_contribution", self.monthly_contribution)?;
        ensure_finite("annual_return_rate", self.annual_return_rate)?;
        ensure_finite("goal", self.goal)?;

        if self.goal <= 0.0 {
            return Err(FinanceError::invalid("goal", self.goal, "must be greater than zero"));
        }
        if self.initial_investment < 0.0 {
            return Err(FinanceError::invalid(
                "initial_investment",
                self.initial_investment,
                "must not be negative",
            ));
        }
        if self.monthly_contribution < 0.0 {
            return Err(FinanceError::invalid(
                "monthly_contribution",
                self.monthly_contribution,
                "must not be negative",
            ));
        }
        if self.annual_return_rate < -1.0 {
            return Err(FinanceError::invalid(
                "annual_return_rate",
                self.annual_return_rate,
                "must not be below -100%",
            ));
        }
        Ok(())
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Simulate month by month until the balance reaches the goal or the
    /// month cap is hit
    pub fn project(&self, input: &GoalProjectionInput) -> Result<ProjectionResult, FinanceError> {
        input.validate()?;

        let monthly_rate = input.monthly_rate();
        let max_months = self.config.max_months;
        let mut state = ProjectionState::initial(input.initial_investment);
        let mut trajectory = Vec::new();

        while state.balance < input.goal && state.month < max_months {
            state.advance_month(monthly_rate, input.monthly_contribution);
            trajectory.push(ProjectionPoint {
                month: state.month,
                balance: state.balance,
            });
        }

        let goal_reached = state.balance >= input.goal;
        if goal_reached {
            log::debug!("goal {:.2} reached after {} months", input.goal, state.month);
        } else {
            log::warn!(
                "goal {:.2} not reached within {} months (balance {:.2})",
                input.goal, max_months, state.balance
            );
        }

        Ok(ProjectionResult {
            months_to_goal: state.month,
            goal_reached,
            total_invested: state.invested,
            final_balance: state.balance,
            trajectory,
        })
    }
}

/// Run a goal projection with the default 1200-month cap
pub fn project(input: &GoalProjectionInput) -> Result<ProjectionResult, FinanceError> {
    ProjectionEngine::default().project(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let input = GoalProjectionInput::new(0.0, 0.0, 0.12, 1.0);
        let monthly = input.monthly_rate();
        assert_relative_eq!((1.0 + monthly).powi(12), 1.12, max_relative = 1e-12);
    }

    #[test]
    fn test_millionaire_goal() {
        let input = GoalProjectionInput::new(0.0, 100.0, 0.12, 1_000_000.0);
        let result = project(&input).unwrap();

        assert!(result.goal_reached);
        assert_eq!(result.months_to_goal, 484);
        assert_eq!(result.trajectory.len(), 484);
        assert!(result.final_balance >= 1_000_000.0);
        assert_abs_diff_eq!(result.total_invested, 48_400.0, epsilon = 1e-6);

        // The month before the last was still short of the goal
        assert!(result.trajectory[482].balance < 1_000_000.0);
        assert_eq!(result.trajectory.last().unwrap().balance, result.final_balance);
    }

    #[test]
    fn test_trajectory_months_are_sequential() {
        let input = GoalProjectionInput::new(5000.0, 250.0, 0.08, 20_000.0);
        let result = project(&input).unwrap();

        for (idx, point) in result.trajectory.iter().enumerate() {
            assert_eq!(point.month, idx as u32 + 1);
        }
        assert!(result.trajectory.windows(2).all(|w| w[1].balance > w[0].balance));
    }

    #[test]
    fn test_unreachable_goal_hits_cap() {
        let input = GoalProjectionInput::new(0.0, 0.0, 0.0, 1000.0);
        let result = project(&input).unwrap();

        assert!(!result.goal_reached);
        assert_eq!(result.months_to_goal, 1200);
        assert_eq!(result.trajectory.len(), 1200);
        assert!(result.final_balance < 1000.0);
    }

    #[test]
    fn test_cap_is_configurable() {
        let engine = ProjectionEngine::new(ProjectionConfig { max_months: 24 });
        let input = GoalProjectionInput::new(0.0, 100.0, 0.05, 1_000_000.0);
        let result = engine.project(&input).unwrap();

        assert!(!result.goal_reached);
        assert_eq!(result.months_to_goal, 24);
    }

    #[test]
    fn test_goal_already_met() {
        let input = GoalProjectionInput::new(10_000.0, 100.0, 0.05, 5_000.0);
        let result = project(&input).unwrap();

        assert!(result.goal_reached);
        assert_eq!(result.months_to_goal, 0);
        assert!(result.trajectory.is_empty());
        assert_abs_diff_eq!(result.interest(), 0.0);
    }

    #[test]
    fn test_zero_return_is_plain_saving() {
        let input = GoalProjectionInput::new(1000.0, 500.0, 0.0, 7000.0);
        let result = project(&input).unwrap();

        assert_eq!(result.months_to_goal, 12);
        assert_abs_diff_eq!(result.final_balance, 7000.0);
        assert_abs_diff_eq!(result.interest(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        for goal in [0.0, -100.0] {
            let input = GoalProjectionInput::new(0.0, 100.0, 0.1, goal);
            assert!(matches!(
                project(&input),
                Err(FinanceError::InvalidInput { field: "goal", .. })
            ));
        }

        let negative = GoalProjectionInput::new(0.0, -10.0, 0.1, 1000.0);
        assert!(project(&negative).is_err());

        let wiped_out = GoalProjectionInput::new(100.0, 10.0, -1.5, 1000.0);
        assert!(project(&wiped_out).is_err());
    }
}
