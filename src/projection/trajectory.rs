//! Projection output structures

use serde::{Deserialize, Serialize};

/// Balance at the end of one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-indexed month
    pub month: u32,
    pub balance: f64,
}

/// Complete goal projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Months simulated: the month the goal was reached, or the month cap
    pub months_to_goal: u32,

    /// Whether the final balance reached the goal
    pub goal_reached: bool,

    /// Initial investment plus all monthly contributions
    pub total_invested: f64,

    /// Balance after the last simulated month
    pub final_balance: f64,

    /// Month-by-month balance, one point per simulated month
    pub trajectory: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    /// Return earned on top of the money invested
    pub fn interest(&self) -> f64 {
        self.final_balance - self.total_invested
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            years: self.months_to_goal / 12,
            months: self.months_to_goal % 12,
            goal_reached: self.goal_reached,
            total_invested: self.total_invested,
            final_balance: self.final_balance,
            interest: self.interest(),
        }
    }
}

/// Headline figures of a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Whole years until the goal
    pub years: u32,
    /// Months beyond the whole years
    pub months: u32,
    pub goal_reached: bool,
    pub total_invested: f64,
    pub final_balance: f64,
    pub interest: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_splits_years() {
        let result = ProjectionResult {
            months_to_goal: 484,
            goal_reached: true,
            total_invested: 48_400.0,
            final_balance: 1_007_855.52,
            trajectory: Vec::new(),
        };

        let summary = result.summary();
        assert_eq!(summary.years, 40);
        assert_eq!(summary.months, 4);
        assert!((summary.interest - 959_455.52).abs() < 1e-6);
    }
}
