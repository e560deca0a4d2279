//! Core types for amortization schedules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, FinanceError};

/// Amortization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// French / PRICE: constant total payment
    Price,
    /// SAC: constant principal portion
    Sac,
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationMethod::Price => f.write_str("PRICE"),
            AmortizationMethod::Sac => f.write_str("SAC"),
        }
    }
}

impl FromStr for AmortizationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" | "french" => Ok(AmortizationMethod::Price),
            "sac" => Ok(AmortizationMethod::Sac),
            other => Err(format!("Unknown amortization method: {}", other)),
        }
    }
}

/// Loan terms shared by both schedule methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed; must be positive
    pub principal: f64,

    /// Interest rate per period as a fraction
    pub periodic_rate: f64,

    /// Number of payment periods; must be positive
    pub term_periods: u32,

    /// Balance left owing after the last payment
    #[serde(default)]
    pub balloon_future_value: f64,
}

impl LoanParameters {
    pub fn new(principal: f64, periodic_rate: f64, term_periods: u32) -> Self {
        Self {
            principal,
            periodic_rate,
            term_periods,
            balloon_future_value: 0.0,
        }
    }

    pub fn with_balloon(mut self, balloon_future_value: f64) -> Self {
        self.balloon_future_value = balloon_future_value;
        self
    }

    /// Principal repaid over the term
    pub fn total_amortized(&self) -> f64 {
        self.principal - self.balloon_future_value
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        ensure_finite("principal", self.principal)?;
        ensure_finite("periodic_rate", self.periodic_rate)?;
        ensure_finite("balloon_future_value", self.balloon_future_value)?;

        if self.principal <= 0.0 {
            return Err(FinanceError::invalid(
                "principal",
                self.principal,
                "must be greater than zero",
            ));
        }
        if self.term_periods == 0 {
            return Err(FinanceError::invalid(
                "term_periods",
                0.0,
                "must be at least one period",
            ));
        }
        if self.periodic_rate < 0.0 {
            return Err(FinanceError::invalid(
                "periodic_rate",
                self.periodic_rate,
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// One period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-indexed period
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal_portion: f64,
    /// Balance owed after this period's payment
    pub remaining_balance: f64,
}

/// Complete amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub method: AmortizationMethod,

    /// One row per period, in period order
    pub rows: Vec<AmortizationRow>,

    /// Principal minus balloon
    pub total_amortized: f64,

    /// Sum of interest over all periods
    pub total_interest: f64,

    /// Sum of payments over all periods
    pub total_paid: f64,
}

impl AmortizationResult {
    pub(crate) fn new(method: AmortizationMethod, loan: &LoanParameters) -> Self {
        Self {
            method,
            rows: Vec::with_capacity(loan.term_periods as usize),
            total_amortized: loan.total_amortized(),
            total_interest: 0.0,
            total_paid: 0.0,
        }
    }

    /// Add a row and roll it into the totals
    pub(crate) fn add_row(&mut self, row: AmortizationRow) {
        self.total_interest += row.interest;
        self.total_paid += row.payment;
        self.rows.push(row);
    }

    /// Row for a 1-indexed period
    pub fn row(&self, period: u32) -> Option<&AmortizationRow> {
        period.checked_sub(1).and_then(|idx| self.rows.get(idx as usize))
    }

    /// Balance after the last period
    pub fn final_balance(&self) -> Option<f64> {
        self.rows.last().map(|r| r.remaining_balance)
    }
}

/// Round a monetary amount to cents
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
