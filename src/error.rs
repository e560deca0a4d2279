//! Error types for the calculation engine

use thiserror::Error;

/// Errors returned by every computation in this crate.
///
/// Rate-zero singularities are not errors: the solvers branch around them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinanceError {
    /// Newton-Raphson (and the bisection fallback, when enabled) ran out of
    /// iterations without meeting the precision threshold.
    #[error("rate solver did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// Iterations spent before giving up
        iterations: u32,
    },

    /// An input the computation cannot run with.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        /// Name of the offending input
        field: &'static str,
        /// The value that was rejected
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },
}

impl FinanceError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        FinanceError::InvalidInput { field, value, reason }
    }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, FinanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FinanceError::invalid(field, value, "must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = FinanceError::invalid("goal", 0.0, "must be greater than zero");
        assert_eq!(err.to_string(), "invalid goal = 0: must be greater than zero");

        let err = FinanceError::ConvergenceFailure { iterations: 50 };
        assert!(err.to_string().contains("50 iterations"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("pv", 12.5), Ok(12.5));
        assert!(matches!(
            ensure_finite("pv", f64::NAN),
            Err(FinanceError::InvalidInput { field: "pv", .. })
        ));
        assert!(ensure_finite("fv", f64::INFINITY).is_err());
    }
}
