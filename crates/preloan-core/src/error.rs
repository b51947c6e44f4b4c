use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreloanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (last sum: {last_sum})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_sum: Decimal,
    },

    #[error("Date error: {0}")]
    DateError(String),
}

/// A single field-level violation found in a loan request.
///
/// `rejected_value` is absent for missing required fields and carries the
/// offending text for format violations, so the caller can echo exactly
/// what was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub rejected_value: Option<String>,
    pub cause: ValidationCause,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rejected_value {
            Some(value) => write!(f, "{}: {} (got '{}')", self.field, self.cause, value),
            None => write!(f, "{}: {}", self.field, self.cause),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Why a loan request field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCause {
    EmptyRequiredParameter,
    IncorrectName,
    IncorrectCreditAmount,
    IncorrectCreditTerm,
    PersonTooYoung,
    IncorrectEmail,
    IncorrectPassportSeries,
    IncorrectPassportNumber,
}

impl fmt::Display for ValidationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ValidationCause::EmptyRequiredParameter => "required field is missing",
            ValidationCause::IncorrectName => "must be 2-30 latin letters",
            ValidationCause::IncorrectCreditAmount => "must be at least 10000",
            ValidationCause::IncorrectCreditTerm => "must be at least 6 months",
            ValidationCause::PersonTooYoung => "applicant must be at least 18 years old",
            ValidationCause::IncorrectEmail => "invalid email format",
            ValidationCause::IncorrectPassportSeries => "must be exactly 4 digits",
            ValidationCause::IncorrectPassportNumber => "must be exactly 6 digits",
        };
        f.write_str(reason)
    }
}
