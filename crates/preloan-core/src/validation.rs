//! Field-level validation of incoming pre-approval requests.
//!
//! Checks run in a fixed order: presence of required fields, name formats,
//! amount, term, applicant age, email, passport series and number. Every
//! failure names the offending field and carries the rejected value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ValidationCause, ValidationError};
use crate::types::{age_in_years, LoanRequest};

/// Smallest credit amount accepted on the pre-approval path.
const MIN_CREDIT_AMOUNT: Decimal = dec!(10000);
/// Shortest credit term accepted, in months.
const MIN_CREDIT_TERM: u32 = 6;
/// Applicants must be adults.
const MIN_APPLICANT_AGE: i32 = 18;

// ASCII classes throughout: the wire contract is latin letters and digits only.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2,30}$").expect("valid pattern"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]{2,50}@[A-Za-z0-9_.]{2,20}$").expect("valid pattern"));
static PASSPORT_SERIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid pattern"));
static PASSPORT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pattern"));

/// Validate a pre-approval request, reporting the first violation found.
///
/// `as_of` is the date the age check runs against; callers pass today.
pub fn validate(request: &LoanRequest, as_of: NaiveDate) -> Result<(), ValidationError> {
    match validate_all(request, as_of).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Validate a pre-approval request, reporting every violation at once.
pub fn validate_all(request: &LoanRequest, as_of: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_present(&mut errors, "amount", request.amount.is_some());
    check_present(&mut errors, "term", request.term.is_some());
    check_present(&mut errors, "first_name", request.first_name.is_some());
    check_present(&mut errors, "last_name", request.last_name.is_some());
    check_present(&mut errors, "email", request.email.is_some());
    check_present(&mut errors, "birthdate", request.birthdate.is_some());
    check_present(&mut errors, "passport_series", request.passport_series.is_some());
    check_present(&mut errors, "passport_number", request.passport_number.is_some());

    if let Some(name) = &request.first_name {
        check_name(&mut errors, "first_name", name);
    }
    if let Some(name) = &request.last_name {
        check_name(&mut errors, "last_name", name);
    }
    // The middle name is genuinely optional; only its format is checked.
    if let Some(name) = &request.middle_name {
        check_name(&mut errors, "middle_name", name);
    }

    if let Some(amount) = request.amount {
        if amount < MIN_CREDIT_AMOUNT {
            errors.push(violation(
                "amount",
                amount.to_string(),
                ValidationCause::IncorrectCreditAmount,
            ));
        }
    }

    if let Some(term) = request.term {
        if term < MIN_CREDIT_TERM {
            errors.push(violation(
                "term",
                term.to_string(),
                ValidationCause::IncorrectCreditTerm,
            ));
        }
    }

    if let Some(birthdate) = request.birthdate {
        if age_in_years(birthdate, as_of) < MIN_APPLICANT_AGE {
            errors.push(violation(
                "birthdate",
                birthdate.to_string(),
                ValidationCause::PersonTooYoung,
            ));
        }
    }

    if let Some(email) = &request.email {
        if !EMAIL_RE.is_match(email) {
            errors.push(violation("email", email, ValidationCause::IncorrectEmail));
        }
    }

    if let Some(series) = &request.passport_series {
        if !PASSPORT_SERIES_RE.is_match(series) {
            errors.push(violation(
                "passport_series",
                series,
                ValidationCause::IncorrectPassportSeries,
            ));
        }
    }

    if let Some(number) = &request.passport_number {
        if !PASSPORT_NUMBER_RE.is_match(number) {
            errors.push(violation(
                "passport_number",
                number,
                ValidationCause::IncorrectPassportNumber,
            ));
        }
    }

    errors
}

fn check_present(errors: &mut Vec<ValidationError>, field: &str, present: bool) {
    if !present {
        errors.push(ValidationError {
            field: field.to_string(),
            rejected_value: None,
            cause: ValidationCause::EmptyRequiredParameter,
        });
    }
}

fn check_name(errors: &mut Vec<ValidationError>, field: &str, name: &str) {
    if !NAME_RE.is_match(name) {
        errors.push(violation(field, name, ValidationCause::IncorrectName));
    }
}

fn violation(field: &str, value: impl Into<String>, cause: ValidationCause) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        rejected_value: Some(value.into()),
        cause,
    }
}
