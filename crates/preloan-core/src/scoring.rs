//! Rule-based scoring.
//!
//! Five rules run in a fixed order: employment, salary sufficiency, family
//! status, age, work experience. Each either shifts the rate by a configured
//! correction or ends scoring with a rejection; the first rejection wins and
//! later rules are not evaluated.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ScoringConfig;
use crate::types::{
    age_in_years, EmploymentRecord, EmploymentStatus, Gender, JobPosition, MaritalStatus, Money,
    Rate, ScoringInput,
};

/// Terminal denial reasons. A business outcome, not a system fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    UnacceptableEmployerStatus,
    InsufficientSalary,
    UnacceptableAge,
    InsufficientExperience,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectionReason::UnacceptableEmployerStatus => "employment status is unacceptable",
            RejectionReason::InsufficientSalary => {
                "salary is insufficient for the requested amount"
            }
            RejectionReason::UnacceptableAge => "age is outside the acceptable range",
            RejectionReason::InsufficientExperience => "work experience is insufficient",
        };
        f.write_str(reason)
    }
}

/// Outcome of a single scoring rule: a signed rate shift in percentage
/// points, or a terminal denial.
pub type RateCorrection = Result<Rate, RejectionReason>;

/// Outcome of the full scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringOutcome {
    Accepted { rate: Rate },
    Rejected { reason: RejectionReason },
}

/// Score an applicant: fold the rule corrections into the base rate, or
/// stop at the first rejection.
pub fn score(
    input: &ScoringInput,
    base_rate: Rate,
    config: &ScoringConfig,
    as_of: NaiveDate,
) -> ScoringOutcome {
    match rate_corrections(input, config, as_of) {
        Ok(total) => {
            let rate = base_rate + total;
            debug!(%base_rate, %rate, "application accepted");
            ScoringOutcome::Accepted { rate }
        }
        Err(reason) => {
            debug!(%reason, "application rejected");
            ScoringOutcome::Rejected { reason }
        }
    }
}

/// Rules run in order; the first rejection stops scoring and skips the rest.
fn rate_corrections(
    input: &ScoringInput,
    config: &ScoringConfig,
    as_of: NaiveDate,
) -> RateCorrection {
    let mut delta = employment_correction(&input.employment, config)?;
    delta += salary_correction(input.amount, input.employment.salary, config)?;
    delta += family_correction(input.marital_status, input.dependent_amount, config)?;
    delta += age_correction(input.birthdate, input.gender, config, as_of)?;
    delta += experience_correction(&input.employment, config)?;
    Ok(delta)
}

fn employment_correction(employment: &EmploymentRecord, config: &ScoringConfig) -> RateCorrection {
    let status_delta = match employment.status {
        EmploymentStatus::Unemployed => return Err(RejectionReason::UnacceptableEmployerStatus),
        EmploymentStatus::SelfEmployed => config.self_employed_correction,
        EmploymentStatus::BusinessOwner => config.business_owner_correction,
        EmploymentStatus::Employed => Decimal::ZERO,
    };

    let position_delta = match employment.position {
        JobPosition::MidManager => config.mid_manager_correction,
        JobPosition::TopManager => config.top_manager_correction,
        JobPosition::Worker | JobPosition::Owner => Decimal::ZERO,
    };

    trace!(%status_delta, %position_delta, "employment correction");
    Ok(status_delta + position_delta)
}

fn salary_correction(amount: Money, salary: Money, config: &ScoringConfig) -> RateCorrection {
    if amount > salary * config.salary_to_loan_rate_limit {
        return Err(RejectionReason::InsufficientSalary);
    }
    Ok(Decimal::ZERO)
}

fn family_correction(
    marital_status: MaritalStatus,
    dependent_amount: u32,
    config: &ScoringConfig,
) -> RateCorrection {
    let mut delta = match marital_status {
        MaritalStatus::Married => config.married_correction,
        MaritalStatus::Divorced => config.divorced_correction,
        MaritalStatus::Single | MaritalStatus::Widowed => Decimal::ZERO,
    };

    if dependent_amount > config.preferred_dependent_amount_max {
        delta += config.dependent_amount_correction;
    }

    trace!(%delta, "family correction");
    Ok(delta)
}

fn age_correction(
    birthdate: NaiveDate,
    gender: Gender,
    config: &ScoringConfig,
    as_of: NaiveDate,
) -> RateCorrection {
    let age = age_in_years(birthdate, as_of);
    if age < config.min_loan_age as i32 || age > config.max_loan_age as i32 {
        return Err(RejectionReason::UnacceptableAge);
    }

    let male_preferred = (config.male_preferred_age_min as i32
        ..=config.male_preferred_age_max as i32)
        .contains(&age);
    let female_preferred = (config.female_preferred_age_min as i32
        ..=config.female_preferred_age_max as i32)
        .contains(&age);

    let delta = match gender {
        Gender::Male if male_preferred => config.male_preferred_age_correction,
        Gender::Female if female_preferred => config.female_preferred_age_correction,
        Gender::NonBinary => config.non_binary_correction,
        _ => Decimal::ZERO,
    };

    trace!(age, %delta, "age correction");
    Ok(delta)
}

fn experience_correction(employment: &EmploymentRecord, config: &ScoringConfig) -> RateCorrection {
    if employment.work_experience_total < config.min_total_experience
        || employment.work_experience_current < config.min_current_experience
    {
        return Err(RejectionReason::InsufficientExperience);
    }
    Ok(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const BASE_RATE: Decimal = dec!(15);

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    /// Birthdate such that the applicant turns `years` exactly on the as-of date.
    fn aged(years: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024 - years, 6, 1).unwrap()
    }

    fn base_employment() -> EmploymentRecord {
        EmploymentRecord {
            status: EmploymentStatus::Employed,
            employer_id: Some("7710140679".to_string()),
            salary: dec!(50000),
            position: JobPosition::Worker,
            work_experience_total: 12,
            work_experience_current: 3,
        }
    }

    /// A profile every rule scores as neutral: employed worker, single, no
    /// dependents, male aged 29 (below the preferred band), experience at
    /// the exact minimums.
    fn base_input() -> ScoringInput {
        ScoringInput {
            amount: dec!(100000),
            term: 12,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            middle_name: None,
            gender: Gender::Male,
            birthdate: aged(29),
            passport_series: "1234".to_string(),
            passport_number: "123456".to_string(),
            passport_issue_date: NaiveDate::from_ymd_opt(2014, 6, 1),
            passport_issue_branch: Some("Unit 100".to_string()),
            marital_status: MaritalStatus::Single,
            dependent_amount: 0,
            employment: base_employment(),
            account: Some("40817810099910004312".to_string()),
            is_insurance_enabled: false,
            is_salary_client: false,
        }
    }

    fn accepted_rate(input: &ScoringInput) -> Decimal {
        match score(input, BASE_RATE, &ScoringConfig::default(), as_of()) {
            ScoringOutcome::Accepted { rate } => rate,
            ScoringOutcome::Rejected { reason } => panic!("unexpected rejection: {reason}"),
        }
    }

    fn rejection(input: &ScoringInput) -> RejectionReason {
        match score(input, BASE_RATE, &ScoringConfig::default(), as_of()) {
            ScoringOutcome::Rejected { reason } => reason,
            ScoringOutcome::Accepted { rate } => panic!("unexpected acceptance at rate {rate}"),
        }
    }

    #[test]
    fn test_neutral_profile_keeps_base_rate() {
        assert_eq!(accepted_rate(&base_input()), BASE_RATE);
    }

    #[test]
    fn test_unemployed_rejected_regardless_of_other_fields() {
        let mut input = base_input();
        input.employment.status = EmploymentStatus::Unemployed;
        assert_eq!(rejection(&input), RejectionReason::UnacceptableEmployerStatus);
    }

    #[test]
    fn test_first_rejection_wins() {
        // Unemployed and over-borrowed: the employment rule runs first.
        let mut input = base_input();
        input.employment.status = EmploymentStatus::Unemployed;
        input.amount = dec!(10000000);
        assert_eq!(rejection(&input), RejectionReason::UnacceptableEmployerStatus);
    }

    #[test]
    fn test_employment_status_corrections() {
        let mut input = base_input();
        input.employment.status = EmploymentStatus::SelfEmployed;
        assert_eq!(accepted_rate(&input), dec!(16));

        input.employment.status = EmploymentStatus::BusinessOwner;
        assert_eq!(accepted_rate(&input), dec!(18));
    }

    #[test]
    fn test_position_corrections() {
        let mut input = base_input();
        input.employment.position = JobPosition::MidManager;
        assert_eq!(accepted_rate(&input), dec!(13));

        input.employment.position = JobPosition::TopManager;
        assert_eq!(accepted_rate(&input), dec!(11));
    }

    #[test]
    fn test_salary_limit_is_inclusive() {
        let mut input = base_input();
        input.amount = dec!(50000) * dec!(20);
        assert_eq!(accepted_rate(&input), BASE_RATE);

        input.amount = dec!(50000) * dec!(20) + dec!(0.01);
        assert_eq!(rejection(&input), RejectionReason::InsufficientSalary);
    }

    #[test]
    fn test_marital_status_corrections() {
        let mut input = base_input();
        input.marital_status = MaritalStatus::Married;
        assert_eq!(accepted_rate(&input), dec!(12));

        input.marital_status = MaritalStatus::Divorced;
        assert_eq!(accepted_rate(&input), dec!(16));

        input.marital_status = MaritalStatus::Widowed;
        assert_eq!(accepted_rate(&input), dec!(15));
    }

    #[test]
    fn test_dependents_above_preferred_maximum() {
        let mut input = base_input();
        input.dependent_amount = 1;
        assert_eq!(accepted_rate(&input), dec!(15));

        input.dependent_amount = 2;
        assert_eq!(accepted_rate(&input), dec!(16));
    }

    #[test]
    fn test_corrections_accumulate() {
        let mut input = base_input();
        input.employment.status = EmploymentStatus::SelfEmployed;
        input.marital_status = MaritalStatus::Married;
        input.dependent_amount = 3;
        // 15 + 1 - 3 + 1
        assert_eq!(accepted_rate(&input), dec!(14));
    }

    #[test]
    fn test_loan_age_boundaries() {
        let mut input = base_input();
        input.birthdate = aged(20);
        assert_eq!(accepted_rate(&input), dec!(15));

        input.birthdate = aged(19);
        assert_eq!(rejection(&input), RejectionReason::UnacceptableAge);

        input.birthdate = aged(60);
        assert_eq!(accepted_rate(&input), dec!(15));

        input.birthdate = aged(61);
        assert_eq!(rejection(&input), RejectionReason::UnacceptableAge);
    }

    #[test]
    fn test_male_preferred_age_band() {
        let mut input = base_input();
        input.birthdate = aged(30);
        assert_eq!(accepted_rate(&input), dec!(12));

        input.birthdate = aged(55);
        assert_eq!(accepted_rate(&input), dec!(12));

        input.birthdate = aged(29);
        assert_eq!(accepted_rate(&input), dec!(15));

        input.birthdate = aged(56);
        assert_eq!(accepted_rate(&input), dec!(15));
    }

    #[test]
    fn test_female_preferred_age_band() {
        let mut input = base_input();
        input.gender = Gender::Female;

        input.birthdate = aged(35);
        assert_eq!(accepted_rate(&input), dec!(12));

        input.birthdate = aged(60);
        assert_eq!(accepted_rate(&input), dec!(12));

        input.birthdate = aged(34);
        assert_eq!(accepted_rate(&input), dec!(15));
    }

    #[test]
    fn test_non_binary_correction_applies_at_any_accepted_age() {
        let mut input = base_input();
        input.gender = Gender::NonBinary;

        input.birthdate = aged(20);
        assert_eq!(accepted_rate(&input), dec!(18));

        input.birthdate = aged(45);
        assert_eq!(accepted_rate(&input), dec!(18));
    }

    #[test]
    fn test_experience_minimums() {
        let mut input = base_input();
        input.employment.work_experience_total = 11;
        assert_eq!(rejection(&input), RejectionReason::InsufficientExperience);

        let mut input = base_input();
        input.employment.work_experience_current = 2;
        assert_eq!(rejection(&input), RejectionReason::InsufficientExperience);
    }

    #[test]
    fn test_rejection_reason_messages() {
        assert_eq!(
            RejectionReason::InsufficientSalary.to_string(),
            "salary is insufficient for the requested amount"
        );
        assert_eq!(
            serde_json::to_string(&RejectionReason::UnacceptableAge).unwrap(),
            "\"UNACCEPTABLE_AGE\""
        );
    }
}
