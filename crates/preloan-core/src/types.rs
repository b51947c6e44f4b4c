use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates expressed in percent (15 = 15%), as published to clients.
pub type Rate = Decimal;

/// Round a money or rate value to 2 decimal places, half-up.
///
/// This is the only rounding applied anywhere in the engine; it happens at
/// the published output points (payment, interest, PSK) and never on the
/// running remaining-debt balance.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole years between `birthdate` and `as_of`. Negative if the birthdate
/// lies in the future.
pub(crate) fn age_in_years(birthdate: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birthdate.year();
    if (as_of.month(), as_of.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Married,
    Divorced,
    Single,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Unemployed,
    SelfEmployed,
    Employed,
    BusinessOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobPosition {
    Worker,
    MidManager,
    TopManager,
    Owner,
}

/// An incoming pre-approval request. Every field is optional at the wire
/// boundary; `validation::validate` decides what is actually acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
}

/// Applicant employment details used by the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub status: EmploymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_id: Option<String>,
    pub salary: Money,
    pub position: JobPosition,
    /// Total work experience, in months.
    pub work_experience_total: u32,
    /// Experience at the current employer, in months.
    pub work_experience_current: u32,
}

/// The full applicant record scored on the final approval path. Arrives
/// already validated; passport issue details and account are carried through
/// for the platform but no scoring rule reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringInput {
    pub amount: Money,
    pub term: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub passport_series: String,
    pub passport_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_issue_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_issue_branch: Option<String>,
    pub marital_status: MaritalStatus,
    pub dependent_amount: u32,
    pub employment: EmploymentRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
}

/// One of the four pre-approval offers: base terms plus the insurance /
/// salary-client option combination it was priced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub id: u64,
    pub requested_amount: Money,
    /// Full amount repaid over the term, including the insurance cost when
    /// insurance is enabled.
    pub total_amount: Money,
    pub term: u32,
    pub monthly_payment: Money,
    pub rate: Rate,
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
}

/// A fully scored and calculated credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub amount: Money,
    pub term: u32,
    pub monthly_payment: Money,
    pub rate: Rate,
    /// Effective annual cost of credit, in percent.
    pub psk: Rate,
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
    pub payment_schedule: Vec<PaymentScheduleElement>,
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleElement {
    /// 1-based payment number.
    pub number: u32,
    pub date: NaiveDate,
    /// interest_payment + debt_payment. Differs from the annuity payment on
    /// the final row, which absorbs the remaining principal.
    pub total_payment: Money,
    pub interest_payment: Money,
    pub debt_payment: Money,
    /// Principal still owed after this payment; exactly zero on the last row.
    pub remaining_debt: Money,
}
