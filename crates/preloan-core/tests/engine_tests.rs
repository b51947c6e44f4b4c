use chrono::NaiveDate;
use preloan_core::config::EngineConfig;
use preloan_core::engine::{self, CreditDecision};
use preloan_core::offers::SequentialOfferIds;
use preloan_core::scoring::RejectionReason;
use preloan_core::validation;
use preloan_core::{
    Credit, EmploymentRecord, EmploymentStatus, Gender, JobPosition, LoanRequest, MaritalStatus,
    PreloanError, ScoringInput, ValidationCause,
};
use rust_decimal_macros::dec;

// ===========================================================================
// Request validation tests
// ===========================================================================

fn sample_request() -> LoanRequest {
    LoanRequest {
        amount: Some(dec!(30000)),
        term: Some(6),
        first_name: Some("John".to_string()),
        last_name: Some("Doe".to_string()),
        middle_name: Some("Edward".to_string()),
        email: Some("john.doe@example.com".to_string()),
        birthdate: NaiveDate::from_ymd_opt(1990, 3, 12),
        passport_series: Some("1234".to_string()),
        passport_number: Some("123456".to_string()),
    }
}

fn as_of_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

#[test]
fn test_valid_request_passes() {
    assert!(validation::validate(&sample_request(), as_of_2024()).is_ok());
}

#[test]
fn test_missing_fields_reported_per_field() {
    let request = LoanRequest::default();
    let errors = validation::validate_all(&request, as_of_2024());

    // middle_name is optional; the other eight fields are required.
    assert_eq!(errors.len(), 8);
    assert!(errors.iter().all(|e| e.cause == ValidationCause::EmptyRequiredParameter));

    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "amount",
            "term",
            "first_name",
            "last_name",
            "email",
            "birthdate",
            "passport_series",
            "passport_number",
        ]
    );
}

#[test]
fn test_amount_below_minimum_rejected() {
    let mut request = sample_request();
    request.amount = Some(dec!(9999.99));

    let err = validation::validate(&request, as_of_2024()).unwrap_err();
    assert_eq!(err.field, "amount");
    assert_eq!(err.cause, ValidationCause::IncorrectCreditAmount);
}

#[test]
fn test_term_below_minimum_rejected() {
    let mut request = sample_request();
    request.term = Some(5);

    let err = validation::validate(&request, as_of_2024()).unwrap_err();
    assert_eq!(err.cause, ValidationCause::IncorrectCreditTerm);
}

#[test]
fn test_underage_applicant_rejected() {
    let mut request = sample_request();
    // Turns 18 the day after the business date.
    request.birthdate = NaiveDate::from_ymd_opt(2006, 1, 16);

    let err = validation::validate(&request, as_of_2024()).unwrap_err();
    assert_eq!(err.field, "birthdate");
    assert_eq!(err.cause, ValidationCause::PersonTooYoung);
}

#[test]
fn test_name_pattern_applies_to_all_three_names() {
    for field in ["first_name", "last_name", "middle_name"] {
        let mut request = sample_request();
        match field {
            "first_name" => request.first_name = Some("J".to_string()),
            "last_name" => request.last_name = Some("D0e".to_string()),
            _ => request.middle_name = Some("Ed ward".to_string()),
        }

        let err = validation::validate(&request, as_of_2024()).unwrap_err();
        assert_eq!(err.field, field);
        assert_eq!(err.cause, ValidationCause::IncorrectName);
    }
}

#[test]
fn test_passport_fields_must_be_digit_strings() {
    let mut request = sample_request();
    request.passport_series = Some("12a4".to_string());
    let err = validation::validate(&request, as_of_2024()).unwrap_err();
    assert_eq!(err.cause, ValidationCause::IncorrectPassportSeries);

    let mut request = sample_request();
    request.passport_number = Some("12345".to_string());
    let err = validation::validate(&request, as_of_2024()).unwrap_err();
    assert_eq!(err.cause, ValidationCause::IncorrectPassportNumber);
}

// ===========================================================================
// Pre-approval offer tests
// ===========================================================================

#[test]
fn test_pre_approval_offer_grid() {
    let mut ids = SequentialOfferIds::new();
    let offers =
        engine::pre_approve(&sample_request(), &EngineConfig::default(), &mut ids, as_of_2024())
            .unwrap();

    // Fixed order: no extras, insurance, salary client, both.
    let summary: Vec<_> = offers
        .iter()
        .map(|o| {
            (o.rate, o.monthly_payment, o.total_amount, o.is_insurance_enabled, o.is_salary_client)
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (dec!(15), dec!(5221.01), dec!(31326.06), false, false),
            (dec!(14), dec!(5206.14), dec!(131236.84), true, false),
            (dec!(12), dec!(5176.45), dec!(31058.70), false, true),
            (dec!(11), dec!(5161.64), dec!(130969.84), true, true),
        ]
    );

    let ids: Vec<u64> = offers.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_pre_approval_surfaces_first_validation_error() {
    let request = LoanRequest { email: Some("bad email".to_string()), ..sample_request() };

    let mut ids = SequentialOfferIds::new();
    let err = engine::pre_approve(&request, &EngineConfig::default(), &mut ids, as_of_2024())
        .unwrap_err();
    match err {
        PreloanError::Validation(e) => {
            assert_eq!(e.field, "email");
            assert_eq!(e.cause, ValidationCause::IncorrectEmail);
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

// ===========================================================================
// Scoring tests
// ===========================================================================

fn sample_input() -> ScoringInput {
    // Neutral for every rule at the 2022-05-20 business date: employed
    // worker, single, no dependents, male aged 27, experience above minimums.
    ScoringInput {
        amount: dec!(30000),
        term: 10,
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        middle_name: None,
        gender: Gender::Male,
        birthdate: NaiveDate::from_ymd_opt(1995, 3, 12).unwrap(),
        passport_series: "1234".to_string(),
        passport_number: "123456".to_string(),
        passport_issue_date: NaiveDate::from_ymd_opt(2015, 3, 12),
        passport_issue_branch: Some("Unit 100".to_string()),
        marital_status: MaritalStatus::Single,
        dependent_amount: 0,
        employment: EmploymentRecord {
            status: EmploymentStatus::Employed,
            employer_id: Some("7710140679".to_string()),
            salary: dec!(50000),
            position: JobPosition::Worker,
            work_experience_total: 24,
            work_experience_current: 6,
        },
        account: Some("40817810099910004312".to_string()),
        is_insurance_enabled: false,
        is_salary_client: false,
    }
}

fn as_of_2022() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 5, 20).unwrap()
}

fn approved_credit(input: &ScoringInput, as_of: NaiveDate) -> Credit {
    let decision = engine::score_and_calculate(input, &EngineConfig::default(), as_of).unwrap();
    match decision {
        CreditDecision::Approved { credit } => credit,
        CreditDecision::Rejected { reason } => panic!("unexpected rejection: {reason}"),
    }
}

fn rejection(input: &ScoringInput, as_of: NaiveDate) -> RejectionReason {
    let decision = engine::score_and_calculate(input, &EngineConfig::default(), as_of).unwrap();
    match decision {
        CreditDecision::Rejected { reason } => reason,
        CreditDecision::Approved { credit } => panic!("unexpected approval at {}", credit.rate),
    }
}

#[test]
fn test_scoring_rejections_by_reason() {
    let mut input = sample_input();
    input.employment.status = EmploymentStatus::Unemployed;
    assert_eq!(rejection(&input, as_of_2022()), RejectionReason::UnacceptableEmployerStatus);

    let mut input = sample_input();
    input.amount = dec!(1000001);
    assert_eq!(rejection(&input, as_of_2022()), RejectionReason::InsufficientSalary);

    let mut input = sample_input();
    input.birthdate = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
    assert_eq!(rejection(&input, as_of_2022()), RejectionReason::UnacceptableAge);

    let mut input = sample_input();
    input.employment.work_experience_current = 2;
    assert_eq!(rejection(&input, as_of_2022()), RejectionReason::InsufficientExperience);
}

#[test]
fn test_rejection_order_follows_rule_order() {
    // Fails employment, salary and experience at once; employment runs first.
    let mut input = sample_input();
    input.employment.status = EmploymentStatus::Unemployed;
    input.amount = dec!(1000001);
    input.employment.work_experience_total = 0;
    assert_eq!(rejection(&input, as_of_2022()), RejectionReason::UnacceptableEmployerStatus);
}

#[test]
fn test_corrections_move_the_credit_rate() {
    // Base 15, business owner +3, married -3, three dependents +1.
    let mut input = sample_input();
    input.employment.status = EmploymentStatus::BusinessOwner;
    input.marital_status = MaritalStatus::Married;
    input.dependent_amount = 3;

    let credit = approved_credit(&input, as_of_2022());
    assert_eq!(credit.rate, dec!(16));
}

#[test]
fn test_flags_do_not_change_the_scored_rate() {
    let mut input = sample_input();
    input.is_insurance_enabled = true;
    input.is_salary_client = true;

    let credit = approved_credit(&input, as_of_2022());
    assert_eq!(credit.rate, dec!(15));
    assert!(credit.is_insurance_enabled);
    assert!(credit.is_salary_client);
}

// ===========================================================================
// Credit calculation tests
// ===========================================================================

#[test]
fn test_ten_month_schedule_row_by_row() {
    let credit = approved_credit(&sample_input(), as_of_2022());

    assert_eq!(credit.rate, dec!(15));
    assert_eq!(credit.monthly_payment, dec!(3210.09));

    let expected = [
        // (date, total, interest, debt, remaining)
        ("2022-06-20", dec!(3210.09), dec!(375.00), dec!(2835.09), dec!(27164.91)),
        ("2022-07-20", dec!(3210.09), dec!(339.56), dec!(2870.53), dec!(24294.38)),
        ("2022-08-20", dec!(3210.09), dec!(303.68), dec!(2906.41), dec!(21387.97)),
        ("2022-09-20", dec!(3210.09), dec!(267.35), dec!(2942.74), dec!(18445.23)),
        ("2022-10-20", dec!(3210.09), dec!(230.57), dec!(2979.52), dec!(15465.71)),
        ("2022-11-20", dec!(3210.09), dec!(193.32), dec!(3016.77), dec!(12448.94)),
        ("2022-12-20", dec!(3210.09), dec!(155.61), dec!(3054.48), dec!(9394.46)),
        ("2023-01-20", dec!(3210.09), dec!(117.43), dec!(3092.66), dec!(6301.80)),
        ("2023-02-20", dec!(3210.09), dec!(78.77), dec!(3131.32), dec!(3170.48)),
        ("2023-03-20", dec!(3210.11), dec!(39.63), dec!(3170.48), dec!(0.00)),
    ];

    assert_eq!(credit.payment_schedule.len(), expected.len());
    for (element, (date, total, interest, debt, remaining)) in
        credit.payment_schedule.iter().zip(expected)
    {
        assert_eq!(element.date.to_string(), date);
        assert_eq!(element.total_payment, total);
        assert_eq!(element.interest_payment, interest);
        assert_eq!(element.debt_payment, debt);
        assert_eq!(element.remaining_debt, remaining);
    }

    let numbers: Vec<u32> = credit.payment_schedule.iter().map(|e| e.number).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());
}

#[test]
fn test_ten_month_effective_rate() {
    let credit = approved_credit(&sample_input(), as_of_2022());
    assert_eq!(credit.psk, dec!(15.72));
}

#[test]
fn test_twelve_month_credit_at_sixteen_percent() {
    // Divorced bumps the base rate to 16.
    let mut input = sample_input();
    input.term = 12;
    input.marital_status = MaritalStatus::Divorced;

    let credit = approved_credit(&input, as_of_2024());

    assert_eq!(credit.rate, dec!(16));
    assert_eq!(credit.monthly_payment, dec!(2721.93));
    assert_eq!(credit.psk, dec!(16.92));

    let first = &credit.payment_schedule[0];
    assert_eq!(first.date.to_string(), "2024-02-15");
    assert_eq!(first.interest_payment, dec!(400.00));
    assert_eq!(first.debt_payment, dec!(2321.93));
    assert_eq!(first.remaining_debt, dec!(27678.07));

    let last = &credit.payment_schedule[11];
    assert_eq!(last.date.to_string(), "2025-01-15");
    assert_eq!(last.total_payment, dec!(2721.87));
    assert_eq!(last.interest_payment, dec!(35.81));
    assert_eq!(last.debt_payment, dec!(2686.06));
    assert_eq!(last.remaining_debt, dec!(0.00));
}

#[test]
fn test_schedule_debt_payments_sum_to_amount() {
    let credit = approved_credit(&sample_input(), as_of_2022());
    let total_debt: rust_decimal::Decimal =
        credit.payment_schedule.iter().map(|e| e.debt_payment).sum();
    assert_eq!(total_debt, dec!(30000));
}

#[test]
fn test_credit_wire_format() {
    let credit = approved_credit(&sample_input(), as_of_2022());
    let json = serde_json::to_value(&credit).unwrap();

    // Decimals travel as strings, dates as ISO days, enums screaming.
    assert_eq!(json["monthly_payment"], "3210.09");
    assert_eq!(json["psk"], "15.72");
    assert_eq!(json["payment_schedule"][0]["date"], "2022-06-20");
    assert_eq!(json["payment_schedule"][9]["remaining_debt"], "0.00");
}
