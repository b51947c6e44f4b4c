use chrono::{Local, NaiveDate};
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use preloan_core::config::EngineConfig;
use preloan_core::offers::SequentialOfferIds;
use preloan_core::{annuity, engine, psk, validation, LoanRequest, ScoringInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Business date: explicit YYYY-MM-DD when given, today otherwise.
fn business_date(as_of: Option<String>) -> NapiResult<NaiveDate> {
    match as_of {
        Some(s) => s.parse::<NaiveDate>().map_err(to_napi_error),
        None => Ok(Local::now().date_naive()),
    }
}

/// Engine configuration: JSON overrides when given, defaults otherwise.
fn engine_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    match config_json {
        Some(s) => serde_json::from_str(&s).map_err(to_napi_error),
        None => Ok(EngineConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_loan_request(request_json: String, as_of: Option<String>) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let as_of = business_date(as_of)?;

    let errors = validation::validate_all(&request, as_of);
    let output = serde_json::json!({
        "valid": errors.is_empty(),
        "errors": errors,
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Pre-approval
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_loan_offers(
    request_json: String,
    as_of: Option<String>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let as_of = business_date(as_of)?;
    let config = engine_config(config_json)?;

    // Offer ids restart at 1 for every call; callers assign durable ids.
    let mut ids = SequentialOfferIds::new();
    let offers = engine::pre_approve(&request, &config, &mut ids, as_of).map_err(to_napi_error)?;
    serde_json::to_string(&offers).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring and credit calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn score_and_calculate(
    application_json: String,
    as_of: Option<String>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let application: ScoringInput =
        serde_json::from_str(&application_json).map_err(to_napi_error)?;
    let as_of = business_date(as_of)?;
    let config = engine_config(config_json)?;

    let decision =
        engine::score_and_calculate(&application, &config, as_of).map_err(to_napi_error)?;
    serde_json::to_string(&decision).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization schedule
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ScheduleParams {
    amount: Decimal,
    rate: Decimal,
    term: u32,
}

#[napi]
pub fn payment_schedule(params_json: String, as_of: Option<String>) -> NapiResult<String> {
    let params: ScheduleParams = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let as_of = business_date(as_of)?;

    let monthly_payment = annuity::monthly_payment(params.amount, params.rate, params.term)
        .map_err(to_napi_error)?;
    let schedule = annuity::payment_schedule(
        params.amount,
        params.term,
        annuity::monthly_rate(params.rate),
        monthly_payment,
        as_of,
    )
    .map_err(to_napi_error)?;
    let psk = psk::calculate_psk(&schedule, params.amount).map_err(to_napi_error)?;

    let output = serde_json::json!({
        "monthly_payment": monthly_payment,
        "psk": psk,
        "payment_schedule": schedule,
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}
