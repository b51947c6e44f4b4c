//! Top-level pre-approval and credit calculation flows.
//!
//! Thin orchestration over the validation, scoring, annuity and effective
//! rate modules. Callers pass the business date explicitly; nothing here
//! reads the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annuity;
use crate::config::EngineConfig;
use crate::error::PreloanError;
use crate::offers::{self, OfferIdSource};
use crate::psk;
use crate::scoring::{self, RejectionReason, ScoringOutcome};
use crate::types::{Credit, LoanOffer, LoanRequest, ScoringInput};
use crate::validation;
use crate::PreloanResult;

/// Final decision on a scored application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditDecision {
    Approved { credit: Credit },
    Rejected { reason: RejectionReason },
}

/// Validate a raw application and, if it passes, build the four standard
/// offers at the configured base rate.
pub fn pre_approve(
    request: &LoanRequest,
    config: &EngineConfig,
    ids: &mut dyn OfferIdSource,
    as_of: NaiveDate,
) -> PreloanResult<[LoanOffer; 4]> {
    validation::validate(request, as_of)?;

    // Presence is validated above; treat absence past that point as a bug.
    let amount = request.amount.ok_or_else(|| PreloanError::InvalidInput {
        field: "amount".into(),
        reason: "missing after validation".into(),
    })?;
    let term = request.term.ok_or_else(|| PreloanError::InvalidInput {
        field: "term".into(),
        reason: "missing after validation".into(),
    })?;

    debug!(%amount, term, "request validated, building offers");
    offers::generate_offers(amount, term, config.base_rate, &config.offers, ids)
}

/// Score a full application and, if accepted, price the credit: monthly
/// payment, amortization schedule and the effective annual rate.
pub fn score_and_calculate(
    input: &ScoringInput,
    config: &EngineConfig,
    as_of: NaiveDate,
) -> PreloanResult<CreditDecision> {
    let rate = match scoring::score(input, config.base_rate, &config.scoring, as_of) {
        ScoringOutcome::Rejected { reason } => {
            return Ok(CreditDecision::Rejected { reason });
        }
        ScoringOutcome::Accepted { rate } => rate,
    };

    let monthly_payment = annuity::monthly_payment(input.amount, rate, input.term)?;
    let payment_schedule = annuity::payment_schedule(
        input.amount,
        input.term,
        annuity::monthly_rate(rate),
        monthly_payment,
        as_of,
    )?;
    let psk = psk::calculate_psk(&payment_schedule, input.amount)?;

    debug!(%rate, %monthly_payment, %psk, "credit calculated");
    Ok(CreditDecision::Approved {
        credit: Credit {
            amount: input.amount,
            term: input.term,
            monthly_payment,
            rate,
            psk,
            is_insurance_enabled: input.is_insurance_enabled,
            is_salary_client: input.is_salary_client,
            payment_schedule,
        },
    })
}
