//! Pre-approval offer grid.
//!
//! Every valid request gets the same four offers, one per combination of the
//! insurance and salary-client flags, ordered from the plainest terms to the
//! most discounted rate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::annuity;
use crate::config::OfferConfig;
use crate::types::{LoanOffer, Money, Rate};
use crate::PreloanResult;

/// Supplies offer ids. Injected so callers control id allocation; a service
/// would back this with its sequence, tests with a fixed counter.
pub trait OfferIdSource {
    fn next_id(&mut self) -> u64;
}

/// Monotonic in-process id counter.
#[derive(Debug, Clone)]
pub struct SequentialOfferIds {
    next: u64,
}

impl SequentialOfferIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialOfferIds {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferIdSource for SequentialOfferIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Build the four standard offers for an already-validated request.
///
/// Order is fixed: no extras, insurance only, salary client only, both.
pub fn generate_offers(
    amount: Money,
    term_months: u32,
    base_rate: Rate,
    config: &OfferConfig,
    ids: &mut dyn OfferIdSource,
) -> PreloanResult<[LoanOffer; 4]> {
    let offers = [
        build_offer(amount, term_months, base_rate, false, false, config, ids)?,
        build_offer(amount, term_months, base_rate, true, false, config, ids)?,
        build_offer(amount, term_months, base_rate, false, true, config, ids)?,
        build_offer(amount, term_months, base_rate, true, true, config, ids)?,
    ];
    debug!(%amount, term_months, %base_rate, "generated offer grid");
    Ok(offers)
}

fn build_offer(
    amount: Money,
    term_months: u32,
    base_rate: Rate,
    is_insurance_enabled: bool,
    is_salary_client: bool,
    config: &OfferConfig,
    ids: &mut dyn OfferIdSource,
) -> PreloanResult<LoanOffer> {
    let mut rate = base_rate;
    if is_insurance_enabled {
        rate -= config.insurance_rate_discount;
    }
    if is_salary_client {
        rate -= config.salary_client_rate_discount;
    }

    let monthly_payment = annuity::monthly_payment(amount, rate, term_months)?;

    // Insurance is charged on top of the repayment total, not financed.
    let mut total_amount = monthly_payment * Decimal::from(term_months);
    if is_insurance_enabled {
        total_amount += config.insurance_cost;
    }

    Ok(LoanOffer {
        id: ids.next_id(),
        requested_amount: amount,
        total_amount,
        term: term_months,
        monthly_payment,
        rate,
        is_insurance_enabled,
        is_salary_client,
    })
}
