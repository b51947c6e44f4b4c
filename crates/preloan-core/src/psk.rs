//! Effective annual cost of credit ("PSK").
//!
//! Solves sum(payment_k / ((1 + e_k * i) * (1 + i)^q_k)) = 0 for the rate
//! per 30-day base period `i`, where the series starts with the disbursement
//! (negative principal) one month before the first scheduled payment. There
//! is no closed form; the solver sweeps i upward and refines the step by a
//! factor of 10 per pass until two successive estimates agree within
//! 0.0001. The sweep-and-refine procedure is a reproducibility contract:
//! published PSK values depend on its exact stepping.

use chrono::Months;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::{debug, error};

use crate::error::PreloanError;
use crate::types::{round_money, Money, PaymentScheduleElement, Rate};
use crate::PreloanResult;

/// Length of the regulatory base period, in days.
const BASE_PERIOD_DAYS: i64 = 30;
/// Day-count basis for the base-periods-per-year figure.
const DAYS_IN_YEAR: Decimal = dec!(365);
/// Sweep step before the first refinement; divided by 10 at the top of
/// every pass, the first one included.
const INITIAL_STEP: Decimal = dec!(0.01);
/// Two successive rate estimates closer than this end the refinement.
const RESULT_TOLERANCE: Decimal = dec!(0.0001);
/// Hard cap on sweep iterations within a single refinement pass.
const ITERATION_LIMIT: u32 = 10_000;

/// One cash flow of the PSK series, with its discounting exponents
/// precomputed from the day offset against the disbursement date.
struct DiscountedPayment {
    amount: Money,
    /// e_k: fractional part of the offset in base periods, (d mod 30) / 30.
    month_part: Decimal,
    /// q_k: whole base periods in the offset, d div 30.
    full_periods: u64,
}

/// Compute the effective annual rate, in percent rounded to 2 decimals,
/// for a schedule produced by `annuity::payment_schedule`.
pub fn calculate_psk(schedule: &[PaymentScheduleElement], amount: Money) -> PreloanResult<Rate> {
    let first = schedule.first().ok_or_else(|| PreloanError::InvalidInput {
        field: "schedule".into(),
        reason: "Payment schedule must not be empty".into(),
    })?;
    let disbursement_date = first.date.checked_sub_months(Months::new(1)).ok_or_else(|| {
        PreloanError::DateError("disbursement date out of calendar range".into())
    })?;

    let mut payments = Vec::with_capacity(schedule.len() + 1);
    payments.push(DiscountedPayment {
        amount: -amount,
        month_part: Decimal::ZERO,
        full_periods: 0,
    });
    for element in schedule {
        let days = (element.date - disbursement_date).num_days();
        payments.push(DiscountedPayment {
            amount: element.total_payment,
            month_part: Decimal::from(days % BASE_PERIOD_DAYS) / Decimal::from(BASE_PERIOD_DAYS),
            full_periods: (days / BASE_PERIOD_DAYS) as u64,
        });
    }

    // Sweep from zero, shrinking the step tenfold each pass and resuming
    // from the previous pass's crossing point.
    let mut rate = Decimal::ZERO;
    let mut previous = dec!(1000);
    let mut step = INITIAL_STEP;

    while (rate - previous).abs() > RESULT_TOLERANCE {
        previous = rate;
        step /= dec!(10);
        rate = sweep_to_crossing(&payments, rate, step)?;
    }

    let base_periods_per_year = (DAYS_IN_YEAR / Decimal::from(BASE_PERIOD_DAYS))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let psk = round_money(rate * base_periods_per_year * dec!(100));

    debug!(%rate, %psk, "effective rate converged");
    Ok(psk)
}

/// Advance the rate by `step` until the discounted sum crosses to <= 0.
///
/// The sum is monotonically decreasing in the rate for any schedule whose
/// disbursement is the single negative flow, so the first non-positive sum
/// brackets the root within one step.
fn sweep_to_crossing(
    payments: &[DiscountedPayment],
    mut rate: Decimal,
    step: Decimal,
) -> PreloanResult<Decimal> {
    for _ in 0..ITERATION_LIMIT {
        rate += step;
        if discounted_sum(payments, rate) <= Decimal::ZERO {
            return Ok(rate);
        }
    }

    let last_sum = discounted_sum(payments, rate);
    error!(
        iterations = ITERATION_LIMIT,
        %step,
        %last_sum,
        "effective rate sweep exhausted its iteration cap"
    );
    Err(PreloanError::ConvergenceFailure {
        function: "calculate_psk".into(),
        iterations: ITERATION_LIMIT,
        last_sum,
    })
}

fn discounted_sum(payments: &[DiscountedPayment], rate: Decimal) -> Decimal {
    let one_plus_rate = Decimal::ONE + rate;
    payments
        .iter()
        .map(|payment| {
            let discount = (Decimal::ONE + payment.month_part * rate)
                * one_plus_rate.powu(payment.full_periods);
            payment.amount / discount
        })
        .sum()
}
