//! Annuity payment and amortization schedule construction.
//!
//! All arithmetic runs at full decimal working precision; rounding to 2
//! decimal places (half-up) happens only on the published payment and
//! interest figures, never on the running remaining-debt balance.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::PreloanError;
use crate::types::{round_money, Money, PaymentScheduleElement, Rate};
use crate::PreloanResult;

const MONTHS_IN_YEAR: Decimal = dec!(12);
const HUNDRED_PERCENT: Decimal = dec!(100);

/// Convert an annual rate in percent to a monthly rate fraction
/// (16 -> 0.0133..).
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / HUNDRED_PERCENT / MONTHS_IN_YEAR
}

/// Monthly annuity payment for a loan, rounded to 2 decimals half-up.
///
/// payment = amount * (r + r / ((1 + r)^term - 1)) with r the monthly rate.
pub fn monthly_payment(
    amount: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> PreloanResult<Money> {
    if amount <= Decimal::ZERO {
        return Err(PreloanError::InvalidInput {
            field: "amount".into(),
            reason: "Credit amount must be positive".into(),
        });
    }
    if term_months == 0 {
        return Err(PreloanError::InvalidInput {
            field: "term".into(),
            reason: "Credit term must be at least 1 month".into(),
        });
    }
    if annual_rate_percent <= Decimal::ZERO {
        return Err(PreloanError::InvalidInput {
            field: "rate".into(),
            reason: "Annual rate must be positive".into(),
        });
    }

    let rate = monthly_rate(annual_rate_percent);
    // growth > 1 whenever rate > 0 and term >= 1, so the divisor never hits zero
    let growth = (Decimal::ONE + rate).powu(u64::from(term_months));
    let payment = round_money(amount * (rate + rate / (growth - Decimal::ONE)));

    debug!(%amount, %annual_rate_percent, term_months, %payment, "computed annuity payment");
    Ok(payment)
}

/// Build the full amortization schedule.
///
/// The first payment falls one calendar month after `as_of`, each further
/// payment one calendar month after the previous one (day-of-month clamped
/// to the target month's length, and the clamp carries forward). The final
/// element's debt portion absorbs the entire remaining principal, driving
/// the remaining debt to exactly zero.
pub fn payment_schedule(
    amount: Money,
    term_months: u32,
    monthly_rate: Rate,
    monthly_payment: Money,
    as_of: NaiveDate,
) -> PreloanResult<Vec<PaymentScheduleElement>> {
    if amount <= Decimal::ZERO {
        return Err(PreloanError::InvalidInput {
            field: "amount".into(),
            reason: "Credit amount must be positive".into(),
        });
    }
    if term_months == 0 {
        return Err(PreloanError::InvalidInput {
            field: "term".into(),
            reason: "Credit term must be at least 1 month".into(),
        });
    }
    if monthly_rate <= Decimal::ZERO {
        return Err(PreloanError::InvalidInput {
            field: "rate".into(),
            reason: "Monthly rate must be positive".into(),
        });
    }

    let mut remaining = amount;
    let mut date = as_of;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for number in 1..=term_months {
        date = date
            .checked_add_months(Months::new(1))
            .ok_or_else(|| PreloanError::DateError("payment date out of calendar range".into()))?;

        let interest = round_money(remaining * monthly_rate);
        let debt = if number == term_months {
            remaining
        } else {
            monthly_payment - interest
        };
        let total = interest + debt;
        // exact subtraction; only the published figures above are rounded
        remaining -= debt;

        schedule.push(PaymentScheduleElement {
            number,
            date,
            total_payment: total,
            interest_payment: interest,
            debt_payment: debt,
            remaining_debt: remaining,
        });
    }

    Ok(schedule)
}
