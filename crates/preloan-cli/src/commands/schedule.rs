use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use preloan_core::{annuity, psk};

use crate::input;

/// Arguments for amortization schedule calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Disbursement date (YYYY-MM-DD), defaults to today; the first payment
    /// lands one month later
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct ScheduleParams {
    amount: Decimal,
    rate: Decimal,
    term: u32,
    #[serde(default)]
    start_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ScheduleParams = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        ScheduleParams {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term: args.term.ok_or("--term is required (or provide --input)")?,
            start_date: None,
        }
    };

    let start_date = args
        .start_date
        .or(params.start_date)
        .unwrap_or_else(|| Local::now().date_naive());

    let monthly_payment = annuity::monthly_payment(params.amount, params.rate, params.term)?;
    let payment_schedule = annuity::payment_schedule(
        params.amount,
        params.term,
        annuity::monthly_rate(params.rate),
        monthly_payment,
        start_date,
    )?;
    let psk = psk::calculate_psk(&payment_schedule, params.amount)?;

    Ok(json!({
        "monthly_payment": monthly_payment,
        "psk": psk,
        "payment_schedule": payment_schedule,
    }))
}
