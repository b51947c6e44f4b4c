use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use preloan_core::config::EngineConfig;
use preloan_core::engine;
use preloan_core::offers::SequentialOfferIds;
use preloan_core::LoanRequest;

use crate::input;

/// Arguments for pre-approval offer generation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct OffersArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Requested loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Middle name
    #[arg(long)]
    pub middle_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Birthdate (YYYY-MM-DD)
    #[arg(long)]
    pub birthdate: Option<NaiveDate>,

    /// Passport series, four digits
    #[arg(long)]
    pub passport_series: Option<String>,

    /// Passport number, six digits
    #[arg(long)]
    pub passport_number: Option<String>,

    /// Business date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_offers(
    args: OffersArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        LoanRequest {
            amount: args.amount,
            term: args.term,
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            middle_name: args.middle_name.clone(),
            email: args.email.clone(),
            birthdate: args.birthdate,
            passport_series: args.passport_series.clone(),
            passport_number: args.passport_number.clone(),
        }
    };

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let mut ids = SequentialOfferIds::new();
    let offers = engine::pre_approve(&request, config, &mut ids, as_of)?;

    Ok(serde_json::to_value(offers)?)
}
