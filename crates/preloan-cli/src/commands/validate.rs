use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use preloan_core::validation;
use preloan_core::LoanRequest;

use crate::input;

/// Arguments for loan request validation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValidateArgs {
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

    /// Report every failure instead of stopping at the first
    #[arg(long)]
    pub all: bool,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        request_from_flags(&args)
    };

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let errors = if args.all {
        validation::validate_all(&request, as_of)
    } else {
        validation::validate(&request, as_of).err().into_iter().collect()
    };

    Ok(json!({
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}

fn request_from_flags(args: &ValidateArgs) -> LoanRequest {
    // Missing flags stay absent; presence checks report them one by one.
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
}
