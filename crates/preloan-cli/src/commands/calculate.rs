use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use preloan_core::config::EngineConfig;
use preloan_core::engine;
use preloan_core::ScoringInput;

use crate::input;

/// Arguments for scoring and credit calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to a JSON application file
    #[arg(long)]
    pub input: Option<String>,

    /// Base annual rate in percent, overriding the configured one
    #[arg(long)]
    pub base_rate: Option<Decimal>,

    /// Business date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_calculate(
    args: CalculateArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let application: ScoringInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input file or piped JSON is required for credit calculation".into());
    };

    let mut config = config.clone();
    if let Some(base_rate) = args.base_rate {
        config.base_rate = base_rate;
    }

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let decision = engine::score_and_calculate(&application, &config, as_of)?;

    Ok(serde_json::to_value(decision)?)
}
