mod commands;
mod config_file;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::calculate::CalculateArgs;
use commands::offers::OffersArgs;
use commands::schedule::ScheduleArgs;
use commands::validate::ValidateArgs;

/// Loan pre-approval and credit calculation
#[derive(Parser)]
#[command(
    name = "preloan",
    version,
    about = "Loan pre-approval and credit calculation",
    long_about = "A CLI for validating loan requests, building pre-approval offers, \
                  scoring applications and calculating credits with decimal precision: \
                  annuity payments, amortization schedules and the effective annual rate."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a YAML or JSON engine configuration file
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a loan request without scoring it
    Validate(ValidateArgs),
    /// Validate a loan request and build the four standard offers
    Offers(OffersArgs),
    /// Score a full application and calculate the credit
    Calculate(CalculateArgs),
    /// Print the amortization schedule for explicit terms
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so piped JSON output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Validate(args) => commands::validate::run_validate(args),
        Commands::Offers(args) => config_file::load(cli.config.as_deref())
            .and_then(|config| commands::offers::run_offers(args, &config)),
        Commands::Calculate(args) => config_file::load(cli.config.as_deref())
            .and_then(|config| commands::calculate::run_calculate(args, &config)),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Version => {
            println!("preloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            // Validation reports still print, but invalid requests exit nonzero.
            if value["valid"].as_bool() == Some(false) {
                process::exit(1);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
