pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Known column names in display order. serde_json objects iterate
/// alphabetically, which scrambles schedule and offer rows.
const COLUMN_ORDER: [&str; 17] = [
    "number",
    "date",
    "total_payment",
    "interest_payment",
    "debt_payment",
    "remaining_debt",
    "id",
    "requested_amount",
    "total_amount",
    "term",
    "monthly_payment",
    "rate",
    "is_insurance_enabled",
    "is_salary_client",
    "field",
    "rejected_value",
    "cause",
];

/// Row headers for a table: known columns first, anything else appended.
pub(crate) fn ordered_columns(first: &Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = COLUMN_ORDER
        .iter()
        .filter(|name| first.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    for key in first.keys() {
        if !COLUMN_ORDER.contains(&key.as_str()) {
            headers.push(key.clone());
        }
    }
    headers
}
