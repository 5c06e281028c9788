pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Year rows of a projection result, if `result` is one.
pub(crate) fn projection_years(result: &Value) -> Option<&Vec<Value>> {
    result.get("years").and_then(Value::as_array)
}

/// Scalar rendering shared by the text formatters; `null` is a metric
/// that does not apply and shows as "-".
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => solar_calc_core::report::ABSENT.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

pub(crate) const YEAR_COLUMNS: [&str; 4] =
    ["year", "net_profit", "cumulative_profit", "annual_debt_service"];
