use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{projection_years, result_of, scalar_text, YEAR_COLUMNS};

/// Format output as tables: the projection summary, then one row per
/// year, then any warnings and the methodology line.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match projection_years(result) {
        Some(years) => {
            if let Some(summary) = result.get("summary") {
                println!("{}", field_table(summary, &["break_even_year"], result));
            }
            println!("\n{}", years_table(years));
        }
        None => println!("{}", field_table(result, &[], result)),
    }

    if let Value::Object(envelope) = value {
        print_notes(envelope);
    }
}

/// Two-column field/value table; `extra` keys are looked up in `source`.
fn field_table(fields: &Value, extra: &[&str], source: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    match fields {
        Value::Object(map) => {
            for (key, val) in map {
                builder.push_record([key.as_str(), &scalar_text(val)]);
            }
        }
        other => builder.push_record(["value", &scalar_text(other)]),
    }
    for key in extra {
        let val = source.get(*key).unwrap_or(&Value::Null);
        builder.push_record([*key, &scalar_text(val)]);
    }
    Table::from(builder).to_string()
}

fn years_table(years: &[Value]) -> String {
    if years.is_empty() {
        return "(no projection years)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(YEAR_COLUMNS);
    for year in years {
        let row: Vec<String> = YEAR_COLUMNS
            .iter()
            .map(|col| scalar_text(year.get(*col).unwrap_or(&Value::Null)))
            .collect();
        builder.push_record(row);
    }
    Table::from(builder).to_string()
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_years_table_has_one_row_per_year() {
        let years = vec![
            json!({"year": 1, "net_profit": "10", "cumulative_profit": "10", "annual_debt_service": "5"}),
            json!({"year": 2, "net_profit": "10", "cumulative_profit": "20", "annual_debt_service": "5"}),
        ];
        let rendered = years_table(&years);
        assert!(rendered.contains("cumulative_profit"));
        assert!(rendered.contains("20"));
        assert_eq!(years_table(&[]), "(no projection years)");
    }

    #[test]
    fn test_missing_break_even_renders_dash() {
        let result = json!({"summary": {"roi": null}, "break_even_year": null});
        let rendered = field_table(&result["summary"], &["break_even_year"], &result);
        assert!(rendered.contains("break_even_year"));
        assert!(!rendered.contains("null"));
        assert!(rendered.contains('-'));
    }
}
