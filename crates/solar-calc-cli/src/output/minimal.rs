use serde_json::Value;

use super::{result_of, scalar_text};

/// Print just the key answer: a share link or token when there is one,
/// otherwise the headline return of a projection.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = value {
        for key in ["url", "token", "path"] {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return scalar_text(val);
            }
        }
    }

    if let Some(summary) = result.get("summary") {
        let key = match summary.get("basis").and_then(Value::as_str) {
            Some("loan") => "loan_roi",
            _ => "roi",
        };
        return scalar_text(summary.get(key).unwrap_or(&Value::Null));
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{key}: {}", scalar_text(val)))
            .unwrap_or_default(),
        other => scalar_text(other),
    }
}
