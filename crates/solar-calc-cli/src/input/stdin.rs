use solar_calc_core::input::FormInput;
use std::io::{self, Read};

/// Form JSON piped on stdin. An interactive terminal or an empty pipe
/// yields None so the caller can fall back to remembered values.
pub fn read_piped_form() -> Result<Option<FormInput>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_form(&buffer)
}

fn parse_form(text: &str) -> Result<Option<FormInput>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let form = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse form from stdin: {e}"))?;
    Ok(Some(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_pipe_is_none() {
        assert!(parse_form("  \n").unwrap().is_none());
    }

    #[test]
    fn test_partial_form_keeps_defaults() {
        let form = parse_form(r#"{"loan": "0"}"#).unwrap().unwrap();
        let params = form.normalize();
        assert_eq!(params.loan_principal, Decimal::ZERO);
        assert_eq!(params.term_years, 10);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = parse_form("{capacity").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
