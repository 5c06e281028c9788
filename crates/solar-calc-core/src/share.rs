//! URL-safe share tokens carrying a parameter set together with its
//! projection, so a shared link reopens the exact same result.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SolarCalcError;
use crate::input::MAX_PROJECTION_YEARS;
use crate::projection::{project, ParameterSet, ProjectionResult};
use crate::SolarCalcResult;

/// Query parameter that carries the token in a share link.
pub const SHARE_QUERY_PARAM: &str = "data";

/// Tokens longer than this are rejected before decoding.
pub const MAX_SHARE_TOKEN_LEN: usize = 256 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub params: ParameterSet,
    pub result: ProjectionResult,
}

impl SharePayload {
    /// Project `params` and bundle the pair.
    pub fn new(params: ParameterSet) -> Self {
        let result = project(&params);
        SharePayload {
            project_name: None,
            date: None,
            params,
            result,
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True when the carried result is what the carried parameters project to.
    pub fn is_consistent(&self) -> bool {
        project(&self.params) == self.result
    }
}

/// Compact JSON in the URL-safe base64 alphabet, no padding.
pub fn encode(payload: &SharePayload) -> SolarCalcResult<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode(token: &str) -> SolarCalcResult<SharePayload> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SolarCalcError::ShareDecode("token is empty".into()));
    }
    if token.len() > MAX_SHARE_TOKEN_LEN {
        warn!(len = token.len(), "rejecting oversized share token");
        return Err(SolarCalcError::ShareDecode(format!(
            "token of {} bytes exceeds the {MAX_SHARE_TOKEN_LEN}-byte limit",
            token.len()
        )));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim_end_matches('='))
        .map_err(|e| SolarCalcError::ShareDecode(format!("invalid base64: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| SolarCalcError::ShareDecode(format!("invalid UTF-8: {e}")))?;
    let payload: SharePayload = serde_json::from_str(&json)
        .map_err(|e| SolarCalcError::ShareDecode(format!("invalid payload: {e}")))?;

    if !payload.params.within_horizon() {
        warn!(
            term_years = payload.params.term_years,
            defer_years = payload.params.defer_years,
            "rejecting share token with out-of-range horizon"
        );
        return Err(SolarCalcError::ShareDecode(format!(
            "term of {} years with {} defer years is outside ±{MAX_PROJECTION_YEARS} years",
            payload.params.term_years, payload.params.defer_years
        )));
    }
    Ok(payload)
}

/// `base_url?data=<token>`, replacing any query already on `base_url`.
pub fn share_url(base_url: &str, token: &str) -> String {
    let base = base_url.split(['?', '#']).next().unwrap_or(base_url);
    format!("{base}?{SHARE_QUERY_PARAM}={token}")
}

/// Pull the token out of a pasted share link; bare tokens pass through.
pub fn extract_payload_param(input: &str) -> String {
    let input = input.trim();
    let Some((_, query)) = input.split_once('?') else {
        return input.to_string();
    };
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARE_QUERY_PARAM)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_payload() -> SharePayload {
        SharePayload::new(ParameterSet {
            capacity_kw: dec!(100),
            daily_hours: dec!(3.5),
            smp_price: dec!(130),
            rec_price: dec!(70),
            rec_weight: dec!(1.2),
            equity: dec!(80_000_000),
            loan_principal: dec!(150_000_000),
            annual_interest_rate_pct: dec!(5.8),
            term_years: 10,
            defer_years: 1,
            ..ParameterSet::default()
        })
        .with_project_name("태양광 수익성 계산기")
        .with_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_round_trip() {
        let payload = sample_payload();
        let token = encode(&payload).unwrap();
        assert_eq!(decode(&token).unwrap(), payload);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&sample_payload()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(""), Err(SolarCalcError::ShareDecode(_))));
        assert!(matches!(decode("!!!"), Err(SolarCalcError::ShareDecode(_))));
        // Valid base64 of "hello", not a payload
        assert!(matches!(decode("aGVsbG8"), Err(SolarCalcError::ShareDecode(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_token() {
        let token = "A".repeat(MAX_SHARE_TOKEN_LEN + 1);
        assert!(matches!(decode(&token), Err(SolarCalcError::ShareDecode(_))));
    }

    #[test]
    fn test_share_url_and_extract() {
        let url = share_url("https://calc.example.com/?old=1", "abc_-");
        assert_eq!(url, "https://calc.example.com/?data=abc_-");
        assert_eq!(extract_payload_param(&url), "abc_-");
        assert_eq!(extract_payload_param("  abc_- "), "abc_-");
        assert_eq!(extract_payload_param("https://x.test/?a=1&data=ab%2Dc#top"), "ab-c");
        assert_eq!(extract_payload_param("https://x.test/?a=1"), "");
    }

    #[test]
    fn test_consistency_check() {
        let mut payload = sample_payload();
        assert!(payload.is_consistent());
        payload.params.operating_cost = dec!(1);
        assert!(!payload.is_consistent());
    }

    #[test]
    fn test_decode_rejects_out_of_range_horizon() {
        let mut payload = sample_payload();
        payload.params.term_years = i32::MAX;
        // Encoding does not project, so the stored result stays small
        let token = encode(&payload).unwrap();
        match decode(&token) {
            Err(SolarCalcError::ShareDecode(msg)) => assert!(msg.contains("2147483647")),
            other => panic!("expected ShareDecode error, got {other:?}"),
        }

        payload.params.term_years = 10;
        payload.params.defer_years = -5_000;
        assert!(matches!(
            decode(&encode(&payload).unwrap()),
            Err(SolarCalcError::ShareDecode(_))
        ));
    }
}
