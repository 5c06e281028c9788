use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{Deserialize, Serialize};

use solar_calc_core::input::FormInput;
use solar_calc_core::projection::{self, ParameterSet, ProjectionResult};
use solar_calc_core::report::{self, ReportLanguage, SummaryRow};
use solar_calc_core::share::{self, SharePayload};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_projection(params_json: String) -> NapiResult<String> {
    let params: ParameterSet = serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let output = projection::run_projection(&params);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Same as `calculate_projection` but from raw form fields, which may be
/// numbers or typed text such as "80,000,000".
#[napi]
pub fn calculate_from_form(form_json: String) -> NapiResult<String> {
    let form: FormInput = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let output = projection::run_projection(&form.normalize());
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ShareRequest {
    params: ParameterSet,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    date: Option<chrono::NaiveDate>,
}

/// Projects `params` and returns the share token for the pair.
#[napi]
pub fn encode_share(request_json: String) -> NapiResult<String> {
    let request: ShareRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let mut payload = SharePayload::new(request.params);
    payload.project_name = request.project_name;
    payload.date = request.date;
    share::encode(&payload).map_err(to_napi_error)
}

/// Accepts a bare token or a full share link.
#[napi]
pub fn decode_share(token_or_url: String) -> NapiResult<String> {
    let token = share::extract_payload_param(&token_or_url);
    let payload = share::decode(&token).map_err(to_napi_error)?;
    serde_json::to_string(&payload).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportRows {
    summary: Vec<SummaryRow>,
    year_headers: [&'static str; 4],
    years: Vec<[String; 4]>,
}

#[napi]
pub fn report_rows(result_json: String, language: String) -> NapiResult<String> {
    let result: ProjectionResult = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let lang: ReportLanguage = language.parse().map_err(to_napi_error)?;
    let rows = ReportRows {
        summary: report::summary_rows(&result, lang),
        year_headers: report::year_headers(lang),
        years: report::year_rows(&result),
    };
    serde_json::to_string(&rows).map_err(to_napi_error)
}
