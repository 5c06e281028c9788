use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};
use tracing::warn;

use solar_calc_core::share::{self, SharePayload};

use super::form::{resolve_form, FormArgs};
use crate::settings::Settings;

/// Arguments for creating a share token
#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Project name stored with the shared result
    #[arg(long)]
    pub project_name: Option<String>,

    /// Report date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Page the link opens; overrides `share_base_url` from settings
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Arguments for reopening a shared result
#[derive(Args)]
pub struct RestoreArgs {
    /// Share token, or a full link containing `?data=<token>`
    pub token: String,
}

pub fn run_share(args: ShareArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_form(&args.form, settings)?.normalize();

    let mut payload = SharePayload::new(params);
    if let Some(name) = args.project_name {
        payload = payload.with_project_name(name);
    }
    if let Some(date) = args.date {
        payload = payload.with_date(date);
    }

    let token = share::encode(&payload)?;
    let url = args
        .base_url
        .as_deref()
        .or(settings.share_base_url.as_deref())
        .map(|base| share::share_url(base, &token));

    Ok(json!({
        "token": token,
        "url": url,
        "project_name": payload.project_name,
        "date": payload.date,
    }))
}

pub fn run_restore(args: RestoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let token = share::extract_payload_param(&args.token);
    let payload = share::decode(&token)?;

    let mut warnings = Vec::new();
    if !payload.is_consistent() {
        warn!("shared result differs from a fresh projection of its parameters");
        warnings.push(
            "Shared result differs from a fresh projection of its parameters; \
             it may come from an older calculator version"
                .to_string(),
        );
    }

    Ok(json!({
        "project_name": payload.project_name,
        "date": payload.date,
        "params": payload.params,
        "result": payload.result,
        "warnings": warnings,
    }))
}
