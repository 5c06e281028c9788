use clap::Args;
use serde_json::Value;

use solar_calc_core::projection::run_projection;

use super::form::{resolve_form, FormArgs};
use crate::settings::Settings;

/// Arguments for a projection run
#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub form: FormArgs,
}

pub fn run_project(args: ProjectArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_form(&args.form, settings)?.normalize();
    let output = run_projection(&params);
    Ok(serde_json::to_value(output)?)
}
