use clap::Args;
use serde_json::{json, Value};
use std::io;
use std::path::Path;
use tracing::info;

use solar_calc_core::projection::{project, ProjectionResult};
use solar_calc_core::report::{self, ReportLanguage};

use super::form::{resolve_form, FormArgs};
use crate::settings::Settings;

/// Arguments for writing a report file
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Destination CSV file
    #[arg(long)]
    pub out: String,

    /// Label language (ko, en); defaults to the configured language
    #[arg(long)]
    pub lang: Option<String>,
}

pub fn run_export(args: ExportArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let lang: ReportLanguage = args.lang.as_deref().unwrap_or(&settings.language).parse()?;
    let params = resolve_form(&args.form, settings)?.normalize();
    let result = project(&params);

    let path = Path::new(&args.out);
    write_report(csv::WriterBuilder::new().flexible(true).from_path(path)?, &result, lang)?;
    info!(path = %path.display(), years = result.years.len(), "report written");

    Ok(json!({
        "path": path.display().to_string(),
        "language": lang,
        "years": result.years.len(),
    }))
}

/// Summary label/value rows, a blank line, then the year table.
fn write_report<W: io::Write>(
    mut wtr: csv::Writer<W>,
    result: &ProjectionResult,
    lang: ReportLanguage,
) -> csv::Result<()> {
    for row in report::summary_rows(result, lang) {
        wtr.write_record([row.label, row.value])?;
    }
    wtr.write_record([""])?;
    wtr.write_record(report::year_headers(lang))?;
    for row in report::year_rows(result) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
