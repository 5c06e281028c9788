use serde_json::Value;
use std::io;

use super::{projection_years, result_of, scalar_text, YEAR_COLUMNS};

/// Write output as CSV to stdout: year rows for a projection, otherwise
/// two-column field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV write error: {e}");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = result_of(value);

    if let Some(years) = projection_years(result) {
        wtr.write_record(YEAR_COLUMNS)?;
        for year in years {
            let row: Vec<String> = YEAR_COLUMNS
                .iter()
                .map(|col| csv_value(year.get(*col).unwrap_or(&Value::Null)))
                .collect();
            wtr.write_record(&row)?;
        }
    } else if let Value::Object(map) = result {
        wtr.write_record(["field", "value"])?;
        for (key, val) in map {
            wtr.write_record([key.as_str(), &csv_value(val)])?;
        }
    } else {
        wtr.write_record([csv_value(result)])?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}
