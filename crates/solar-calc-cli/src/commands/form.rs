use clap::Args;
use solar_calc_core::input::{FieldValue, FormField, FormInput};
use solar_calc_core::store::{self, JsonFileStore};
use tracing::info;

use crate::input;
use crate::settings::Settings;

/// Calculator form fields. Values are taken as typed, so "80,000,000" works.
#[derive(Args, Clone, Debug, Default)]
#[command(allow_hyphen_values = true)]
pub struct FormArgs {
    /// Installed capacity (kW)
    #[arg(long)]
    pub capacity: Option<String>,

    /// Average daily generation hours
    #[arg(long)]
    pub hours: Option<String>,

    /// SMP price per kWh
    #[arg(long)]
    pub smp: Option<String>,

    /// REC price per kWh
    #[arg(long)]
    pub rec: Option<String>,

    /// REC weighting multiplier
    #[arg(long)]
    pub weight: Option<String>,

    /// Fixed annual operating cost
    #[arg(long)]
    pub operation_cost: Option<String>,

    /// Cash equity invested
    #[arg(long)]
    pub equity: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub loan: Option<String>,

    /// Annual interest rate in percent (e.g. 5.8)
    #[arg(long)]
    pub interest: Option<String>,

    /// Loan term and projection horizon (years)
    #[arg(long)]
    pub term: Option<String>,

    /// Interest-only years at the start of the term
    #[arg(long)]
    pub defer_period: Option<String>,

    /// Path to a JSON or YAML form file (flags still override its fields)
    #[arg(long)]
    pub input: Option<String>,

    /// Remember the resulting form as the last-used values
    #[arg(long)]
    pub save: bool,
}

impl FormArgs {
    /// Fields given explicitly on the command line.
    pub fn overrides(&self) -> Vec<(FormField, FieldValue)> {
        let flags = [
            (FormField::Capacity, &self.capacity),
            (FormField::Hours, &self.hours),
            (FormField::Smp, &self.smp),
            (FormField::Rec, &self.rec),
            (FormField::Weight, &self.weight),
            (FormField::OperationCost, &self.operation_cost),
            (FormField::Equity, &self.equity),
            (FormField::Loan, &self.loan),
            (FormField::Interest, &self.interest),
            (FormField::Term, &self.term),
            (FormField::DeferPeriod, &self.defer_period),
        ];
        flags
            .into_iter()
            .filter_map(|(field, value)| {
                value
                    .as_deref()
                    .map(|v| (field, FieldValue::Text(v.to_string())))
            })
            .collect()
    }
}

/// Build the form: `--input` file, else piped JSON, else the remembered
/// form, else the calculator defaults; then overlay any flags.
pub fn resolve_form(
    args: &FormArgs,
    settings: &Settings,
) -> Result<FormInput, Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::new(&settings.store_dir);

    let base = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(form) = input::stdin::read_piped_form()? {
        form
    } else {
        store::load_last_input(&store)?.unwrap_or_default()
    };

    let form = base.merge(args.overrides());

    if args.save {
        store::save_last_input(&mut store, &form)?;
        info!(dir = %store.dir().display(), "saved form as last-used values");
    }

    Ok(form)
}
