mod commands;
mod input;
mod output;
mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::export::ExportArgs;
use commands::project::ProjectArgs;
use commands::share::{RestoreArgs, ShareArgs};
use settings::Settings;

/// Solar-farm investment projections
#[derive(Parser)]
#[command(
    name = "solar-calc",
    version,
    about = "Solar-farm investment projections",
    long_about = "Projects year-by-year profit for a solar farm from capacity, sun hours, \
                  SMP/REC prices, operating cost and loan terms, with decimal precision. \
                  Results can be shared as URL-safe tokens or exported as CSV reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the `output` setting)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project annual profit, break-even year, ROI and payback
    Project(ProjectArgs),
    /// Create a share token (and link) for a projection
    Share(ShareArgs),
    /// Reopen a shared projection from its token or link
    Restore(RestoreArgs),
    /// Write the summary and year table to a CSV report
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let settings = Settings::load().unwrap_or_else(|e| fail(format!("invalid settings: {e}")));
    init_tracing(&settings);

    let format = match cli.output {
        Some(format) => format,
        None => OutputFormat::from_str(&settings.output, true)
            .unwrap_or_else(|e| fail(format!("invalid output setting: {e}"))),
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::project::run_project(args, &settings),
        Commands::Share(args) => commands::share::run_share(args, &settings),
        Commands::Restore(args) => commands::share::run_restore(args),
        Commands::Export(args) => commands::export::run_export(args, &settings),
        Commands::Version => {
            println!("solar-calc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
