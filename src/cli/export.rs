//! CLI command for the CSV report

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{HearthError, HearthResult};
use crate::export::{export_to_dir, ExportWindow};
use crate::storage::Storage;

/// Report window options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    /// The current calendar month
    Month,
    /// January 1st through the end of this month
    Ytd,
    /// The last N calendar years (see --years)
    Years,
}

/// Arguments of `hearth export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Range of dates to export
    #[arg(short, long, value_enum, default_value = "month")]
    pub window: WindowArg,

    /// Span for `--window years`; defaults to the configured value
    #[arg(long)]
    pub years: Option<u32>,

    /// Directory to write the file into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, settings: &Settings, args: ExportArgs) -> HearthResult<()> {
    let window = match args.window {
        WindowArg::Month => ExportWindow::CurrentMonth,
        WindowArg::Ytd => ExportWindow::YearToDate,
        WindowArg::Years => ExportWindow::TrailingYears(args.years.unwrap_or(settings.export_trailing_years)),
    };

    if !args.output.is_dir() {
        return Err(HearthError::Export(format!(
            "Output directory does not exist: {}",
            args.output.display()
        )));
    }

    let today = Local::now().date_naive();
    let (path, summary) = export_to_dir(&storage.snapshot()?, settings, window, today, &args.output)?;

    println!("Exported {} to {}", window.window(today), path.display());
    println!(
        "  {} transaction(s), {} budget row(s), {} record entr(ies)",
        summary.transactions, summary.budgets, summary.records
    );
    Ok(())
}
