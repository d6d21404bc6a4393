//! Export module for Hearth
//!
//! Writes a spreadsheet-friendly CSV report for a fixed window ending
//! today: the current month, the year to date, or the trailing N years.

pub mod csv;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{HearthError, HearthResult};
use crate::models::{DateWindow, MonthRef};
use crate::sync::LiveState;

pub use self::csv::{budget_rows, build_report, write_report, BudgetRow, ExportSummary, BOM};

/// Which range of dates a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportWindow {
    CurrentMonth,
    YearToDate,
    TrailingYears(u32),
}

impl ExportWindow {
    /// Concrete dates for a report generated on `today`
    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match self {
            Self::CurrentMonth => DateWindow::month(MonthRef::from_date(today)),
            Self::YearToDate => DateWindow::year_to_date(today),
            Self::TrailingYears(years) => DateWindow::trailing_years(today, (*years).max(1)),
        }
    }

    /// Short name used in file names
    pub fn slug(&self) -> String {
        match self {
            Self::CurrentMonth => "month".to_string(),
            Self::YearToDate => "ytd".to_string(),
            Self::TrailingYears(years) => format!("{}y", (*years).max(1)),
        }
    }

    /// File name for a report generated on `today`
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("hearth_{}_{}.csv", self.slug(), today.format("%Y-%m-%d"))
    }
}

/// Write the report into `dir` and return the created file's path
pub fn export_to_dir(
    state: &LiveState,
    settings: &Settings,
    window: ExportWindow,
    today: NaiveDate,
    dir: &Path,
) -> HearthResult<(PathBuf, ExportSummary)> {
    let path = dir.join(window.file_name(today));
    let file = File::create(&path)
        .map_err(|e| HearthError::Export(format!("Failed to create {}: {}", path.display(), e)))?;

    let summary = write_report(state, &window.window(today), settings, BufWriter::new(file))?;
    tracing::info!(path = %path.display(), rows = summary.transactions, "report exported");

    Ok((path, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_windows() {
        let today = date(2025, 3, 14);

        let month = ExportWindow::CurrentMonth.window(today);
        assert_eq!(month.first_day, date(2025, 3, 1));
        assert_eq!(month.last_day, date(2025, 3, 31));

        let ytd = ExportWindow::YearToDate.window(today);
        assert_eq!(ytd.first_day, date(2025, 1, 1));
        assert_eq!(ytd.last_day, date(2025, 3, 31));

        let trailing = ExportWindow::TrailingYears(5).window(today);
        assert_eq!(trailing.first_day, date(2021, 1, 1));
        assert_eq!(trailing.last_day, date(2025, 3, 31));
    }

    #[test]
    fn test_file_name() {
        let today = date(2025, 3, 14);
        assert_eq!(ExportWindow::YearToDate.file_name(today), "hearth_ytd_2025-03-14.csv");
        assert_eq!(ExportWindow::TrailingYears(5).file_name(today), "hearth_5y_2025-03-14.csv");
    }

    #[test]
    fn test_export_to_dir() {
        let temp_dir = TempDir::new().unwrap();
        let today = date(2025, 3, 14);

        let (path, summary) = export_to_dir(
            &LiveState::new(),
            &Settings::default(),
            ExportWindow::CurrentMonth,
            today,
            temp_dir.path(),
        )
        .unwrap();

        assert_eq!(summary, ExportSummary::default());
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with(BOM));
    }
}
