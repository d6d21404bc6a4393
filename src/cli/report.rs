//! Summary and advice commands

use super::parse_month;
use crate::advisor::{request_advice, CommandProvider};
use crate::config::Settings;
use crate::display::{format_advice, format_overview};
use crate::error::{HearthError, HearthResult};
use crate::models::MonthRef;
use crate::services::monthly_overview;
use crate::storage::Storage;

fn month_or_current(month: Option<&str>) -> HearthResult<MonthRef> {
    month.map(parse_month).transpose().map(|m| m.unwrap_or_else(MonthRef::current))
}

/// Print the budget summary of a month
pub fn handle_summary_command(storage: &Storage, settings: &Settings, month: Option<&str>) -> HearthResult<()> {
    let month = month_or_current(month)?;
    let overview = monthly_overview(&storage.snapshot()?, month);
    print!("{}", format_overview(&overview, settings));
    Ok(())
}

/// Ask the configured advisor about a month
///
/// Advisor failures are printed and do not fail the command.
pub fn handle_advice_command(storage: &Storage, settings: &Settings, month: Option<&str>) -> HearthResult<()> {
    let command = settings.advisor_command.as_deref().ok_or_else(|| {
        HearthError::Config(
            "No advisor configured. Set \"advisor_command\" in the settings file.".into(),
        )
    })?;

    let month = month_or_current(month)?;
    let overview = monthly_overview(&storage.snapshot()?, month);
    let lines: Vec<_> = overview.lines().cloned().collect();

    match request_advice(&CommandProvider::new(command), &lines) {
        Ok(advice) => print!("{}", format_advice(&advice)),
        Err(e) => eprintln!("Could not get advice: {}", e),
    }
    Ok(())
}
