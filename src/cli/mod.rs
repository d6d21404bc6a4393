//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod budget;
pub mod category;
pub mod clean;
pub mod export;
pub mod pin;
pub mod record;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, handle_period_command, BudgetCommands, PeriodCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use clean::{handle_clean_command, CleanArgs};
pub use export::{handle_export_command, ExportArgs};
pub use pin::{handle_pin_command, require_unlocked, PinCommands};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_advice_command, handle_summary_command};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{HearthError, HearthResult};
use crate::models::{Money, MonthRef, SubcategoryKey};

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> HearthResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| HearthError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format.", s)))
}

/// Parse a `YYYY-MM` month
pub fn parse_month(s: &str) -> HearthResult<MonthRef> {
    MonthRef::parse(s).map_err(|e| HearthError::Validation(e.to_string()))
}

/// Parse a non-negative amount in the configured locale
pub fn parse_amount(s: &str, settings: &Settings) -> HearthResult<Money> {
    Money::parse_non_negative(s, settings.locale)
        .map_err(|e| HearthError::Validation(format!("Invalid amount '{}': {}", s, e)))
}

/// Which end of a range a bound stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse `YYYY-MM-DD`, or `YYYY-MM` taken as the month's first or last day
pub fn parse_day_bound(s: &str, bound: Bound) -> HearthResult<NaiveDate> {
    if let Ok(date) = parse_date(s) {
        return Ok(date);
    }
    let month = parse_month(s).map_err(|_| {
        HearthError::Validation(format!("Invalid date '{}'. Use YYYY-MM or YYYY-MM-DD.", s))
    })?;
    Ok(match bound {
        Bound::Start => month.first_day(),
        Bound::End => month.last_day(),
    })
}

/// Build a subcategory key from two trimmed, non-empty names
pub fn subcategory_key(category: &str, subcategory: &str) -> HearthResult<SubcategoryKey> {
    let (category, subcategory) = (category.trim(), subcategory.trim());
    if category.is_empty() || subcategory.is_empty() {
        return Err(HearthError::Validation(
            "Category and subcategory names cannot be empty".into(),
        ));
    }
    Ok(SubcategoryKey::new(category, subcategory))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_bound() {
        assert_eq!(parse_day_bound("2025-02", Bound::Start).unwrap(), date(2025, 2, 1));
        assert_eq!(parse_day_bound("2025-02", Bound::End).unwrap(), date(2025, 2, 28));
        assert_eq!(parse_day_bound("2025-02-10", Bound::End).unwrap(), date(2025, 2, 10));
        assert!(parse_day_bound("feb", Bound::Start).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        let settings = Settings::default();
        assert_eq!(parse_amount("17.000", &settings).unwrap().units(), 17000);
        assert!(parse_amount("-5", &settings).is_err());
    }

    #[test]
    fn test_subcategory_key() {
        assert_eq!(subcategory_key(" Hogar ", "Luz").unwrap().category, "Hogar");
        assert!(subcategory_key("Hogar", "  ").is_err());
    }
}
