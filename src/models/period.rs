//! Calendar months, time windows and temporary budget periods
//!
//! Months are stored the way the household data has always stored them:
//! `month` is zero-based (0 = January) alongside a full year. Windows are
//! inclusive day ranges that convert to epoch milliseconds at local midnight,
//! which is how transaction timestamps are derived.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Epoch milliseconds of `date` at local midnight
///
/// Falls back to UTC midnight when local midnight does not exist (DST gap).
pub fn local_midnight_millis(date: NaiveDate) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// A calendar month, ordered year-major then month-minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredMonth")]
pub struct MonthRef {
    /// Full year
    pub year: i32,
    /// Zero-based month (0 = January, 11 = December)
    pub month: u32,
}

/// A month as read from disk, checked through [`MonthRef::new`]
#[derive(Deserialize)]
struct StoredMonth {
    year: i32,
    month: u32,
}

impl TryFrom<StoredMonth> for MonthRef {
    type Error = PeriodParseError;

    fn try_from(stored: StoredMonth) -> Result<Self, Self::Error> {
        MonthRef::new(stored.month, stored.year)
    }
}

impl MonthRef {
    /// Create a month reference, validating the zero-based month
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodParseError> {
        if month > 11 {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 11 {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month + 1, 1)
            .map(|d| d - Duration::days(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Parse `YYYY-MM` where `MM` is the human month number (01-12)
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month: month - 1,
        })
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// An inclusive range of calendar days
///
/// The window starts at local midnight of `first_day` and ends at the last
/// millisecond of `last_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl DateWindow {
    /// A window over explicit dates
    pub fn from_dates(first_day: NaiveDate, last_day: NaiveDate) -> Result<Self, PeriodParseError> {
        if first_day > last_day {
            return Err(PeriodParseError::Reversed {
                from: first_day.to_string(),
                to: last_day.to_string(),
            });
        }
        Ok(Self { first_day, last_day })
    }

    /// The whole calendar month
    pub fn month(month: MonthRef) -> Self {
        Self {
            first_day: month.first_day(),
            last_day: month.last_day(),
        }
    }

    /// From the start of `from` through the end of `to`
    pub fn months(from: MonthRef, to: MonthRef) -> Result<Self, PeriodParseError> {
        Self::from_dates(from.first_day(), to.last_day())
    }

    /// January 1st of `today`'s year through the end of `today`'s month
    pub fn year_to_date(today: NaiveDate) -> Self {
        let month = MonthRef::from_date(today);
        Self {
            first_day: MonthRef { year: today.year(), month: 0 }.first_day(),
            last_day: month.last_day(),
        }
    }

    /// `years` whole calendar years ending with `today`'s year, cut at the end of `today`'s month
    pub fn trailing_years(today: NaiveDate, years: u32) -> Self {
        let span = years.max(1) as i32;
        let month = MonthRef::from_date(today);
        Self {
            first_day: MonthRef {
                year: today.year() - span + 1,
                month: 0,
            }
            .first_day(),
            last_day: month.last_day(),
        }
    }

    /// First instant in epoch milliseconds
    pub fn start_millis(&self) -> i64 {
        local_midnight_millis(self.first_day)
    }

    /// Last instant in epoch milliseconds
    pub fn end_millis(&self) -> i64 {
        match self.last_day.succ_opt() {
            Some(next) => local_midnight_millis(next) - 1,
            None => i64::MAX,
        }
    }

    /// Whether an epoch-millisecond timestamp falls inside the window
    pub fn contains_millis(&self, timestamp: i64) -> bool {
        timestamp >= self.start_millis() && timestamp <= self.end_millis()
    }

    /// Whether a calendar day falls inside the window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Whether every day of `other` lies inside this window
    pub fn covers(&self, other: &DateWindow) -> bool {
        self.first_day <= other.first_day && other.last_day <= self.last_day
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.first_day.format("%Y-%m-%d"),
            self.last_day.format("%Y-%m-%d")
        )
    }
}

/// A temporary budget amount valid for an inclusive month range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub amount: Money,
    pub from: MonthRef,
    pub to: MonthRef,
}

impl BudgetPeriod {
    /// Create a new period
    pub fn new(amount: Money, from: MonthRef, to: MonthRef) -> Self {
        Self { amount, from, to }
    }

    /// Whether `month` lies inside `[from, to]`; `to` covers its whole month
    pub fn contains(&self, month: MonthRef) -> bool {
        self.from <= month && month <= self.to
    }

    /// Whether two periods share at least one month
    pub fn overlaps(&self, other: &BudgetPeriod) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Whether the period shares at least one day with `window`
    pub fn intersects(&self, window: &DateWindow) -> bool {
        self.from.first_day() <= window.last_day && window.first_day <= self.to.last_day()
    }

    /// The days covered by this period
    pub fn window(&self) -> DateWindow {
        DateWindow {
            first_day: self.from.first_day(),
            last_day: self.to.last_day(),
        }
    }

    /// Validate amount and range order
    pub fn validate(&self) -> Result<(), PeriodParseError> {
        if self.amount.is_negative() {
            return Err(PeriodParseError::NegativeAmount(self.amount.units()));
        }
        if !self.amount.is_within_limit() {
            return Err(PeriodParseError::AmountTooLarge(self.amount.units()));
        }
        if self.from.month > 11 {
            return Err(PeriodParseError::InvalidMonth(self.from.month + 1));
        }
        if self.to.month > 11 {
            return Err(PeriodParseError::InvalidMonth(self.to.month + 1));
        }
        if self.from > self.to {
            return Err(PeriodParseError::Reversed {
                from: self.from.to_string(),
                to: self.to.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}..{})", self.amount, self.from, self.to)
    }
}

/// Error type for month and period parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodParseError {
    #[error("Invalid month format (expected YYYY-MM): {0}")]
    InvalidFormat(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("Start {from} is after end {to}")]
    Reversed { from: String, to: String },
    #[error("Budget amount cannot be negative: {0}")]
    NegativeAmount(i64),
    #[error("Budget amount is too large: {0}")]
    AmountTooLarge(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: u32, y: i32) -> MonthRef {
        MonthRef::new(m, y).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_ordering_is_year_major() {
        assert!(month(11, 2024) < month(0, 2025));
        assert!(month(1, 2025) < month(2, 2025));
        assert_eq!(month(11, 2024).next(), month(0, 2025));
        assert_eq!(month(0, 2025).prev(), month(11, 2024));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month(1, 2024).last_day(), date(2024, 2, 29));
        assert_eq!(month(11, 2025).last_day(), date(2025, 12, 31));
        assert_eq!(month(2, 2025).first_day(), date(2025, 3, 1));
        assert!(MonthRef::new(12, 2025).is_err());
    }

    #[test]
    fn test_parse_and_display_use_human_months() {
        let m = MonthRef::parse("2025-03").unwrap();
        assert_eq!(m, month(2, 2025));
        assert_eq!(m.to_string(), "2025-03");
        assert!(MonthRef::parse("2025-13").is_err());
        assert!(MonthRef::parse("March").is_err());
    }

    #[test]
    fn test_window_millis_cover_whole_month() {
        let window = DateWindow::month(month(2, 2025));
        let first = local_midnight_millis(date(2025, 3, 1));
        let last_day = local_midnight_millis(date(2025, 3, 31));
        let next = local_midnight_millis(date(2025, 4, 1));

        assert!(window.contains_millis(first));
        assert!(window.contains_millis(last_day));
        assert!(window.contains_millis(next - 1));
        assert!(!window.contains_millis(next));
        assert!(!window.contains_millis(first - 1));
    }

    #[test]
    fn test_window_constructors() {
        let today = date(2025, 6, 14);
        let ytd = DateWindow::year_to_date(today);
        assert_eq!(ytd.first_day, date(2025, 1, 1));
        assert_eq!(ytd.last_day, date(2025, 6, 30));

        let trailing = DateWindow::trailing_years(today, 5);
        assert_eq!(trailing.first_day, date(2021, 1, 1));

        assert!(DateWindow::from_dates(date(2025, 2, 1), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_period_contains_whole_end_month() {
        let period = BudgetPeriod::new(Money::from_units(50000), month(0, 2025), month(2, 2025));
        assert!(period.contains(month(1, 2025)));
        assert!(period.contains(month(2, 2025)));
        assert!(!period.contains(month(3, 2025)));
        assert!(period.window().contains_date(date(2025, 3, 31)));
    }

    #[test]
    fn test_period_overlap() {
        let a = BudgetPeriod::new(Money::from_units(1), month(1, 2025), month(2, 2025));
        let b = BudgetPeriod::new(Money::from_units(1), month(2, 2025), month(4, 2025));
        let c = BudgetPeriod::new(Money::from_units(1), month(5, 2025), month(6, 2025));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_period_validate() {
        let reversed = BudgetPeriod::new(Money::from_units(1), month(3, 2025), month(1, 2025));
        assert!(matches!(reversed.validate(), Err(PeriodParseError::Reversed { .. })));
        let negative = BudgetPeriod::new(Money::from_units(-1), month(1, 2025), month(1, 2025));
        assert!(matches!(negative.validate(), Err(PeriodParseError::NegativeAmount(-1))));
        let huge = BudgetPeriod::new(Money::MAX + Money::from_units(1), month(1, 2025), month(1, 2025));
        assert!(matches!(huge.validate(), Err(PeriodParseError::AmountTooLarge(_))));
    }

    #[test]
    fn test_serialization_keeps_zero_based_month() {
        let json = serde_json::to_string(&month(0, 2025)).unwrap();
        assert_eq!(json, r#"{"year":2025,"month":0}"#);
        let back: MonthRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month(0, 2025));
    }

    #[test]
    fn test_stored_month_out_of_range_is_rejected() {
        let result: Result<MonthRef, _> = serde_json::from_str(r#"{"year":2025,"month":12}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid month: 12"));

        let stored = r#"{"amount":100,"from":{"year":2025,"month":0},"to":{"year":2025,"month":40}}"#;
        assert!(serde_json::from_str::<BudgetPeriod>(stored).is_err());
    }
}
