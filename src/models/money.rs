//! Money type for representing currency amounts
//!
//! Amounts are whole currency units stored as `i64`: the household ledger
//! never records fractions, so there is no rounding anywhere in the engine.
//! Formatting and parsing are locale-aware only in the thousands separator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number formatting conventions for amounts entered and shown as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// `17.000`
    #[default]
    Es,
    /// `17,000`
    En,
}

impl NumberLocale {
    /// Thousands separator for this locale
    pub const fn group_separator(self) -> char {
        match self {
            Self::Es => '.',
            Self::En => ',',
        }
    }

    /// Decimal separator for this locale (only used to reject fractional input)
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::Es => ',',
            Self::En => '.',
        }
    }
}

/// A monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted on a transaction, budget or record entry.
    /// Arithmetic on `Money` saturates at the `i64` bounds.
    pub const MAX: Money = Money(999_999_999_999);

    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use hearth::models::Money;
    /// let amount = Money::from_units(17000);
    /// assert_eq!(amount.units(), 17000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude is at most [`Money::MAX`]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    /// Format with locale thousands separators, e.g. `-17.000`
    pub fn format(&self, locale: NumberLocale) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let separator = locale.group_separator();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }

        if self.is_negative() {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format with a currency symbol, e.g. `-$17.000`
    pub fn format_with_symbol(&self, symbol: &str, locale: NumberLocale) -> String {
        let plain = self.abs().format(locale);
        if self.is_negative() {
            format!("-{}{}", symbol, plain)
        } else {
            format!("{}{}", symbol, plain)
        }
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts `17000`, `17.000` (es), `17,000` (en), `$17.000` and a leading
    /// minus sign. Fractional amounts are rejected.
    pub fn parse(s: &str, locale: NumberLocale) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };
        let s = s.strip_prefix('$').unwrap_or(s).trim();

        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        if s.contains(locale.decimal_separator()) {
            return Err(MoneyParseError::Fractional(original.trim().to_string()));
        }

        let separator = locale.group_separator();
        let mut value: i64 = 0;
        let mut digits = 0;
        for ch in s.chars() {
            if ch == separator || ch == ' ' {
                continue;
            }
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| MoneyParseError::InvalidFormat(original.trim().to_string()))?;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or_else(|| MoneyParseError::Overflow(original.trim().to_string()))?;
            digits += 1;
        }

        if digits == 0 {
            return Err(MoneyParseError::InvalidFormat(original.trim().to_string()));
        }
        if value > Self::MAX.0 {
            return Err(MoneyParseError::Overflow(original.trim().to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Parse an amount that must not be negative
    pub fn parse_non_negative(s: &str, locale: NumberLocale) -> Result<Self, MoneyParseError> {
        let amount = Self::parse(s, locale)?;
        if amount.is_negative() {
            return Err(MoneyParseError::Negative(s.trim().to_string()));
        }
        Ok(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Amount is required")]
    Empty,
    #[error("Invalid amount: {0}")]
    InvalidFormat(String),
    #[error("Amounts must be whole numbers: {0}")]
    Fractional(String),
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
    #[error("Amount is too large: {0}")]
    Overflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(Money::from_units(0).format(NumberLocale::Es), "0");
        assert_eq!(Money::from_units(999).format(NumberLocale::Es), "999");
        assert_eq!(Money::from_units(17000).format(NumberLocale::Es), "17.000");
        assert_eq!(Money::from_units(1234567).format(NumberLocale::En), "1,234,567");
        assert_eq!(Money::from_units(-50000).format(NumberLocale::Es), "-50.000");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(
            Money::from_units(-2500).format_with_symbol("$", NumberLocale::Es),
            "-$2.500"
        );
        assert_eq!(
            Money::from_units(2500).format_with_symbol("$", NumberLocale::En),
            "$2,500"
        );
    }

    #[test]
    fn test_parse_locale_input() {
        assert_eq!(Money::parse("17.000", NumberLocale::Es).unwrap().units(), 17000);
        assert_eq!(Money::parse("$ 17.000", NumberLocale::Es).unwrap().units(), 17000);
        assert_eq!(Money::parse("17,000", NumberLocale::En).unwrap().units(), 17000);
        assert_eq!(Money::parse(" 42 ", NumberLocale::En).unwrap().units(), 42);
        assert_eq!(Money::parse("-1.500", NumberLocale::Es).unwrap().units(), -1500);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Money::parse("", NumberLocale::Es), Err(MoneyParseError::Empty));
        assert!(matches!(
            Money::parse("12a", NumberLocale::Es),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("10,50", NumberLocale::Es),
            Err(MoneyParseError::Fractional(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999", NumberLocale::En),
            Err(MoneyParseError::Overflow(_))
        ));
        assert!(matches!(
            Money::parse_non_negative("-5", NumberLocale::En),
            Err(MoneyParseError::Negative(_))
        ));
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_units(10000);
        let b = Money::from_units(5000);
        assert_eq!((a - b).units(), 5000);
        assert_eq!((b - a).units(), -5000);
        let total: Money = [a, b, Money::from_units(2000)].iter().sum();
        assert_eq!(total.units(), 17000);
    }

    #[test]
    fn test_amount_limit() {
        assert_eq!(
            Money::parse("999.999.999.999", NumberLocale::Es),
            Ok(Money::MAX)
        );
        assert!(matches!(
            Money::parse("1.000.000.000.000", NumberLocale::Es),
            Err(MoneyParseError::Overflow(_))
        ));
        assert!(Money::MAX.is_within_limit());
        assert!((-Money::MAX).is_within_limit());
        assert!(!(Money::MAX + Money::from_units(1)).is_within_limit());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_units(i64::MAX);
        assert_eq!((huge + Money::from_units(1)).units(), i64::MAX);

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc.units(), i64::MAX);

        let low = Money::from_units(i64::MIN);
        assert_eq!((low - Money::from_units(1)).units(), i64::MIN);
        assert_eq!((-low).units(), i64::MAX);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_units(17000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "17000");
    }
}
