//! Transaction model
//!
//! Income and expense records. Expenses carry the category and subcategory
//! they are charged to; income does not. The stored `timestamp` is always the
//! epoch milliseconds of `date` at local midnight and is what range queries
//! compare against.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::SubcategoryKey;
use super::ids::TransactionId;
use super::money::Money;
use super::period::local_midnight_millis;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" | "in" => Ok(Self::Income),
            "expense" | "gasto" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// An income or expense transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Non-negative whole currency units
    pub amount: Money,

    pub date: NaiveDate,

    /// Epoch milliseconds of `date` at local midnight
    pub timestamp: i64,

    #[serde(default)]
    pub description: String,

    /// Expenses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Expenses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create an income transaction
    pub fn income(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self::build(TransactionKind::Income, date, amount, description.into(), None)
    }

    /// Create an expense charged to `key`
    pub fn expense(
        date: NaiveDate,
        amount: Money,
        key: SubcategoryKey,
        description: impl Into<String>,
    ) -> Self {
        Self::build(
            TransactionKind::Expense,
            date,
            amount,
            description.into(),
            Some(key),
        )
    }

    fn build(
        kind: TransactionKind,
        date: NaiveDate,
        amount: Money,
        description: String,
        key: Option<SubcategoryKey>,
    ) -> Self {
        let now = Utc::now();
        let (category, subcategory) = match key {
            Some(key) => (Some(key.category), Some(key.subcategory)),
            None => (None, None),
        };
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            date,
            timestamp: local_midnight_millis(date),
            description,
            category,
            subcategory,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// The subcategory this expense is charged to, if it names one
    pub fn key(&self) -> Option<SubcategoryKey> {
        match (&self.category, &self.subcategory) {
            (Some(cat), Some(sub)) if !sub.trim().is_empty() => {
                Some(SubcategoryKey::new(cat.clone(), sub.clone()))
            }
            _ => None,
        }
    }

    /// Change the date and re-derive the timestamp
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.timestamp = local_midnight_millis(date);
        self.updated_at = Utc::now();
    }

    /// Change the kind; income drops its category labels
    pub fn set_kind(&mut self, kind: TransactionKind, key: Option<SubcategoryKey>) {
        self.kind = kind;
        match (kind, key) {
            (TransactionKind::Expense, Some(key)) => {
                self.category = Some(key.category);
                self.subcategory = Some(key.subcategory);
            }
            (TransactionKind::Income, _) => {
                self.category = None;
                self.subcategory = None;
            }
            (TransactionKind::Expense, None) => {}
        }
        self.updated_at = Utc::now();
    }

    /// Whether the stored timestamp still matches the date
    pub fn timestamp_consistent(&self) -> bool {
        self.timestamp == local_midnight_millis(self.date)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount.units()));
        }
        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount.units()));
        }

        if !self.timestamp_consistent() {
            return Err(TransactionValidationError::TimestampMismatch);
        }

        match self.kind {
            TransactionKind::Expense => {
                let has_category = self
                    .category
                    .as_deref()
                    .map(|c| !c.trim().is_empty())
                    .unwrap_or(false);
                if !has_category {
                    return Err(TransactionValidationError::MissingCategory);
                }
                let has_subcategory = self
                    .subcategory
                    .as_deref()
                    .map(|s| !s.trim().is_empty())
                    .unwrap_or(false);
                if !has_subcategory {
                    return Err(TransactionValidationError::MissingSubcategory);
                }
            }
            TransactionKind::Income => {
                if self.category.is_some() || self.subcategory.is_some() {
                    return Err(TransactionValidationError::IncomeWithCategory);
                }
            }
        }

        if self.description.len() > 500 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date.format("%Y-%m-%d"), self.kind, self.amount)?;
        if let Some(key) = self.key() {
            write!(f, " [{}]", key)?;
        }
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(i64),
    #[error("Amount is too large: {0}")]
    AmountTooLarge(i64),
    #[error("Expenses need a category")]
    MissingCategory,
    #[error("Expenses need a subcategory")]
    MissingSubcategory,
    #[error("Income cannot be assigned to a category")]
    IncomeWithCategory,
    #[error("Timestamp does not match the transaction date")]
    TimestampMismatch,
    #[error("Description too long ({0} bytes, max 500)")]
    DescriptionTooLong(usize),
    #[error("Unknown transaction type: {0}")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expense_carries_key_and_timestamp() {
        let txn = Transaction::expense(
            date(2025, 3, 5),
            Money::from_units(10000),
            SubcategoryKey::new("Hogar", "Supermercado"),
            "Compra semanal",
        );
        assert!(txn.is_expense());
        assert_eq!(txn.key(), Some(SubcategoryKey::new("Hogar", "Supermercado")));
        assert_eq!(txn.timestamp, local_midnight_millis(date(2025, 3, 5)));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_set_date_rederives_timestamp() {
        let mut txn = Transaction::income(date(2025, 1, 1), Money::from_units(5), "");
        txn.set_date(date(2025, 2, 1));
        assert!(txn.timestamp_consistent());
        assert_eq!(txn.timestamp, local_midnight_millis(date(2025, 2, 1)));
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::income(date(2025, 1, 1), Money::from_units(-5), "");
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(-5))
        );

        txn.amount = Money::from_units(i64::MAX);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(i64::MAX))
        );

        txn.amount = Money::from_units(5);
        txn.category = Some("Hogar".into());
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::IncomeWithCategory)
        );

        let mut expense = Transaction::expense(
            date(2025, 1, 1),
            Money::from_units(1),
            SubcategoryKey::new("Hogar", "Luz"),
            "",
        );
        expense.subcategory = Some(" ".into());
        assert_eq!(
            expense.validate(),
            Err(TransactionValidationError::MissingSubcategory)
        );
        assert_eq!(expense.key(), None);

        expense.subcategory = Some("Luz".into());
        expense.timestamp += 1;
        assert_eq!(
            expense.validate(),
            Err(TransactionValidationError::TimestampMismatch)
        );
    }

    #[test]
    fn test_set_kind_to_income_clears_labels() {
        let mut txn = Transaction::expense(
            date(2025, 1, 1),
            Money::from_units(1),
            SubcategoryKey::new("Hogar", "Luz"),
            "",
        );
        txn.set_kind(TransactionKind::Income, None);
        assert!(txn.category.is_none());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Gasto".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serialized_type_field() {
        let txn = Transaction::income(date(2025, 1, 1), Money::from_units(5), "Sueldo");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json.get("category").is_none());
    }
}
