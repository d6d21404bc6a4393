//! Core data models for Hearth
//!
//! This module contains the data structures of the household budget:
//! transactions, category trees, permanent and temporary budgets, month
//! arithmetic, records and money.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod record;
pub mod transaction;

pub use budget::{BudgetLine, CategoryRollup, PermanentBudgets, TemporaryBudgets};
pub use category::{locale_cmp, BudgetScope, CategoryTree, SubcategoryKey};
pub use ids::{RecordId, TransactionId};
pub use money::{Money, MoneyParseError, NumberLocale};
pub use period::{local_midnight_millis, BudgetPeriod, DateWindow, MonthRef, PeriodParseError};
pub use record::{Record, RecordEntry};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
