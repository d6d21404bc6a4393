//! Transaction service
//!
//! Creating, editing and deleting income and expense transactions. All
//! input is validated before anything is written.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{DateWindow, Money, SubcategoryKey, Transaction, TransactionKind};
use crate::storage::Storage;
use crate::sync::Collection;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: Money,
    pub description: Option<String>,
    /// Required for expenses, rejected for income
    pub key: Option<SubcategoryKey>,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub key: Option<SubcategoryKey>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.key.is_none()
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Expenses must be charged to a subcategory that exists in either tree
    fn check_key(&self, key: &SubcategoryKey) -> HearthResult<()> {
        let known = self.storage.categories.get()?.contains(key)
            || self.storage.temp_categories.get()?.contains(key);
        if known {
            Ok(())
        } else {
            Err(HearthError::subcategory_not_found(key.to_string()))
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> HearthResult<Transaction> {
        let description = input.description.unwrap_or_default().trim().to_string();

        let txn = match (input.kind, input.key) {
            (TransactionKind::Expense, Some(key)) => {
                self.check_key(&key)?;
                Transaction::expense(input.date, input.amount, key, description)
            }
            (TransactionKind::Expense, None) => {
                return Err(HearthError::Validation(
                    "Expenses need a category and subcategory".into(),
                ))
            }
            (TransactionKind::Income, Some(_)) => {
                return Err(HearthError::Validation(
                    "Income transactions do not take a category".into(),
                ))
            }
            (TransactionKind::Income, None) => Transaction::income(input.date, input.amount, description),
        };

        txn.validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.commit(&[Collection::Transactions])?;

        self.storage
            .log_create(EntityType::Transaction, txn.id.to_string(), &txn);
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction created");

        Ok(txn)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    fn require(&self, identifier: &str) -> HearthResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| HearthError::transaction_not_found(identifier))
    }

    /// Transactions in the window, or all of them, oldest first
    pub fn list(&self, window: Option<&DateWindow>) -> HearthResult<Vec<Transaction>> {
        match window {
            Some(window) => self.storage.transactions.get_by_window(window),
            None => self.storage.transactions.get_all(),
        }
    }

    /// Apply `update` to the transaction identified by `identifier`
    ///
    /// Changing the date re-derives the timestamp. Switching to income
    /// drops the category labels; switching to expense needs a key unless
    /// the transaction already carries one.
    pub fn update(&self, identifier: &str, update: TransactionUpdate) -> HearthResult<Transaction> {
        if update.is_empty() {
            return Err(HearthError::Validation("Nothing to update".into()));
        }

        let mut txn = self.require(identifier)?;
        let before = txn.clone();

        if let Some(date) = update.date {
            txn.set_date(date);
        }
        if let Some(amount) = update.amount {
            txn.amount = amount;
        }
        if let Some(description) = update.description {
            txn.description = description.trim().to_string();
        }

        let kind = update.kind.unwrap_or(txn.kind);
        match (kind, update.key) {
            (TransactionKind::Income, Some(_)) => {
                return Err(HearthError::Validation(
                    "Income transactions do not take a category".into(),
                ))
            }
            (TransactionKind::Expense, Some(key)) => {
                self.check_key(&key)?;
                txn.set_kind(kind, Some(key));
            }
            (_, None) => txn.set_kind(kind, None),
        }
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.commit(&[Collection::Transactions])?;

        self.storage
            .log_update(EntityType::Transaction, txn.id.to_string(), &before, &txn);

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, identifier: &str) -> HearthResult<Transaction> {
        let txn = self.require(identifier)?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.commit(&[Collection::Transactions])?;

        self.storage
            .log_delete(EntityType::Transaction, txn.id.to_string(), &txn);
        tracing::info!(id = %txn.id, "transaction deleted");

        Ok(txn)
    }

    pub fn count(&self) -> HearthResult<usize> {
        self.storage.transactions.count()
    }
}
