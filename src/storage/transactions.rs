//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{HearthError, HearthResult};
use crate::models::{DateWindow, Transaction, TransactionId};

use super::file_io::{read_json, stage_json, StagedWrite};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> HearthResult<RwLockReadGuard<'_, HashMap<TransactionId, Transaction>>> {
        self.data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> HearthResult<RwLockWriteGuard<'_, HashMap<TransactionId, Transaction>>> {
        self.data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk, replacing what is in memory
    pub fn load(&self) -> HearthResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for txn in file_data.transactions {
            if !txn.timestamp_consistent() {
                tracing::warn!(id = %txn.id, date = %txn.date, "stored timestamp does not match date");
            }
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> HearthResult<()> {
        self.stage()?.publish()
    }

    /// Serialize the current contents to a temp file without replacing the document
    pub fn stage(&self) -> HearthResult<StagedWrite> {
        let transactions = self.get_all()?;
        stage_json(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> HearthResult<Option<Transaction>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Find a transaction by full UUID or short display prefix
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Transaction>> {
        let data = self.read()?;
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return Ok(data.get(&id).cloned());
        }
        let mut matches = data.values().filter(|t| t.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(HearthError::Validation(format!(
                "Ambiguous transaction id '{}'",
                identifier
            ))),
        }
    }

    /// All transactions, oldest first
    pub fn get_all(&self) -> HearthResult<Vec<Transaction>> {
        let data = self.read()?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(transactions)
    }

    /// Transactions whose timestamp falls inside `window`, oldest first
    pub fn get_by_window(&self, window: &DateWindow) -> HearthResult<Vec<Transaction>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| window.contains_millis(t.timestamp))
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> HearthResult<()> {
        self.write()?.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> HearthResult<Option<Transaction>> {
        Ok(self.write()?.remove(&id))
    }

    /// Delete a batch of transactions under one write lock
    ///
    /// Ids that are already gone are skipped; returns how many were removed.
    pub fn delete_batch(&self, ids: &[TransactionId]) -> HearthResult<usize> {
        let mut data = self.write()?;
        Ok(ids.iter().filter(|id| data.remove(id).is_some()).count())
    }

    /// Count transactions
    pub fn count(&self) -> HearthResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthRef, SubcategoryKey};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(y: i32, m: u32, d: u32, amount: i64) -> Transaction {
        Transaction::expense(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_units(amount),
            SubcategoryKey::new("Hogar", "Supermercado"),
            "",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_load() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(2025, 3, 4, 10000);
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.amount.units(), 10000);
    }

    #[test]
    fn test_get_by_window_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(expense(2025, 3, 1, 1)).unwrap();
        repo.upsert(expense(2025, 3, 31, 2)).unwrap();
        repo.upsert(expense(2025, 4, 1, 4)).unwrap();

        let march = DateWindow::month(MonthRef::new(2, 2025).unwrap());
        let found = repo.get_by_window(&march).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].amount.units(), 1);
        assert_eq!(found[1].amount.units(), 2);
    }

    #[test]
    fn test_delete_batch_skips_missing() {
        let (_temp_dir, repo) = create_test_repo();
        let a = expense(2025, 1, 1, 1);
        let b = expense(2025, 1, 2, 1);
        let ids = vec![a.id, b.id, TransactionId::new()];
        repo.upsert(a).unwrap();
        repo.upsert(b).unwrap();

        assert_eq!(repo.delete_batch(&ids).unwrap(), 2);
        assert_eq!(repo.delete_batch(&ids).unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(2025, 1, 1, 1);
        let short = txn.id.to_string();
        repo.upsert(txn.clone()).unwrap();

        assert_eq!(repo.find(&short).unwrap().unwrap().id, txn.id);
        assert_eq!(
            repo.find(&txn.id.as_uuid().to_string()).unwrap().unwrap().id,
            txn.id
        );
        assert!(repo.find("txn-zzzzzzzz").unwrap().is_none());
    }
}
