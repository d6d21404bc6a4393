//! The latest snapshot of every collection, as seen by one consumer

use std::collections::HashSet;
use std::sync::Arc;

use super::{Collection, Snapshot};
use crate::models::{CategoryTree, PermanentBudgets, Record, TemporaryBudgets, Transaction};

/// Latest received version of each collection
///
/// Snapshots may arrive in any order. Until a collection arrives it reads
/// as empty, so computations over a partially loaded state stay valid.
#[derive(Debug, Clone, Default)]
pub struct LiveState {
    transactions: Arc<Vec<Transaction>>,
    categories: Arc<CategoryTree>,
    temp_categories: Arc<CategoryTree>,
    budgets: Arc<PermanentBudgets>,
    temp_budgets: Arc<TemporaryBudgets>,
    records: Arc<Vec<Record>>,
    loaded: HashSet<Collection>,
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one collection with a newer snapshot (last write wins)
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.loaded.insert(snapshot.collection());
        match snapshot {
            Snapshot::Transactions(v) => self.transactions = v,
            Snapshot::Categories(v) => self.categories = v,
            Snapshot::TempCategories(v) => self.temp_categories = v,
            Snapshot::Budgets(v) => self.budgets = v,
            Snapshot::TempBudgets(v) => self.temp_budgets = v,
            Snapshot::Records(v) => self.records = v,
        }
    }

    /// Builder form of [`apply`](Self::apply)
    pub fn with(mut self, snapshot: Snapshot) -> Self {
        self.apply(snapshot);
        self
    }

    pub fn is_loaded(&self, collection: Collection) -> bool {
        self.loaded.contains(&collection)
    }

    /// Whether every collection has arrived at least once
    pub fn is_complete(&self) -> bool {
        Collection::ALL.iter().all(|c| self.loaded.contains(c))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    pub fn temp_categories(&self) -> &CategoryTree {
        &self.temp_categories
    }

    pub fn budgets(&self) -> &PermanentBudgets {
        &self.budgets
    }

    pub fn temp_budgets(&self) -> &TemporaryBudgets {
        &self.temp_budgets
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}
