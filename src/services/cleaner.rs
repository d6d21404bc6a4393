//! Smart data cleaner
//!
//! Deletes every transaction inside a date range and every temporary
//! budget period lying entirely inside it. Periods that only partly overlap
//! the range are kept as they are. A temporary subcategory that loses its
//! last period leaves the temporary tree, and so does a category that loses
//! its last subcategory.
//!
//! Cleaning is planned against a snapshot first, then applied in bounded
//! transaction batches to memory and persisted once. A failure reloads the
//! store from disk, so the run counts as not applied and can be retried;
//! running it again over a cleaned range finds nothing to do.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::audit::{AuditEntry, EntityType};
use crate::config::settings::MAX_DELETE_BATCH;
use crate::error::{HearthError, HearthResult};
use crate::models::{BudgetPeriod, CategoryTree, DateWindow, SubcategoryKey, Transaction, TransactionId};
use crate::storage::Storage;
use crate::sync::{Collection, LiveState};

/// What a clean over a range would delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPlan {
    pub window: DateWindow,
    pub transactions: Vec<Transaction>,
    pub periods: Vec<(SubcategoryKey, BudgetPeriod)>,
    /// Temporary subcategories left without periods
    pub emptied_subcategories: Vec<SubcategoryKey>,
    /// Temporary categories left without subcategories
    pub emptied_categories: Vec<String>,
}

impl CleanPlan {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.periods.is_empty()
    }

    pub fn transaction_ids(&self) -> Vec<TransactionId> {
        self.transactions.iter().map(|t| t.id).collect()
    }
}

/// Counts of what a clean actually removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub transactions_deleted: usize,
    pub periods_deleted: usize,
    pub subcategories_removed: usize,
    pub categories_removed: usize,
    pub batches: usize,
}

/// Work out what cleaning `window` would delete
pub fn plan_clean(state: &LiveState, window: DateWindow) -> CleanPlan {
    let transactions: Vec<Transaction> = state
        .transactions()
        .iter()
        .filter(|t| window.contains_millis(t.timestamp))
        .cloned()
        .collect();

    let temp_budgets = state.temp_budgets();
    let mut periods = Vec::new();
    let mut emptied_subcategories = Vec::new();
    for key in temp_budgets.keys() {
        let stored = temp_budgets.periods(&key);
        let doomed: Vec<BudgetPeriod> = stored
            .iter()
            .filter(|p| window.covers(&p.window()))
            .copied()
            .collect();
        if doomed.is_empty() {
            continue;
        }
        if doomed.len() == stored.len() {
            emptied_subcategories.push(key.clone());
        }
        periods.extend(doomed.into_iter().map(|p| (key.clone(), p)));
    }

    let emptied_categories = emptied_categories(state.temp_categories(), &emptied_subcategories);

    CleanPlan {
        window,
        transactions,
        periods,
        emptied_subcategories,
        emptied_categories,
    }
}

fn emptied_categories(tree: &CategoryTree, removed: &[SubcategoryKey]) -> Vec<String> {
    let mut removed_per_category: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for key in removed.iter().filter(|k| tree.contains(k)) {
        removed_per_category
            .entry(key.category.as_str())
            .or_default()
            .insert(key.subcategory.as_str());
    }
    removed_per_category
        .into_iter()
        .filter(|(category, subs)| tree.subcategories(category).len() == subs.len())
        .map(|(category, _)| category.to_string())
        .collect()
}

/// Service applying clean plans to the store
pub struct CleanerService<'a> {
    storage: &'a Storage,
    batch_size: usize,
}

impl<'a> CleanerService<'a> {
    /// `batch_size` is clamped to what the store accepts per write batch
    pub fn new(storage: &'a Storage, batch_size: usize) -> Self {
        Self {
            storage,
            batch_size: batch_size.clamp(1, MAX_DELETE_BATCH),
        }
    }

    /// Plan a clean over the inclusive days `[first_day, last_day]`
    pub fn plan(&self, first_day: NaiveDate, last_day: NaiveDate) -> HearthResult<CleanPlan> {
        let window = DateWindow::from_dates(first_day, last_day)
            .map_err(|e| HearthError::Validation(e.to_string()))?;
        Ok(plan_clean(&self.storage.snapshot()?, window))
    }

    /// Apply `plan`; nothing happens without `confirmed`
    pub fn execute(&self, plan: &CleanPlan, confirmed: bool) -> HearthResult<CleanReport> {
        if !confirmed {
            return Err(HearthError::Validation(
                "Cleaning deletes data permanently and must be confirmed".into(),
            ));
        }
        if plan.is_empty() {
            tracing::info!(window = %plan.window, "nothing to clean");
            return Ok(CleanReport::default());
        }

        match self.apply(plan) {
            Ok(report) => {
                self.storage.commit(&[
                    Collection::Transactions,
                    Collection::TempBudgets,
                    Collection::TempCategories,
                ])?;
                self.audit(plan);
                tracing::info!(
                    window = %plan.window,
                    transactions = report.transactions_deleted,
                    periods = report.periods_deleted,
                    batches = report.batches,
                    "clean applied"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(window = %plan.window, error = %e, "clean failed, reloading store");
                self.storage.reload()?;
                Err(e)
            }
        }
    }

    fn apply(&self, plan: &CleanPlan) -> HearthResult<CleanReport> {
        let mut report = CleanReport::default();

        let ids = plan.transaction_ids();
        for (index, batch) in ids.chunks(self.batch_size).enumerate() {
            let deleted = self.storage.transactions.delete_batch(batch)?;
            tracing::debug!(batch = index + 1, size = batch.len(), deleted, "transaction batch applied");
            report.transactions_deleted += deleted;
            report.batches += 1;
        }

        let touched: BTreeSet<&SubcategoryKey> = plan.periods.iter().map(|(k, _)| k).collect();
        let emptied: Vec<SubcategoryKey> = self.storage.temp_budgets.update(|budgets| {
            for (key, period) in &plan.periods {
                report.periods_deleted += budgets.retain_periods(key, |p| p != period).len();
            }
            touched
                .iter()
                .filter(|key| !budgets.has_periods(key))
                .map(|key| (*key).clone())
                .collect()
        })?;

        self.storage.temp_categories.update(|tree| {
            for key in &emptied {
                if tree.contains(key) {
                    report.subcategories_removed += 1;
                    if tree.remove_subcategory_pruning(key) {
                        report.categories_removed += 1;
                    }
                }
            }
        })?;

        Ok(report)
    }

    fn audit(&self, plan: &CleanPlan) {
        let mut entries: Vec<AuditEntry> = plan
            .transactions
            .iter()
            .map(|t| AuditEntry::delete(EntityType::Transaction, t.id.to_string(), t))
            .collect();
        entries.extend(
            plan.periods
                .iter()
                .map(|(key, period)| AuditEntry::delete(EntityType::TemporaryPeriod, key.to_string(), period)),
        );
        if let Err(e) = self.storage.audit().log_batch(&entries) {
            tracing::warn!(error = %e, "failed to write audit entries for clean");
        }
    }
}
