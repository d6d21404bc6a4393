//! Category service
//!
//! Editing the permanent and temporary category trees and the budgets
//! attached to them. Removing a subcategory removes its budget entries in
//! the same scope.

use serde_json::json;

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{
    category::validate_label, BudgetPeriod, BudgetScope, CategoryTree, Money,
    SubcategoryKey,
};
use crate::storage::{DocumentRepository, Storage};
use crate::sync::Collection;

use super::period::find_overlap;

/// Service for category and budget management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn tree_repo(&self, scope: BudgetScope) -> &DocumentRepository<CategoryTree> {
        match scope {
            BudgetScope::Permanent => &self.storage.categories,
            BudgetScope::Temporary => &self.storage.temp_categories,
        }
    }

    /// The collections a change in `scope` touches: tree, then budgets
    fn collections(scope: BudgetScope) -> [Collection; 2] {
        match scope {
            BudgetScope::Permanent => [Collection::Categories, Collection::Budgets],
            BudgetScope::Temporary => [Collection::TempCategories, Collection::TempBudgets],
        }
    }

    /// A copy of the tree for `scope`
    pub fn tree(&self, scope: BudgetScope) -> HearthResult<CategoryTree> {
        self.tree_repo(scope).get()
    }

    // === Tree Operations ===

    /// Add an empty category
    pub fn add_category(&self, scope: BudgetScope, name: &str) -> HearthResult<()> {
        validate_label("Category", name).map_err(HearthError::Validation)?;
        let name = name.trim();

        if !self.tree_repo(scope).update(|tree| tree.add_category(name))? {
            return Err(HearthError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        self.storage.commit(&Self::collections(scope)[..1])?;

        self.storage
            .log_create(EntityType::Category, name, &json!({ "name": name, "scope": scope }));
        Ok(())
    }

    /// Add a subcategory, creating its category when needed
    pub fn add_subcategory(&self, scope: BudgetScope, key: &SubcategoryKey) -> HearthResult<()> {
        validate_label("Category", &key.category).map_err(HearthError::Validation)?;
        validate_label("Subcategory", &key.subcategory).map_err(HearthError::Validation)?;
        let key = SubcategoryKey::new(key.category.trim(), key.subcategory.trim());

        if !self.tree_repo(scope).update(|tree| tree.add_subcategory(&key))? {
            return Err(HearthError::Duplicate {
                entity_type: "Subcategory",
                identifier: key.to_string(),
            });
        }
        self.storage.commit(&Self::collections(scope)[..1])?;

        self.storage
            .log_create(EntityType::Subcategory, key.to_string(), &json!({ "key": key, "scope": scope }));
        Ok(())
    }

    /// Remove a subcategory and its budget entries; the category stays
    pub fn remove_subcategory(&self, scope: BudgetScope, key: &SubcategoryKey) -> HearthResult<()> {
        if !self.tree_repo(scope).update(|tree| tree.remove_subcategory(key))? {
            return Err(HearthError::subcategory_not_found(key.to_string()));
        }
        match scope {
            BudgetScope::Permanent => {
                self.storage.budgets.update(|b| b.remove(key))?;
            }
            BudgetScope::Temporary => {
                self.storage.temp_budgets.update(|b| b.remove(key))?;
            }
        }
        self.storage.commit(&Self::collections(scope))?;

        self.storage
            .log_delete(EntityType::Subcategory, key.to_string(), &json!({ "key": key, "scope": scope }));
        Ok(())
    }

    /// Remove a category with every subcategory and budget under it
    pub fn remove_category(&self, scope: BudgetScope, name: &str) -> HearthResult<Vec<String>> {
        let name = name.trim();
        let removed = self
            .tree_repo(scope)
            .update(|tree| tree.remove_category(name))?
            .ok_or_else(|| HearthError::category_not_found(name))?;

        match scope {
            BudgetScope::Permanent => self.storage.budgets.update(|b| b.remove_category(name))?,
            BudgetScope::Temporary => self.storage.temp_budgets.update(|b| b.remove_category(name))?,
        }
        self.storage.commit(&Self::collections(scope))?;

        let removed: Vec<String> = removed.into_iter().collect();
        self.storage.log_delete(
            EntityType::Category,
            name,
            &json!({ "name": name, "scope": scope, "subcategories": removed }),
        );
        Ok(removed)
    }

    // === Permanent Budgets ===

    /// Set the monthly amount of a permanent subcategory
    pub fn set_budget(&self, key: &SubcategoryKey, amount: Money) -> HearthResult<Option<Money>> {
        if amount.is_negative() {
            return Err(HearthError::Validation(format!(
                "Budget amount cannot be negative: {}",
                amount
            )));
        }
        if !amount.is_within_limit() {
            return Err(HearthError::Validation(format!("Budget amount is too large: {}", amount)));
        }
        if !self.storage.categories.get()?.contains(key) {
            return Err(HearthError::subcategory_not_found(key.to_string()));
        }

        let previous = self.storage.budgets.update(|b| b.set(key, amount))?;
        self.storage.commit(&[Collection::Budgets])?;

        let after = json!({ "key": key, "amount": amount });
        match previous {
            Some(old) => self.storage.log_update(
                EntityType::PermanentBudget,
                key.to_string(),
                &json!({ "key": key, "amount": old }),
                &after,
            ),
            None => self
                .storage
                .log_create(EntityType::PermanentBudget, key.to_string(), &after),
        }
        Ok(previous)
    }

    /// Remove the monthly amount of a permanent subcategory
    pub fn clear_budget(&self, key: &SubcategoryKey) -> HearthResult<Money> {
        let removed = self
            .storage
            .budgets
            .update(|b| b.remove(key))?
            .ok_or_else(|| HearthError::NotFound {
                entity_type: "Budget",
                identifier: key.to_string(),
            })?;
        self.storage.commit(&[Collection::Budgets])?;

        self.storage.log_delete(
            EntityType::PermanentBudget,
            key.to_string(),
            &json!({ "key": key, "amount": removed }),
        );
        Ok(removed)
    }

    // === Temporary Periods ===

    /// Stored periods of a temporary subcategory
    pub fn periods(&self, key: &SubcategoryKey) -> HearthResult<Vec<BudgetPeriod>> {
        Ok(self.storage.temp_budgets.get()?.periods(key).to_vec())
    }

    /// Append a period to a temporary subcategory
    ///
    /// Rejects reversed ranges, negative amounts and any overlap with a
    /// period already stored for the same subcategory.
    pub fn add_period(&self, key: &SubcategoryKey, period: BudgetPeriod) -> HearthResult<()> {
        period
            .validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;
        if !self.storage.temp_categories.get()?.contains(key) {
            return Err(HearthError::subcategory_not_found(key.to_string()));
        }

        let existing = self.periods(key)?;
        if let Some(index) = find_overlap(&existing, &period) {
            return Err(HearthError::Validation(format!(
                "Period {}..{} overlaps existing period #{} ({}..{}) of {}",
                period.from, period.to, index, existing[index].from, existing[index].to, key
            )));
        }

        self.storage.temp_budgets.update(|b| b.push(key, period))?;
        self.storage.commit(&[Collection::TempBudgets])?;

        self.storage.log_create(
            EntityType::TemporaryPeriod,
            format!("{}#{}", key, existing.len()),
            &period,
        );
        Ok(())
    }

    /// Remove the period at `index` (as listed by [`periods`](Self::periods))
    pub fn remove_period(&self, key: &SubcategoryKey, index: usize) -> HearthResult<BudgetPeriod> {
        let removed = self
            .storage
            .temp_budgets
            .update(|b| b.remove_period(key, index))?
            .ok_or_else(|| HearthError::NotFound {
                entity_type: "Budget period",
                identifier: format!("{}#{}", key, index),
            })?;
        self.storage.commit(&[Collection::TempBudgets])?;

        self.storage.log_delete(
            EntityType::TemporaryPeriod,
            format!("{}#{}", key, index),
            &removed,
        );
        Ok(removed)
    }
}
