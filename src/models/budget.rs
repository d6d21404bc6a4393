//! Budget models
//!
//! Permanent budgets hold one monthly amount per subcategory. Temporary
//! budgets hold a list of periods per subcategory. Both are stored nested by
//! category then subcategory so the JSON documents stay plain maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::{BudgetScope, SubcategoryKey};
use super::money::Money;
use super::period::BudgetPeriod;

/// Monthly amount per subcategory, applicable to every month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermanentBudgets(BTreeMap<String, BTreeMap<String, Money>>);

impl PermanentBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SubcategoryKey) -> Option<Money> {
        self.0
            .get(&key.category)
            .and_then(|subs| subs.get(&key.subcategory))
            .copied()
    }

    /// Set the amount, returning the previous one
    pub fn set(&mut self, key: &SubcategoryKey, amount: Money) -> Option<Money> {
        self.0
            .entry(key.category.clone())
            .or_default()
            .insert(key.subcategory.clone(), amount)
    }

    pub fn remove(&mut self, key: &SubcategoryKey) -> Option<Money> {
        let subs = self.0.get_mut(&key.category)?;
        let removed = subs.remove(&key.subcategory);
        if subs.is_empty() {
            self.0.remove(&key.category);
        }
        removed
    }

    pub fn remove_category(&mut self, category: &str) {
        self.0.remove(category);
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubcategoryKey, Money)> + '_ {
        self.0.iter().flat_map(|(cat, subs)| {
            subs.iter()
                .map(move |(sub, amount)| (SubcategoryKey::new(cat, sub), *amount))
        })
    }
}

/// Ordered budget periods per subcategory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryBudgets(BTreeMap<String, BTreeMap<String, Vec<BudgetPeriod>>>);

impl TemporaryBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Periods in stored order; empty when the subcategory has none
    pub fn periods(&self, key: &SubcategoryKey) -> &[BudgetPeriod] {
        self.0
            .get(&key.category)
            .and_then(|subs| subs.get(&key.subcategory))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append a period after the existing ones
    pub fn push(&mut self, key: &SubcategoryKey, period: BudgetPeriod) {
        self.0
            .entry(key.category.clone())
            .or_default()
            .entry(key.subcategory.clone())
            .or_default()
            .push(period);
    }

    /// Remove the period at `index`
    pub fn remove_period(&mut self, key: &SubcategoryKey, index: usize) -> Option<BudgetPeriod> {
        let periods = self
            .0
            .get_mut(&key.category)
            .and_then(|subs| subs.get_mut(&key.subcategory))?;
        if index >= periods.len() {
            return None;
        }
        let removed = periods.remove(index);
        if periods.is_empty() {
            self.remove(key);
        }
        Some(removed)
    }

    /// Keep only periods matching `keep`; returns the removed ones
    ///
    /// A subcategory left without periods is dropped from the map.
    pub fn retain_periods<F>(&mut self, key: &SubcategoryKey, mut keep: F) -> Vec<BudgetPeriod>
    where
        F: FnMut(&BudgetPeriod) -> bool,
    {
        let Some(periods) = self
            .0
            .get_mut(&key.category)
            .and_then(|subs| subs.get_mut(&key.subcategory))
        else {
            return Vec::new();
        };

        let (kept, removed): (Vec<_>, Vec<_>) = periods.drain(..).partition(|p| keep(p));
        *periods = kept;
        if periods.is_empty() {
            self.remove(key);
        }
        removed
    }

    /// Drop every period for a subcategory
    pub fn remove(&mut self, key: &SubcategoryKey) -> Vec<BudgetPeriod> {
        let Some(subs) = self.0.get_mut(&key.category) else {
            return Vec::new();
        };
        let removed = subs.remove(&key.subcategory).unwrap_or_default();
        if subs.is_empty() {
            self.0.remove(&key.category);
        }
        removed
    }

    pub fn remove_category(&mut self, category: &str) {
        self.0.remove(category);
    }

    /// Whether the subcategory has at least one period
    pub fn has_periods(&self, key: &SubcategoryKey) -> bool {
        !self.periods(key).is_empty()
    }

    /// Every subcategory that has periods
    pub fn keys(&self) -> Vec<SubcategoryKey> {
        self.0
            .iter()
            .flat_map(|(cat, subs)| subs.keys().map(move |sub| SubcategoryKey::new(cat, sub)))
            .collect()
    }

    pub fn period_count(&self) -> usize {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

/// Budget-versus-actual for one subcategory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub key: SubcategoryKey,
    pub scope: BudgetScope,
    pub budgeted: Money,
    pub spent: Money,
    /// Budgeted minus spent; negative means overspent
    pub difference: Money,
}

impl BudgetLine {
    pub fn new(key: SubcategoryKey, scope: BudgetScope, budgeted: Money, spent: Money) -> Self {
        Self {
            key,
            scope,
            budgeted,
            spent,
            difference: budgeted - spent,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.difference.is_negative()
    }

    /// Lines with neither budget nor spending carry no information
    pub fn is_meaningful(&self) -> bool {
        !(self.budgeted.is_zero() && self.spent.is_zero())
    }
}

impl fmt::Display for BudgetLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: budgeted {}, spent {}, difference {}",
            self.key, self.budgeted, self.spent, self.difference
        )
    }
}

/// A category with its subcategory lines and totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    pub category: String,
    pub scope: BudgetScope,
    pub lines: Vec<BudgetLine>,
    pub budgeted: Money,
    pub spent: Money,
    pub difference: Money,
}

impl CategoryRollup {
    pub fn new(category: impl Into<String>, scope: BudgetScope) -> Self {
        Self {
            category: category.into(),
            scope,
            lines: Vec::new(),
            budgeted: Money::zero(),
            spent: Money::zero(),
            difference: Money::zero(),
        }
    }

    /// Add a subcategory line to the totals
    pub fn add_line(&mut self, line: BudgetLine) {
        self.budgeted += line.budgeted;
        self.spent += line.spent;
        self.difference += line.difference;
        self.lines.push(line);
    }

    pub fn has_overspent(&self) -> bool {
        self.lines.iter().any(BudgetLine::is_overspent)
    }
}
