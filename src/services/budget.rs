//! Budget differentials
//!
//! Combines the budget that applies to a subcategory in a month with what
//! was spent there. The permanent and temporary trees are rolled up
//! independently; a collection that has not loaded counts as empty.

use std::collections::BTreeMap;

use crate::models::{
    BudgetLine, BudgetScope, CategoryRollup, CategoryTree, DateWindow, Money, MonthRef,
    SubcategoryKey,
};
use crate::sync::LiveState;

use super::aggregation::{aggregate_spending, total_by_kind, KindTotals};
use super::period::resolve_period;

/// Everything the summary screen shows for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyOverview {
    pub month: MonthRef,
    pub totals: KindTotals,
    pub permanent: Vec<CategoryRollup>,
    pub temporary: Vec<CategoryRollup>,
    /// Spending in subcategories that belong to neither tree
    pub uncategorized: BTreeMap<SubcategoryKey, Money>,
}

impl MonthlyOverview {
    /// Income minus expense for the month
    pub fn balance(&self) -> Money {
        self.totals.balance()
    }

    /// Every line, permanent tree first
    pub fn lines(&self) -> impl Iterator<Item = &BudgetLine> {
        self.permanent
            .iter()
            .chain(self.temporary.iter())
            .flat_map(|rollup| rollup.lines.iter())
    }

    /// Lines with a budget or some spending
    pub fn meaningful_lines(&self) -> Vec<BudgetLine> {
        meaningful(self.lines().cloned())
    }
}

/// Budget that applies to `key` in `month` under `scope`
///
/// Zero when the key is not in that scope's tree, or, for temporary
/// budgets, when no period is active that month.
pub fn budgeted_for(state: &LiveState, key: &SubcategoryKey, scope: BudgetScope, month: MonthRef) -> Money {
    match scope {
        BudgetScope::Permanent if state.categories().contains(key) => {
            state.budgets().get(key).unwrap_or_default()
        }
        BudgetScope::Temporary if state.temp_categories().contains(key) => {
            resolve_period(state.temp_budgets().periods(key), month)
                .map(|p| p.amount)
                .unwrap_or_default()
        }
        _ => Money::zero(),
    }
}

/// Group lines per category of `tree`, sorted for display
///
/// Categories without subcategories appear with zero totals.
pub fn roll_up<F>(tree: &CategoryTree, scope: BudgetScope, mut line_for: F) -> Vec<CategoryRollup>
where
    F: FnMut(SubcategoryKey) -> BudgetLine,
{
    tree.categories()
        .into_iter()
        .map(|category| {
            let mut rollup = CategoryRollup::new(category, scope);
            for sub in tree.subcategories(category) {
                rollup.add_line(line_for(SubcategoryKey::new(category, sub)));
            }
            rollup
        })
        .collect()
}

/// Budget-versus-actual for every subcategory of both trees in `month`
pub fn monthly_overview(state: &LiveState, month: MonthRef) -> MonthlyOverview {
    let window = DateWindow::month(month);
    let spending = aggregate_spending(state.transactions(), &window);
    let spent_in = |key: &SubcategoryKey| spending.get(key).copied().unwrap_or_default();

    let permanent = roll_up(state.categories(), BudgetScope::Permanent, |key| {
        let budgeted = budgeted_for(state, &key, BudgetScope::Permanent, month);
        let spent = spent_in(&key);
        BudgetLine::new(key, BudgetScope::Permanent, budgeted, spent)
    });
    let temporary = roll_up(state.temp_categories(), BudgetScope::Temporary, |key| {
        let budgeted = budgeted_for(state, &key, BudgetScope::Temporary, month);
        let spent = spent_in(&key);
        BudgetLine::new(key, BudgetScope::Temporary, budgeted, spent)
    });

    MonthlyOverview {
        month,
        totals: total_by_kind(state.transactions(), &window),
        permanent,
        temporary,
        uncategorized: uncategorized_spending(state, spending),
    }
}

/// Drop lines with neither budget nor spending
pub fn meaningful(lines: impl IntoIterator<Item = BudgetLine>) -> Vec<BudgetLine> {
    lines.into_iter().filter(BudgetLine::is_meaningful).collect()
}

/// Keep only spending whose subcategory belongs to neither tree
///
/// These still count toward the month's expense total.
fn uncategorized_spending(
    state: &LiveState,
    mut spending: BTreeMap<SubcategoryKey, Money>,
) -> BTreeMap<SubcategoryKey, Money> {
    spending.retain(|key, _| !state.categories().contains(key) && !state.temp_categories().contains(key));
    spending
}
