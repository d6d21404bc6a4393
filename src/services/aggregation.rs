//! Spending aggregation
//!
//! Folds transactions inside a time window into per-subcategory totals.
//! All sums are exact integer additions.

use std::collections::BTreeMap;

use crate::models::{DateWindow, Money, SubcategoryKey, Transaction, TransactionKind};

/// Income and expense totals for a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindTotals {
    pub income: Money,
    pub expense: Money,
}

impl KindTotals {
    /// Income minus expense
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    pub fn total(&self) -> Money {
        self.income + self.expense
    }
}

/// Transactions whose timestamp falls inside the window
pub fn filter_window<'a>(
    transactions: &'a [Transaction],
    window: &'a DateWindow,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |t| window.contains_millis(t.timestamp))
}

/// Spent amount per subcategory
///
/// Only expenses naming a non-blank subcategory are counted.
pub fn aggregate_spending(
    transactions: &[Transaction],
    window: &DateWindow,
) -> BTreeMap<SubcategoryKey, Money> {
    let mut totals: BTreeMap<SubcategoryKey, Money> = BTreeMap::new();
    for txn in filter_window(transactions, window).filter(|t| t.is_expense()) {
        if let Some(key) = txn.key() {
            *totals.entry(key).or_default() += txn.amount;
        }
    }
    totals
}

/// Income and expense totals for the window
pub fn total_by_kind(transactions: &[Transaction], window: &DateWindow) -> KindTotals {
    filter_window(transactions, window).fold(KindTotals::default(), |mut totals, txn| {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
        totals
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthRef;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(d: NaiveDate, amount: i64, cat: &str, sub: &str) -> Transaction {
        Transaction::expense(d, Money::from_units(amount), SubcategoryKey::new(cat, sub), "")
    }

    fn month(m: u32, y: i32) -> DateWindow {
        DateWindow::month(MonthRef::new(m, y).unwrap())
    }

    #[test]
    fn test_supermercado_march_and_february() {
        let txns = vec![
            expense(date(2025, 3, 2), 10000, "Hogar", "Supermercado"),
            expense(date(2025, 3, 15), 5000, "Hogar", "Supermercado"),
            expense(date(2025, 3, 31), 2000, "Hogar", "Supermercado"),
        ];
        let key = SubcategoryKey::new("Hogar", "Supermercado");

        let march = aggregate_spending(&txns, &month(2, 2025));
        assert_eq!(march.get(&key).copied(), Some(Money::from_units(17000)));

        let february = aggregate_spending(&txns, &month(1, 2025));
        assert_eq!(february.get(&key).copied().unwrap_or_default(), Money::zero());
    }

    #[test]
    fn test_income_and_blank_subcategory_are_ignored() {
        let mut blank = expense(date(2025, 3, 2), 700, "Hogar", "x");
        blank.subcategory = Some("  ".into());
        let txns = vec![
            Transaction::income(date(2025, 3, 1), Money::from_units(900000), "Sueldo"),
            blank,
            expense(date(2025, 3, 3), 300, "Hogar", "Luz"),
        ];

        let totals = aggregate_spending(&txns, &month(2, 2025));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.values().copied().sum::<Money>().units(), 300);
    }

    #[test]
    fn test_same_subcategory_in_two_categories_is_not_merged() {
        let txns = vec![
            expense(date(2025, 3, 2), 100, "Hogar", "Varios"),
            expense(date(2025, 3, 2), 50, "Ocio", "Varios"),
        ];
        let totals = aggregate_spending(&txns, &month(2, 2025));
        assert_eq!(totals[&SubcategoryKey::new("Hogar", "Varios")].units(), 100);
        assert_eq!(totals[&SubcategoryKey::new("Ocio", "Varios")].units(), 50);
    }

    #[test]
    fn test_totals_equal_sum_of_matching_transactions() {
        let txns: Vec<_> = (1..=28)
            .map(|d| {
                let sub = if d % 3 == 0 { "Luz" } else { "Agua" };
                expense(date(2025, 2, d), i64::from(d) * 137, "Hogar", sub)
            })
            .collect();
        let window = DateWindow::from_dates(date(2025, 2, 5), date(2025, 2, 20)).unwrap();

        let totals = aggregate_spending(&txns, &window);
        let expected: Money = txns
            .iter()
            .filter(|t| window.contains_millis(t.timestamp))
            .map(|t| t.amount)
            .sum();
        assert_eq!(totals.values().copied().sum::<Money>(), expected);
    }

    #[test]
    fn test_oversized_stored_amounts_saturate() {
        let txns = vec![
            expense(date(2025, 3, 2), i64::MAX, "Hogar", "Luz"),
            expense(date(2025, 3, 3), 1, "Hogar", "Luz"),
            Transaction::income(date(2025, 3, 1), Money::from_units(i64::MAX), ""),
            Transaction::income(date(2025, 3, 4), Money::from_units(1), ""),
        ];
        let window = month(2, 2025);

        let totals = aggregate_spending(&txns, &window);
        assert_eq!(totals[&SubcategoryKey::new("Hogar", "Luz")].units(), i64::MAX);

        let by_kind = total_by_kind(&txns, &window);
        assert_eq!(by_kind.income.units(), i64::MAX);
        assert_eq!(by_kind.balance().units(), 0);
    }

    #[test]
    fn test_total_by_kind() {
        let txns = vec![
            Transaction::income(date(2025, 3, 1), Money::from_units(1000), ""),
            expense(date(2025, 3, 2), 300, "Hogar", "Luz"),
            expense(date(2025, 4, 1), 999, "Hogar", "Luz"),
        ];
        let totals = total_by_kind(&txns, &month(2, 2025));
        assert_eq!(totals.income.units(), 1000);
        assert_eq!(totals.expense.units(), 300);
        assert_eq!(totals.balance().units(), 700);
    }
}
