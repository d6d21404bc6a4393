//! Temporary budget period resolution
//!
//! Pure lookups over a subcategory's stored period list. Stored order is
//! significant: when periods overlap, the first one stored wins.

use crate::models::{BudgetPeriod, DateWindow, MonthRef};

/// The period active in `reference`, if any
///
/// Returns the first period in stored order with `from <= reference <= to`.
/// The `to` month is covered through its last day.
pub fn resolve_period(periods: &[BudgetPeriod], reference: MonthRef) -> Option<&BudgetPeriod> {
    periods.iter().find(|p| p.contains(reference))
}

/// The first stored period sharing at least one day with `window`
pub fn first_intersecting<'a>(
    periods: &'a [BudgetPeriod],
    window: &DateWindow,
) -> Option<&'a BudgetPeriod> {
    periods.iter().find(|p| p.intersects(window))
}

/// Index of the first stored period overlapping `candidate`
pub fn find_overlap(periods: &[BudgetPeriod], candidate: &BudgetPeriod) -> Option<usize> {
    periods.iter().position(|p| p.overlaps(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn month(m: u32, y: i32) -> MonthRef {
        MonthRef::new(m, y).unwrap()
    }

    fn period(amount: i64, from: MonthRef, to: MonthRef) -> BudgetPeriod {
        BudgetPeriod::new(Money::from_units(amount), from, to)
    }

    #[test]
    fn test_active_inside_range_none_after() {
        let periods = [period(50000, month(0, 2025), month(2, 2025))];

        let active = resolve_period(&periods, month(1, 2025)).unwrap();
        assert_eq!(active.amount.units(), 50000);
        assert!(resolve_period(&periods, month(3, 2025)).is_none());
    }

    #[test]
    fn test_endpoints_are_inclusive() {
        let periods = [period(1, month(10, 2024), month(1, 2025))];
        assert!(resolve_period(&periods, month(10, 2024)).is_some());
        assert!(resolve_period(&periods, month(0, 2025)).is_some());
        assert!(resolve_period(&periods, month(1, 2025)).is_some());
        assert!(resolve_period(&periods, month(9, 2024)).is_none());
    }

    #[test]
    fn test_first_stored_wins_on_overlap() {
        let periods = [
            period(100, month(0, 2025), month(5, 2025)),
            period(200, month(2, 2025), month(3, 2025)),
        ];
        assert_eq!(resolve_period(&periods, month(2, 2025)).unwrap().amount.units(), 100);
    }

    #[test]
    fn test_empty_list_resolves_to_none() {
        assert!(resolve_period(&[], month(0, 2025)).is_none());
    }

    #[test]
    fn test_resolved_period_always_contains_reference() {
        let periods = [
            period(1, month(0, 2024), month(3, 2024)),
            period(2, month(6, 2024), month(6, 2024)),
            period(3, month(11, 2024), month(2, 2025)),
        ];
        let mut reference = month(0, 2023);
        for _ in 0..48 {
            if let Some(p) = resolve_period(&periods, reference) {
                assert!(p.from <= reference && reference <= p.to);
            }
            reference = reference.next();
        }
    }

    #[test]
    fn test_first_intersecting_window() {
        let periods = [
            period(1, month(0, 2024), month(1, 2024)),
            period(2, month(4, 2025), month(7, 2025)),
        ];
        let window = DateWindow::months(month(6, 2025), month(11, 2025)).unwrap();
        assert_eq!(first_intersecting(&periods, &window).unwrap().amount.units(), 2);

        let gap = DateWindow::months(month(3, 2024), month(2, 2025)).unwrap();
        assert!(first_intersecting(&periods, &gap).is_none());
    }

    #[test]
    fn test_find_overlap() {
        let periods = [period(1, month(0, 2025), month(2, 2025))];
        assert_eq!(find_overlap(&periods, &period(5, month(2, 2025), month(4, 2025))), Some(0));
        assert_eq!(find_overlap(&periods, &period(5, month(3, 2025), month(4, 2025))), None);
    }
}
