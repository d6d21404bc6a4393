//! Monthly overview and temporary period formatting

use super::money;
use crate::config::Settings;
use crate::models::{BudgetPeriod, CategoryRollup, SubcategoryKey};
use crate::services::budget::MonthlyOverview;

fn format_rollups(output: &mut String, title: &str, rollups: &[CategoryRollup], settings: &Settings) {
    output.push_str(&format!("{}\n", title));
    if rollups.is_empty() {
        output.push_str("  (none)\n");
        return;
    }

    output.push_str(&format!(
        "  {:<28} {:>12} {:>12} {:>12}\n",
        "", "Budgeted", "Spent", "Difference"
    ));

    for rollup in rollups {
        let marker = if rollup.has_overspent() { "!" } else { " " };
        output.push_str(&format!(
            "{} {:<28} {:>12} {:>12} {:>12}\n",
            marker,
            rollup.category,
            money(rollup.budgeted, settings),
            money(rollup.spent, settings),
            money(rollup.difference, settings),
        ));

        for (i, line) in rollup.lines.iter().enumerate() {
            let prefix = if i == rollup.lines.len() - 1 { "└── " } else { "├── " };
            let name = format!("{}{}", prefix, line.key.subcategory);
            output.push_str(&format!(
                "  {:<28} {:>12} {:>12} {:>12}\n",
                name,
                money(line.budgeted, settings),
                money(line.spent, settings),
                money(line.difference, settings),
            ));
        }
    }
}

/// Format the summary of one month
pub fn format_overview(overview: &MonthlyOverview, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Summary for {}\n", overview.month));
    output.push_str(&format!(
        "  {:<10} {:>14}\n",
        settings.income_label,
        money(overview.totals.income, settings)
    ));
    output.push_str(&format!(
        "  {:<10} {:>14}\n",
        settings.expense_label,
        money(overview.totals.expense, settings)
    ));
    output.push_str(&format!("  {:<10} {:>14}\n\n", "Balance", money(overview.balance(), settings)));

    format_rollups(&mut output, "Permanent budgets", &overview.permanent, settings);
    output.push('\n');
    format_rollups(&mut output, "Temporary budgets", &overview.temporary, settings);

    if !overview.uncategorized.is_empty() {
        output.push_str("\nOutside both trees\n");
        for (key, spent) in &overview.uncategorized {
            output.push_str(&format!("  {:<28} {:>12}\n", key.to_string(), money(*spent, settings)));
        }
    }

    output
}

/// Format the stored periods of a temporary subcategory
pub fn format_periods(key: &SubcategoryKey, periods: &[BudgetPeriod], settings: &Settings) -> String {
    if periods.is_empty() {
        return format!("No periods for {}.\n", key);
    }

    let mut output = format!("Periods for {}:\n", key);
    for (i, period) in periods.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {}..{}  {}\n",
            i,
            period.from,
            period.to,
            money(period.amount, settings)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, BudgetScope, Money, MonthRef};
    use crate::services::aggregation::KindTotals;

    #[test]
    fn test_format_overview() {
        let mut rollup = CategoryRollup::new("Hogar", BudgetScope::Permanent);
        rollup.add_line(BudgetLine::new(
            SubcategoryKey::new("Hogar", "Supermercado"),
            BudgetScope::Permanent,
            Money::from_units(15000),
            Money::from_units(17000),
        ));
        let overview = MonthlyOverview {
            month: MonthRef::new(2, 2025).unwrap(),
            totals: KindTotals {
                income: Money::from_units(300000),
                expense: Money::from_units(17000),
            },
            permanent: vec![rollup],
            temporary: Vec::new(),
            uncategorized: Default::default(),
        };

        let formatted = format_overview(&overview, &Settings::default());
        assert!(formatted.contains("Summary for 2025-03"));
        assert!(formatted.contains("$283.000"));
        assert!(formatted.contains("└── Supermercado"));
        assert!(formatted.contains("-$2.000"));
        assert!(formatted.contains("! Hogar"));
        assert!(!formatted.contains("Outside both trees"));
    }

    #[test]
    fn test_format_overview_lists_uncategorized() {
        let mut overview = MonthlyOverview {
            month: MonthRef::new(2, 2025).unwrap(),
            totals: KindTotals {
                income: Money::zero(),
                expense: Money::from_units(400),
            },
            permanent: Vec::new(),
            temporary: Vec::new(),
            uncategorized: Default::default(),
        };
        overview
            .uncategorized
            .insert(SubcategoryKey::new("Otros", "Regalos"), Money::from_units(400));

        let formatted = format_overview(&overview, &Settings::default());
        assert!(formatted.contains("Outside both trees"));
        assert!(formatted.contains("Otros/Regalos"));
        assert!(formatted.contains("$400"));
    }

    #[test]
    fn test_format_periods() {
        let key = SubcategoryKey::new("Viajes", "Verano");
        let periods = vec![BudgetPeriod::new(
            Money::from_units(50000),
            MonthRef::new(0, 2025).unwrap(),
            MonthRef::new(2, 2025).unwrap(),
        )];
        let formatted = format_periods(&key, &periods, &Settings::default());
        assert!(formatted.contains("[0] 2025-01..2025-03  $50.000"));
        assert!(format_periods(&key, &[], &Settings::default()).contains("No periods"));
    }
}
