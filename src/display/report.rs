//! Advice and clean-up report formatting

use super::money;
use crate::advisor::AdviceResponse;
use crate::config::Settings;
use crate::services::cleaner::{CleanPlan, CleanReport};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format an advisor answer as a panel
pub fn format_advice(advice: &AdviceResponse) -> String {
    let mut output = String::new();
    output.push_str("Analysis\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(advice.analysis.trim());
    output.push_str("\n\nRecommendations\n");
    output.push_str(&separator(40));
    output.push('\n');

    for (i, recommendation) in advice
        .recommendations
        .iter()
        .filter(|r| !r.trim().is_empty())
        .enumerate()
    {
        output.push_str(&format!("{}. {}\n", i + 1, recommendation.trim()));
    }
    output
}

/// Describe what a clean would delete
pub fn format_clean_plan(plan: &CleanPlan, settings: &Settings) -> String {
    if plan.is_empty() {
        return format!("Nothing to clean in {}.\n", plan.window);
    }

    let total = plan.transactions.iter().map(|t| t.amount).sum();
    let mut output = format!("Cleaning {} will delete:\n", plan.window);
    output.push_str(&format!(
        "  {} transaction(s) totalling {}\n",
        plan.transactions.len(),
        money(total, settings)
    ));
    output.push_str(&format!("  {} temporary period(s)\n", plan.periods.len()));
    for (key, period) in &plan.periods {
        output.push_str(&format!("    {} {}..{}\n", key, period.from, period.to));
    }
    if !plan.emptied_subcategories.is_empty() {
        let names: Vec<String> = plan.emptied_subcategories.iter().map(|k| k.to_string()).collect();
        output.push_str(&format!("  emptied subcategories: {}\n", names.join(", ")));
    }
    if !plan.emptied_categories.is_empty() {
        output.push_str(&format!("  emptied categories: {}\n", plan.emptied_categories.join(", ")));
    }
    output
}

/// Summarise a finished clean
pub fn format_clean_report(report: &CleanReport) -> String {
    format!(
        "Deleted {} transaction(s) in {} batch(es) and {} temporary period(s); removed {} subcategory(ies) and {} category(ies).\n",
        report.transactions_deleted,
        report.batches,
        report.periods_deleted,
        report.subcategories_removed,
        report.categories_removed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_advice_skips_blank_recommendations() {
        let advice = AdviceResponse {
            analysis: "Vas bien".into(),
            recommendations: vec!["Ahorrar".into(), " ".into(), "Cocinar".into()],
        };
        let formatted = format_advice(&advice);
        assert!(formatted.contains("1. Ahorrar"));
        assert!(formatted.contains("2. Cocinar"));
        assert!(!formatted.contains("3."));
    }

    #[test]
    fn test_format_clean_report() {
        let report = CleanReport {
            transactions_deleted: 3,
            periods_deleted: 1,
            subcategories_removed: 0,
            categories_removed: 0,
            batches: 1,
        };
        assert!(format_clean_report(&report).starts_with("Deleted 3 transaction(s)"));
    }
}
