//! Display formatting for terminal output
//!
//! Turns models and engine results into text for the CLI: list tables,
//! category trees, the monthly overview and advice panels.

pub mod budget;
pub mod category;
pub mod record;
pub mod report;
pub mod transaction;

use crate::config::Settings;
use crate::models::Money;

pub use budget::{format_overview, format_periods};
pub use category::format_category_tree;
pub use record::{format_record_details, format_record_list};
pub use report::{format_advice, format_clean_plan, format_clean_report};
pub use transaction::{format_transaction_details, format_transaction_list};

/// Amount with the configured symbol and grouping, e.g. `$17.000`
pub fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol, settings.locale)
}

/// Cut `s` to at most `max_chars` characters, marking the cut with `...`
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_uses_settings() {
        let settings = Settings::default();
        assert_eq!(money(Money::from_units(-17000), &settings), "-$17.000");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Peluquería", 20), "Peluquería");
        assert_eq!(truncate("Útiles escolares del año", 10), "Útiles ...");
    }
}
