//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::{money, truncate};
use crate::config::Settings;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn short_id(txn: &Transaction) -> String {
    txn.id.to_string().chars().take(8).collect()
}

fn category_label(txn: &Transaction) -> String {
    txn.key().map(|k| k.to_string()).unwrap_or_default()
}

/// Format transactions as a table
pub fn format_transaction_list(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: short_id(txn),
        date: txn.date.format("%Y-%m-%d").to_string(),
        kind: settings.kind_label(txn.kind).to_string(),
        category: truncate(&category_label(txn), 30),
        description: truncate(&txn.description, 30),
        amount: money(txn.amount, settings),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(5), Alignment::right());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", settings.kind_label(txn.kind)));
    output.push_str(&format!("Amount:      {}\n", money(txn.amount, settings)));

    if let Some(key) = txn.key() {
        output.push_str(&format!("Category:    {}\n", key.category));
        output.push_str(&format!("Subcategory: {}\n", key.subcategory));
    }
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SubcategoryKey};
    use chrono::NaiveDate;

    fn expense() -> Transaction {
        Transaction::expense(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_units(5000),
            SubcategoryKey::new("Hogar", "Supermercado"),
            "Feria",
        )
    }

    #[test]
    fn test_format_transaction_list() {
        let formatted = format_transaction_list(&[expense()], &Settings::default());
        assert!(formatted.contains("2025-01-15"));
        assert!(formatted.contains("Hogar/Supermercado"));
        assert!(formatted.contains("$5.000"));
        assert!(formatted.contains("Gasto"));
    }

    #[test]
    fn test_format_empty_list() {
        let formatted = format_transaction_list(&[], &Settings::default());
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let formatted = format_transaction_details(&expense(), &Settings::default());
        assert!(formatted.contains("Subcategory: Supermercado"));
        assert!(formatted.contains("Description: Feria"));
    }
}
