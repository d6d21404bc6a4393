//! Multi-section CSV report
//!
//! The document starts with a UTF-8 byte-order mark and holds three
//! sections (transactions, budgets, records) separated by a blank line.
//! Each section is a title line, a header row and its rows, delimited by
//! `;`. Text fields are always double-quoted, even when they look like
//! numbers, so descriptions survive embedded delimiters; amounts are raw
//! integers.

use std::io::Write;

use crate::config::Settings;
use crate::error::{HearthError, HearthResult};
use crate::models::{BudgetScope, DateWindow, Money, SubcategoryKey, Transaction};
use crate::services::aggregation::aggregate_spending;
use crate::services::period::first_intersecting;
use crate::sync::LiveState;

/// Byte-order mark that lets spreadsheet tools detect UTF-8
pub const BOM: &str = "\u{feff}";

const TRANSACTIONS_TITLE: &str = "Transactions";
const TRANSACTIONS_HEADER: [&str; 6] = ["Date", "Type", "Description", "Category", "Subcategory", "Amount"];
const BUDGETS_TITLE: &str = "Budgets";
const BUDGETS_HEADER: [&str; 5] = ["Category", "Subcategory", "Budgeted", "Spent", "Difference"];
const RECORDS_TITLE: &str = "Records";
const RECORDS_HEADER: [&str; 3] = ["Record", "Description", "Amount"];

/// One row of the budgets section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub key: SubcategoryKey,
    pub scope: BudgetScope,
    pub budgeted: Money,
    pub spent: Money,
    pub difference: Money,
}

/// Row counts of a written report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub transactions: usize,
    pub budgets: usize,
    pub records: usize,
}

/// Budget rows for a window
///
/// Permanent subcategories with a nonzero budget are reported at their
/// monthly amount. Temporary subcategories appear when a stored period
/// intersects the window, with the amount of the first such period. Spent
/// covers the whole window.
pub fn budget_rows(state: &LiveState, window: &DateWindow) -> Vec<BudgetRow> {
    let spending = aggregate_spending(state.transactions(), window);
    let spent_in = |key: &SubcategoryKey| spending.get(key).copied().unwrap_or_default();

    let permanent = state.categories().keys().into_iter().filter_map(|key| {
        let budgeted = state.budgets().get(&key).filter(|amount| !amount.is_zero())?;
        Some((key, BudgetScope::Permanent, budgeted))
    });
    let temporary = state.temp_categories().keys().into_iter().filter_map(|key| {
        let period = first_intersecting(state.temp_budgets().periods(&key), window)?;
        let budgeted = period.amount;
        Some((key, BudgetScope::Temporary, budgeted))
    });

    let mut rows: Vec<BudgetRow> = permanent
        .chain(temporary)
        .map(|(key, scope, budgeted)| {
            let spent = spent_in(&key);
            BudgetRow {
                key,
                scope,
                budgeted,
                spent,
                difference: budgeted - spent,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        a.key
            .locale_cmp(&b.key)
            .then_with(|| (a.scope == BudgetScope::Temporary).cmp(&(b.scope == BudgetScope::Temporary)))
    });
    rows
}

/// Fields arrive already encoded by [`text`] or [`amount`]
fn section_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer)
}

/// A text field, quoted with inner quotes doubled
fn text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn amount(value: Money) -> String {
    value.units().to_string()
}

fn texts<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(text)
}

fn blank_line<W: Write>(writer: &mut W) -> HearthResult<()> {
    writer
        .write_all(b"\n")
        .map_err(|e| HearthError::Export(format!("Failed to write CSV: {}", e)))
}

/// Write the report for `window` to `writer`
pub fn write_report<W: Write>(
    state: &LiveState,
    window: &DateWindow,
    settings: &Settings,
    mut writer: W,
) -> HearthResult<ExportSummary> {
    let mut summary = ExportSummary::default();

    writer
        .write_all(BOM.as_bytes())
        .map_err(|e| HearthError::Export(format!("Failed to write CSV: {}", e)))?;

    // Transactions
    let mut transactions: Vec<&Transaction> = state
        .transactions()
        .iter()
        .filter(|t| window.contains_millis(t.timestamp))
        .collect();
    transactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.created_at.cmp(&b.created_at)));
    {
        let mut csv = section_writer(&mut writer);
        csv.write_record(texts([TRANSACTIONS_TITLE]))?;
        csv.write_record(texts(TRANSACTIONS_HEADER))?;
        for txn in &transactions {
            csv.write_record([
                text(&txn.date.format("%Y-%m-%d").to_string()),
                text(settings.kind_label(txn.kind)),
                text(&txn.description),
                text(txn.category.as_deref().unwrap_or_default()),
                text(txn.subcategory.as_deref().unwrap_or_default()),
                amount(txn.amount),
            ])?;
        }
        csv.flush()?;
        summary.transactions = transactions.len();
    }
    blank_line(&mut writer)?;

    // Budgets
    let rows = budget_rows(state, window);
    {
        let mut csv = section_writer(&mut writer);
        csv.write_record(texts([BUDGETS_TITLE]))?;
        csv.write_record(texts(BUDGETS_HEADER))?;
        for row in &rows {
            csv.write_record([
                text(&row.key.category),
                text(&row.key.subcategory),
                amount(row.budgeted),
                amount(row.spent),
                amount(row.difference),
            ])?;
        }
        csv.flush()?;
        summary.budgets = rows.len();
    }
    blank_line(&mut writer)?;

    // Records
    {
        let mut csv = section_writer(&mut writer);
        csv.write_record(texts([RECORDS_TITLE]))?;
        csv.write_record(texts(RECORDS_HEADER))?;
        for record in state.records() {
            for entry in record.entries() {
                csv.write_record([
                    text(&record.name),
                    text(&entry.description),
                    amount(entry.amount),
                ])?;
                summary.records += 1;
            }
        }
        csv.flush()?;
    }

    writer
        .flush()
        .map_err(|e| HearthError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(summary)
}

/// The report as a string
pub fn build_report(state: &LiveState, window: &DateWindow, settings: &Settings) -> HearthResult<String> {
    let mut buffer = Vec::new();
    write_report(state, window, settings, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| HearthError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetPeriod, CategoryTree, MonthRef, PermanentBudgets, Record, RecordEntry,
        TemporaryBudgets,
    };
    use crate::services::aggregation::total_by_kind;
    use crate::sync::Snapshot;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn key(c: &str, s: &str) -> SubcategoryKey {
        SubcategoryKey::new(c, s)
    }

    fn month(m: u32, y: i32) -> MonthRef {
        MonthRef::new(m, y).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> LiveState {
        let mut categories = CategoryTree::new();
        categories.add_subcategory(&key("Hogar", "Supermercado"));
        categories.add_subcategory(&key("Hogar", "Sin presupuesto"));
        let mut budgets = PermanentBudgets::new();
        budgets.set(&key("Hogar", "Supermercado"), Money::from_units(20000));
        budgets.set(&key("Hogar", "Sin presupuesto"), Money::zero());

        let mut temp_categories = CategoryTree::new();
        temp_categories.add_subcategory(&key("Viajes", "Verano"));
        temp_categories.add_subcategory(&key("Viajes", "Pasado"));
        let mut temp_budgets = TemporaryBudgets::new();
        temp_budgets.push(&key("Viajes", "Verano"), BudgetPeriod::new(Money::from_units(50000), month(1, 2025), month(5, 2025)));
        temp_budgets.push(&key("Viajes", "Pasado"), BudgetPeriod::new(Money::from_units(1), month(0, 2020), month(0, 2020)));

        let transactions = vec![
            Transaction::expense(date(2025, 3, 9), Money::from_units(5000), key("Hogar", "Supermercado"), "Feria; verduras \"frescas\""),
            Transaction::expense(date(2025, 3, 2), Money::from_units(10000), key("Hogar", "Supermercado"), ""),
            Transaction::income(date(2025, 3, 1), Money::from_units(300000), "Sueldo"),
            Transaction::expense(date(2025, 4, 1), Money::from_units(999), key("Hogar", "Supermercado"), "fuera"),
        ];

        let mut record = Record::new("Viaje");
        record.set_entries(&[
            RecordEntry::new("Hotel", Money::from_units(120000)),
            RecordEntry::new("Bus", Money::from_units(15000)),
        ]);

        LiveState::new()
            .with(Snapshot::Categories(Arc::new(categories)))
            .with(Snapshot::Budgets(Arc::new(budgets)))
            .with(Snapshot::TempCategories(Arc::new(temp_categories)))
            .with(Snapshot::TempBudgets(Arc::new(temp_budgets)))
            .with(Snapshot::Transactions(Arc::new(transactions)))
            .with(Snapshot::Records(Arc::new(vec![record])))
    }

    fn sections(doc: &str) -> Vec<&str> {
        doc.trim_start_matches(BOM).split("\n\n").collect()
    }

    #[test]
    fn test_document_layout() {
        let window = DateWindow::month(month(2, 2025));
        let doc = build_report(&state(), &window, &Settings::default()).unwrap();

        assert!(doc.starts_with(BOM));
        let parts = sections(&doc);
        assert_eq!(parts.len(), 3);
        assert!(parts[0].starts_with("\"Transactions\"\n\"Date\";\"Type\""));
        assert!(parts[1].starts_with("\"Budgets\"\n"));
        assert!(parts[2].starts_with("\"Records\"\n"));
    }

    #[test]
    fn test_transactions_sorted_labelled_and_quoted() {
        let window = DateWindow::month(month(2, 2025));
        let doc = build_report(&state(), &window, &Settings::default()).unwrap();
        let lines: Vec<&str> = sections(&doc)[0].lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("\"2025-03-01\";\"Ingreso\""));
        assert!(lines[3].ends_with(";10000"));
        assert!(lines[4].contains("\"Feria; verduras \"\"frescas\"\"\""));
    }

    #[test]
    fn test_number_like_text_is_still_quoted() {
        let mut tree = CategoryTree::new();
        tree.add_subcategory(&key("2024", "Luz"));
        let txns = vec![Transaction::expense(date(2025, 3, 2), Money::from_units(5), key("2024", "Luz"), "2024")];
        let mut record = Record::new("42");
        record.set_entries(&[RecordEntry::new("7", Money::from_units(-3))]);
        let state = LiveState::new()
            .with(Snapshot::Categories(Arc::new(tree)))
            .with(Snapshot::Transactions(Arc::new(txns)))
            .with(Snapshot::Records(Arc::new(vec![record])));

        let window = DateWindow::month(month(2, 2025));
        let doc = build_report(&state, &window, &Settings::default()).unwrap();
        let parts = sections(&doc);

        assert_eq!(
            parts[0].lines().nth(2),
            Some("\"2025-03-02\";\"Gasto\";\"2024\";\"2024\";\"Luz\";5")
        );
        assert!(parts[2].contains("\"42\";\"7\";-3"));
    }

    #[test]
    fn test_transaction_amounts_match_kind_totals() {
        let state = state();
        let window = DateWindow::month(month(2, 2025));
        let doc = build_report(&state, &window, &Settings::default()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(sections(&doc)[0].as_bytes());
        let sum: i64 = reader
            .records()
            .skip(2)
            .map(|r| r.unwrap()[5].parse::<i64>().unwrap())
            .sum();

        assert_eq!(sum, total_by_kind(state.transactions(), &window).total().units());
    }

    #[test]
    fn test_budget_rows() {
        let window = DateWindow::months(month(2, 2025), month(3, 2025)).unwrap();
        let rows = budget_rows(&state(), &window);

        let keys: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, ["Hogar/Supermercado", "Viajes/Verano"]);

        // Permanent amount is monthly; spent covers the whole window
        assert_eq!(rows[0].budgeted.units(), 20000);
        assert_eq!(rows[0].spent.units(), 15999);
        assert_eq!(rows[0].difference.units(), 4001);
        assert_eq!(rows[1].budgeted.units(), 50000);
    }

    #[test]
    fn test_records_are_flattened() {
        let window = DateWindow::month(month(2, 2025));
        let mut buffer = Vec::new();
        let summary = write_report(&state(), &window, &Settings::default(), &mut buffer).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.transactions, 3);

        let doc = String::from_utf8(buffer).unwrap();
        assert!(sections(&doc)[2].contains("\"Viaje\";\"Hotel\";120000"));
    }

    #[test]
    fn test_empty_state_still_has_three_sections() {
        let window = DateWindow::month(month(2, 2025));
        let doc = build_report(&LiveState::new(), &window, &Settings::default()).unwrap();
        assert_eq!(sections(&doc).len(), 3);
    }
}
