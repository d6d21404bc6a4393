//! Record display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::money;
use crate::config::Settings;
use crate::models::Record;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format records as a table of names, entry counts and totals
pub fn format_record_list(records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows = records.iter().map(|record| RecordRow {
        name: record.name.clone(),
        entries: record.entries().len(),
        total: money(record.total(), settings),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    format!("{}\n", table)
}

/// Format one record with its numbered entries
pub fn format_record_details(record: &Record, settings: &Settings) -> String {
    let mut output = format!("Record: {}\n", record.name);
    let entries = record.entries();

    if entries.is_empty() {
        output.push_str("  (no entries)\n");
        return output;
    }

    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {:<30} {:>12}\n",
            i,
            entry.description,
            money(entry.amount, settings)
        ));
    }
    output.push_str(&format!("  {:<34} {:>12}\n", "Total", money(record.total(), settings)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordEntry};

    fn record() -> Record {
        let mut record = Record::new("Viaje");
        record.push_entry(RecordEntry::new("Hotel", Money::from_units(120000)));
        record.push_entry(RecordEntry::new("Bus", Money::from_units(15000)));
        record
    }

    #[test]
    fn test_format_record_list() {
        let formatted = format_record_list(&[record()], &Settings::default());
        assert!(formatted.contains("Viaje"));
        assert!(formatted.contains("$135.000"));
    }

    #[test]
    fn test_format_record_details() {
        let formatted = format_record_details(&record(), &Settings::default());
        assert!(formatted.contains("[1] Bus"));
        assert!(formatted.contains("$135.000"));
        assert!(format_record_details(&Record::new("Vacío"), &Settings::default()).contains("(no entries)"));
    }
}
