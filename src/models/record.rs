//! Free-form records
//!
//! A record is a named running tally of `{description, amount}` entries,
//! unrelated to categories or budgets. Entries are persisted as one encoded
//! text field; `entries()` is the decode boundary and never fails: a record
//! whose text cannot be decoded reads as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::money::Money;

/// One line in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub description: String,
    pub amount: Money,
}

impl RecordEntry {
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Encode entries into their stored text form
pub fn encode_entries(entries: &[RecordEntry]) -> String {
    // Serializing a Vec of plain structs cannot fail
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the stored text form
pub fn decode_entries(raw: &str) -> Result<Vec<RecordEntry>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// A named list of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    pub name: String,

    /// Encoded entry list
    #[serde(rename = "entries", default)]
    pub entries_raw: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name: name.into(),
            entries_raw: encode_entries(&[]),
            created_at: now,
            updated_at: now,
        }
    }

    /// Decoded entries; undecodable text degrades to an empty list
    pub fn entries(&self) -> Vec<RecordEntry> {
        match decode_entries(&self.entries_raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(record = %self.id, error = %e, "record entries could not be decoded");
                Vec::new()
            }
        }
    }

    /// Replace all entries
    pub fn set_entries(&mut self, entries: &[RecordEntry]) {
        self.entries_raw = encode_entries(entries);
        self.updated_at = Utc::now();
    }

    /// Append one entry
    pub fn push_entry(&mut self, entry: RecordEntry) {
        let mut entries = self.entries();
        entries.push(entry);
        self.set_entries(&entries);
    }

    /// Sum of all entry amounts
    pub fn total(&self) -> Money {
        self.entries().iter().map(|e| e.amount).sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Record name cannot be empty".into());
        }
        if name.chars().count() > 80 {
            return Err("Record name is too long (max 80 characters)".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_total() {
        let mut record = Record::new("Prestamo a Juan");
        record.push_entry(RecordEntry::new("Cena", Money::from_units(3000)));
        record.push_entry(RecordEntry::new("Taxi", Money::from_units(1200)));

        assert_eq!(record.entries().len(), 2);
        assert_eq!(record.total().units(), 4200);
    }

    #[test]
    fn test_malformed_entries_degrade_to_empty() {
        let mut record = Record::new("Roto");
        record.entries_raw = "{not json".to_string();
        assert!(record.entries().is_empty());
        assert_eq!(record.total(), Money::zero());
    }

    #[test]
    fn test_blank_raw_text_is_empty() {
        assert_eq!(decode_entries("").unwrap(), Vec::new());
        assert_eq!(decode_entries("  ").unwrap(), Vec::new());
    }

    #[test]
    fn test_encoded_form() {
        let entries = vec![RecordEntry::new("Cena", Money::from_units(3000))];
        assert_eq!(
            encode_entries(&entries),
            r#"[{"description":"Cena","amount":3000}]"#
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(Record::new("Ahorro").validate().is_ok());
        assert!(Record::new("  ").validate().is_err());
    }
}
