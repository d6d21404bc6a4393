//! Record service
//!
//! Free-form named tallies, independent of categories and budgets.

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{Money, Record, RecordEntry};
use crate::storage::Storage;
use crate::sync::Collection;

/// Service for record management
pub struct RecordService<'a> {
    storage: &'a Storage,
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an empty record
    pub fn create(&self, name: &str) -> HearthResult<Record> {
        let record = Record::new(name.trim());
        record.validate().map_err(HearthError::Validation)?;

        if self.storage.records.name_exists(&record.name, None)? {
            return Err(HearthError::Duplicate {
                entity_type: "Record",
                identifier: record.name.clone(),
            });
        }

        self.storage.records.upsert(record.clone())?;
        self.storage.commit(&[Collection::Records])?;

        self.storage
            .log_create(EntityType::Record, record.id.to_string(), &record);
        Ok(record)
    }

    /// Find a record by id or name
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Record>> {
        self.storage.records.find(identifier)
    }

    fn require(&self, identifier: &str) -> HearthResult<Record> {
        self.find(identifier)?
            .ok_or_else(|| HearthError::record_not_found(identifier))
    }

    /// All records sorted by name
    pub fn list(&self) -> HearthResult<Vec<Record>> {
        self.storage.records.get_all()
    }

    /// Append an entry
    pub fn add_entry(&self, identifier: &str, description: &str, amount: Money) -> HearthResult<Record> {
        let description = description.trim();
        if description.is_empty() {
            return Err(HearthError::Validation(
                "Entry description cannot be empty".into(),
            ));
        }

        if !amount.is_within_limit() {
            return Err(HearthError::Validation(format!("Entry amount is too large: {}", amount)));
        }

        let mut record = self.require(identifier)?;
        let before = record.clone();
        record.push_entry(RecordEntry::new(description, amount));

        self.save(&before, record)
    }

    /// Remove the entry at `index` (zero-based, in stored order)
    pub fn remove_entry(&self, identifier: &str, index: usize) -> HearthResult<Record> {
        let mut record = self.require(identifier)?;
        let before = record.clone();

        let mut entries = record.entries();
        if index >= entries.len() {
            return Err(HearthError::NotFound {
                entity_type: "Record entry",
                identifier: format!("{}#{}", record.name, index),
            });
        }
        entries.remove(index);
        record.set_entries(&entries);

        self.save(&before, record)
    }

    /// Rename a record
    pub fn rename(&self, identifier: &str, name: &str) -> HearthResult<Record> {
        let mut record = self.require(identifier)?;
        let before = record.clone();

        record.name = name.trim().to_string();
        record.validate().map_err(HearthError::Validation)?;
        if self.storage.records.name_exists(&record.name, Some(record.id))? {
            return Err(HearthError::Duplicate {
                entity_type: "Record",
                identifier: record.name.clone(),
            });
        }
        record.updated_at = chrono::Utc::now();

        self.save(&before, record)
    }

    /// Delete a record with all its entries
    pub fn delete(&self, identifier: &str) -> HearthResult<Record> {
        let record = self.require(identifier)?;

        self.storage.records.delete(record.id)?;
        self.storage.commit(&[Collection::Records])?;

        self.storage
            .log_delete(EntityType::Record, record.id.to_string(), &record);
        Ok(record)
    }

    fn save(&self, before: &Record, record: Record) -> HearthResult<Record> {
        self.storage.records.upsert(record.clone())?;
        self.storage.commit(&[Collection::Records])?;

        self.storage
            .log_update(EntityType::Record, record.id.to_string(), before, &record);
        Ok(record)
    }
}
