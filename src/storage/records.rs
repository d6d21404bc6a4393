//! Record repository for JSON storage
//!
//! Manages loading and saving records to records.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{HearthError, HearthResult};
use crate::models::{locale_cmp, Record, RecordId};

use super::file_io::{read_json, stage_json, StagedWrite};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecordData {
    records: Vec<Record>,
}

/// Repository for record persistence
pub struct RecordRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecordId, Record>>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk
    pub fn load(&self) -> HearthResult<()> {
        let file_data: RecordData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.clear();
        for record in file_data.records {
            data.insert(record.id, record);
        }

        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> HearthResult<()> {
        self.stage()?.publish()
    }

    pub fn stage(&self) -> HearthResult<StagedWrite> {
        let records = self.get_all()?;
        stage_json(&self.path, &RecordData { records })
    }

    pub fn get(&self, id: RecordId) -> HearthResult<Option<Record>> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&id).cloned())
    }

    /// Find by id (full or short) or by case-insensitive name
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Record>> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Some(record) = data.values().find(|r| r.id.matches(identifier)) {
            return Ok(Some(record.clone()));
        }
        let wanted = identifier.trim().to_lowercase();
        Ok(data
            .values()
            .find(|r| r.name.trim().to_lowercase() == wanted)
            .cloned())
    }

    /// All records sorted by name
    pub fn get_all(&self) -> HearthResult<Vec<Record>> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        Ok(records)
    }

    pub fn upsert(&self, record: Record) -> HearthResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(record.id, record);
        Ok(())
    }

    pub fn delete(&self, id: RecordId) -> HearthResult<Option<Record>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&id))
    }

    /// Whether another record already uses `name`
    pub fn name_exists(&self, name: &str, exclude: Option<RecordId>) -> HearthResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let wanted = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|r| Some(r.id) != exclude && r.name.trim().to_lowercase() == wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordEntry};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, RecordRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecordRepository::new(temp_dir.path().join("records.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_save_and_load_keeps_entries() {
        let (_temp_dir, repo) = create_test_repo();
        let mut record = Record::new("Viaje");
        record.push_entry(RecordEntry::new("Hotel", Money::from_units(120000)));
        let id = record.id;
        repo.upsert(record).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.entries().len(), 1);
        assert_eq!(loaded.total().units(), 120000);
    }

    #[test]
    fn test_find_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        let record = Record::new("Deudas");
        repo.upsert(record.clone()).unwrap();

        assert_eq!(repo.find("deudas").unwrap().unwrap().id, record.id);
        assert_eq!(repo.find(&record.id.to_string()).unwrap().unwrap().id, record.id);
        assert!(repo.name_exists("DEUDAS", None).unwrap());
        assert!(!repo.name_exists("Deudas", Some(record.id)).unwrap());
    }

    #[test]
    fn test_undecodable_entries_survive_load() {
        let (temp_dir, repo) = create_test_repo();
        let raw = r#"{"records":[{"id":"7c9e6679-7425-40de-944b-e07fc1f90ae7","name":"Viejo","entries":"not a list","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}]}"#;
        std::fs::write(temp_dir.path().join("records.json"), raw).unwrap();

        repo.load().unwrap();
        let records = repo.get_all().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].entries().is_empty());
    }
}
