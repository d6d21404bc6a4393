//! Single-document repositories
//!
//! The category trees and both budget maps are each stored as one JSON
//! document that is read and rewritten whole.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{HearthError, HearthResult};

use super::file_io::{read_json, stage_json, StagedWrite};

/// Repository holding one whole document in memory
pub struct DocumentRepository<T> {
    path: PathBuf,
    data: RwLock<T>,
}

impl<T> DocumentRepository<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(T::default()),
        }
    }

    /// Load the document from disk; a missing file loads as empty
    pub fn load(&self) -> HearthResult<()> {
        let loaded: T = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = loaded;
        Ok(())
    }

    /// Save the document to disk
    pub fn save(&self) -> HearthResult<()> {
        self.stage()?.publish()
    }

    /// Serialize the document to a temp file without replacing it on disk
    pub fn stage(&self) -> HearthResult<StagedWrite> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        stage_json(&self.path, &*data)
    }

    /// A copy of the current document
    pub fn get(&self) -> HearthResult<T> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Mutate the document in place
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> HearthResult<R> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(f(&mut data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTree, SubcategoryKey};
    use tempfile::TempDir;

    #[test]
    fn test_update_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo: DocumentRepository<CategoryTree> = DocumentRepository::new(path.clone());

        let key = SubcategoryKey::new("Hogar", "Supermercado");
        let added = repo.update(|tree| tree.add_subcategory(&key)).unwrap();
        assert!(added);
        repo.save().unwrap();

        let reopened: DocumentRepository<CategoryTree> = DocumentRepository::new(path);
        reopened.load().unwrap();
        assert!(reopened.get().unwrap().contains(&key));
    }

    #[test]
    fn test_load_discards_unsaved_changes() {
        let temp_dir = TempDir::new().unwrap();
        let repo: DocumentRepository<CategoryTree> =
            DocumentRepository::new(temp_dir.path().join("categories.json"));

        repo.update(|tree| tree.add_category("Ocio")).unwrap();
        repo.load().unwrap();
        assert!(repo.get().unwrap().is_empty());
    }
}
