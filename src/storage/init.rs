//! Storage initialization
//!
//! Handles first-run setup and the default permanent categories

use crate::config::paths::HearthPaths;
use crate::error::HearthError;
use crate::models::{CategoryTree, SubcategoryKey};

use super::file_io::write_json_atomic;

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Hogar", &["Supermercado", "Luz", "Agua", "Gas", "Internet"]),
    ("Transporte", &["Combustible", "Transporte público"]),
    ("Salud", &["Farmacia", "Consultas"]),
    ("Ocio", &["Salidas", "Suscripciones"]),
];

/// Initialize storage for a fresh installation
///
/// Creates the data directory and, when no permanent tree exists yet, a
/// starter set of categories. Existing data is never overwritten.
pub fn initialize_storage(paths: &HearthPaths) -> Result<(), HearthError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        write_json_atomic(paths.categories_file(), &default_categories())?;
        tracing::info!(path = %paths.categories_file().display(), "created default categories");
    }

    Ok(())
}

/// The starter permanent tree
pub fn default_categories() -> CategoryTree {
    let mut tree = CategoryTree::new();
    for (category, subcategories) in DEFAULT_CATEGORIES {
        for subcategory in *subcategories {
            tree.add_subcategory(&SubcategoryKey::new(*category, *subcategory));
        }
    }
    tree
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &HearthPaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());

        let tree: CategoryTree = read_json(paths.categories_file()).unwrap();
        assert_eq!(tree.categories(), ["Hogar", "Ocio", "Salud", "Transporte"]);
        assert!(tree.contains(&SubcategoryKey::new("Hogar", "Supermercado")));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let mut custom = CategoryTree::new();
        custom.add_category("Propia");
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        initialize_storage(&paths).unwrap();

        let tree: CategoryTree = read_json(paths.categories_file()).unwrap();
        assert_eq!(tree.categories(), ["Propia"]);
    }
}
