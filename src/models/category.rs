//! Category trees and subcategory keys
//!
//! A category tree maps a category name to the set of its subcategory
//! names. The household keeps two independent trees, one for permanent
//! budgets and one for temporary budgets. Subcategory names are only unique
//! inside their category, so everything downstream is keyed by the
//! `(category, subcategory)` pair.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which category tree a subcategory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetScope {
    /// Fixed monthly amount, every month
    Permanent,
    /// Amount valid only for explicit month ranges
    Temporary,
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => write!(f, "permanent"),
            Self::Temporary => write!(f, "temporary"),
        }
    }
}

/// A subcategory identified together with its owning category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubcategoryKey {
    pub category: String,
    pub subcategory: String,
}

impl SubcategoryKey {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// Parse `Category/Subcategory`
    pub fn parse(s: &str) -> Option<Self> {
        let (category, subcategory) = s.split_once('/')?;
        let category = category.trim();
        let subcategory = subcategory.trim();
        if category.is_empty() || subcategory.is_empty() {
            return None;
        }
        Some(Self::new(category, subcategory))
    }

    /// Display ordering: category then subcategory, locale-aware
    pub fn locale_cmp(&self, other: &Self) -> Ordering {
        locale_cmp(&self.category, &other.category)
            .then_with(|| locale_cmp(&self.subcategory, &other.subcategory))
    }
}

impl fmt::Display for SubcategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.subcategory)
    }
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        other => other.to_lowercase().next().unwrap_or(other),
    }
}

/// Compare two labels the way a reader expects them sorted
///
/// Case and common Latin accents are ignored for the primary comparison;
/// exact bytes break ties so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(fold_char)
        .cmp(b.chars().map(fold_char))
        .then_with(|| a.cmp(b))
}

/// Mapping from category name to its subcategory names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTree(BTreeMap<String, BTreeSet<String>>);

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category; returns false if it already existed
    pub fn add_category(&mut self, category: &str) -> bool {
        if self.0.contains_key(category) {
            return false;
        }
        self.0.insert(category.to_string(), BTreeSet::new());
        true
    }

    /// Add a subcategory, creating the category if needed; returns false if it already existed
    pub fn add_subcategory(&mut self, key: &SubcategoryKey) -> bool {
        self.0
            .entry(key.category.clone())
            .or_default()
            .insert(key.subcategory.clone())
    }

    /// Remove a subcategory, leaving its category in place
    pub fn remove_subcategory(&mut self, key: &SubcategoryKey) -> bool {
        self.0
            .get_mut(&key.category)
            .map(|subs| subs.remove(&key.subcategory))
            .unwrap_or(false)
    }

    /// Remove a subcategory and drop its category once it is empty
    ///
    /// Returns whether the category itself was removed.
    pub fn remove_subcategory_pruning(&mut self, key: &SubcategoryKey) -> bool {
        if !self.remove_subcategory(key) {
            return false;
        }
        let emptied = self
            .0
            .get(&key.category)
            .map(|subs| subs.is_empty())
            .unwrap_or(false);
        if emptied {
            self.0.remove(&key.category);
        }
        emptied
    }

    /// Remove a category with all its subcategories
    pub fn remove_category(&mut self, category: &str) -> Option<BTreeSet<String>> {
        self.0.remove(category)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn contains(&self, key: &SubcategoryKey) -> bool {
        self.0
            .get(&key.category)
            .map(|subs| subs.contains(&key.subcategory))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Category names sorted for display
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    /// Subcategory names of `category` sorted for display
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .0
            .get(category)
            .map(|subs| subs.iter().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    /// Every subcategory key, sorted for display
    pub fn keys(&self) -> Vec<SubcategoryKey> {
        let mut keys: Vec<SubcategoryKey> = self
            .0
            .iter()
            .flat_map(|(cat, subs)| subs.iter().map(move |sub| SubcategoryKey::new(cat, sub)))
            .collect();
        keys.sort_by(|a, b| a.locale_cmp(b));
        keys
    }
}

/// Validate a category or subcategory label
pub fn validate_label(kind: &str, name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(format!("{} name cannot be empty", kind));
    }
    if trimmed.contains('/') {
        return Err(format!("{} name cannot contain '/'", kind));
    }
    if trimmed.chars().count() > 50 {
        return Err(format!("{} name is too long (max 50 characters)", kind));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: &str, s: &str) -> SubcategoryKey {
        SubcategoryKey::new(c, s)
    }

    #[test]
    fn test_locale_cmp_ignores_case_and_accents() {
        assert_eq!(locale_cmp("árbol", "Arbol"), Ordering::Greater);
        assert_eq!(locale_cmp("Éxito", "fácil"), Ordering::Less);
        assert_eq!(locale_cmp("zapato", "Ñandú"), Ordering::Greater);

        let mut names = vec!["Ocio", "alquiler", "Éxtras", "Bancos"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["alquiler", "Bancos", "Éxtras", "Ocio"]);
    }

    #[test]
    fn test_add_and_contains() {
        let mut tree = CategoryTree::new();
        assert!(tree.add_subcategory(&key("Hogar", "Supermercado")));
        assert!(!tree.add_subcategory(&key("Hogar", "Supermercado")));
        assert!(tree.add_subcategory(&key("Ocio", "Supermercado")));

        assert!(tree.contains(&key("Hogar", "Supermercado")));
        assert!(tree.contains(&key("Ocio", "Supermercado")));
        assert!(!tree.contains(&key("Hogar", "Cine")));
        assert_eq!(tree.keys().len(), 2);
    }

    #[test]
    fn test_remove_pruning_drops_empty_category() {
        let mut tree = CategoryTree::new();
        tree.add_subcategory(&key("Viajes", "Vuelos"));
        tree.add_subcategory(&key("Viajes", "Hotel"));

        assert!(!tree.remove_subcategory_pruning(&key("Viajes", "Vuelos")));
        assert!(tree.has_category("Viajes"));
        assert!(tree.remove_subcategory_pruning(&key("Viajes", "Hotel")));
        assert!(!tree.has_category("Viajes"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(SubcategoryKey::parse("Hogar/Luz"), Some(key("Hogar", "Luz")));
        assert_eq!(SubcategoryKey::parse(" Hogar / Luz "), Some(key("Hogar", "Luz")));
        assert_eq!(SubcategoryKey::parse("Hogar"), None);
        assert_eq!(SubcategoryKey::parse("/Luz"), None);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut tree = CategoryTree::new();
        tree.add_subcategory(&key("Hogar", "Luz"));
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"Hogar":["Luz"]}"#);
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("Category", "Hogar").is_ok());
        assert!(validate_label("Category", "  ").is_err());
        assert!(validate_label("Subcategory", "a/b").is_err());
    }
}
