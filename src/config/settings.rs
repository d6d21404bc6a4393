//! User settings for Hearth
//!
//! Locale, export labels, bulk-delete batch size, the advisor command and
//! the PIN hash.

use serde::{Deserialize, Serialize};

use super::paths::HearthPaths;
use crate::error::HearthError;
use crate::models::{NumberLocale, TransactionKind};

/// Largest number of deletes the store accepts in one write batch
pub const MAX_DELETE_BATCH: usize = 500;

/// User settings for Hearth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number formatting for amounts
    #[serde(default)]
    pub locale: NumberLocale,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Label for income in reports
    #[serde(default = "default_income_label")]
    pub income_label: String,

    /// Label for expenses in reports
    #[serde(default = "default_expense_label")]
    pub expense_label: String,

    /// Transactions deleted per batch by the smart cleaner
    #[serde(default = "default_delete_batch_size")]
    pub delete_batch_size: usize,

    /// Span of the "trailing years" CSV export
    #[serde(default = "default_export_trailing_years")]
    pub export_trailing_years: u32,

    /// Shell command that answers advice prompts (prompt on stdin, JSON on stdout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_command: Option<String>,

    /// Argon2 PHC hash of the 4-digit PIN, if one is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_income_label() -> String {
    "Ingreso".to_string()
}

fn default_expense_label() -> String {
    "Gasto".to_string()
}

fn default_delete_batch_size() -> usize {
    MAX_DELETE_BATCH
}

fn default_export_trailing_years() -> u32 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: NumberLocale::default(),
            currency_symbol: default_currency(),
            income_label: default_income_label(),
            expense_label: default_expense_label(),
            delete_batch_size: default_delete_batch_size(),
            export_trailing_years: default_export_trailing_years(),
            advisor_command: None,
            pin_hash: None,
        }
    }
}

impl Settings {
    /// Localized label for a transaction kind
    pub fn kind_label(&self, kind: TransactionKind) -> &str {
        match kind {
            TransactionKind::Income => &self.income_label,
            TransactionKind::Expense => &self.expense_label,
        }
    }

    /// Batch size clamped to what the store accepts
    pub fn effective_batch_size(&self) -> usize {
        self.delete_batch_size.clamp(1, MAX_DELETE_BATCH)
    }

    pub fn has_pin(&self) -> bool {
        self.pin_hash.is_some()
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &HearthPaths) -> Result<Self, HearthError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| HearthError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                HearthError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HearthPaths) -> Result<(), HearthError> {
        paths.ensure_directories()?;
        crate::storage::write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.locale, NumberLocale::Es);
        assert_eq!(settings.kind_label(TransactionKind::Expense), "Gasto");
        assert_eq!(settings.delete_batch_size, 500);
        assert!(!settings.has_pin());
    }

    #[test]
    fn test_batch_size_is_clamped() {
        let mut settings = Settings::default();
        settings.delete_batch_size = 10_000;
        assert_eq!(settings.effective_batch_size(), MAX_DELETE_BATCH);
        settings.delete_batch_size = 0;
        assert_eq!(settings.effective_batch_size(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.locale = NumberLocale::En;
        settings.income_label = "Income".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.locale, NumberLocale::En);
        assert_eq!(loaded.income_label, "Income");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale":"en"}"#).unwrap();
        assert_eq!(settings.locale, NumberLocale::En);
        assert_eq!(settings.export_trailing_years, 5);
    }
}
