//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    Category,
    Subcategory,
    PermanentBudget,
    TemporaryPeriod,
    Record,
    Settings,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Transaction => "Transaction",
            EntityType::Category => "Category",
            EntityType::Subcategory => "Subcategory",
            EntityType::PermanentBudget => "PermanentBudget",
            EntityType::TemporaryPeriod => "TemporaryPeriod",
            EntityType::Record => "Record",
            EntityType::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// A single audit log entry
///
/// `before` is set for updates and deletes, `after` for creates and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable field changes, updates only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn build(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            before,
            after,
            diff_summary,
        }
    }

    pub fn create<T: Serialize>(entity_type: EntityType, entity_id: impl Into<String>, entity: &T) -> Self {
        Self::build(
            Operation::Create,
            entity_type,
            entity_id,
            None,
            serde_json::to_value(entity).ok(),
        )
    }

    /// Update entry; the diff summary is derived from the two states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self::build(
            Operation::Update,
            entity_type,
            entity_id,
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
        )
    }

    pub fn delete<T: Serialize>(entity_type: EntityType, entity_id: impl Into<String>, entity: &T) -> Self {
        Self::build(
            Operation::Delete,
            entity_type,
            entity_id,
            serde_json::to_value(entity).ok(),
            None,
        )
    }

    /// One-line rendering for `hearth audit`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Subcategory,
            "Hogar/Supermercado",
            &json!({"category": "Hogar", "subcategory": "Supermercado"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_update_entry_derives_diff() {
        let entry = AuditEntry::update(
            EntityType::PermanentBudget,
            "Hogar/Luz",
            &json!({"amount": 30000}),
            &json!({"amount": 35000}),
        );

        assert_eq!(entry.diff_summary.as_deref(), Some("amount: 30000 -> 35000"));
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        let entry = AuditEntry::delete(EntityType::TemporaryPeriod, "Ocio/Viaje#0", &json!({}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"temporary_period\""));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.entity_type, EntityType::TemporaryPeriod);
        assert!(back.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Record,
            "rec-1234abcd",
            &json!({"name": "Viaje"}),
            &json!({"name": "Vacaciones"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Record rec-1234abcd"));
        assert!(formatted.contains("Changes: name"));
    }
}
