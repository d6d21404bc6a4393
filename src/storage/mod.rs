//! Storage layer for Hearth
//!
//! One JSON document per collection with atomic writes. The [`Storage`]
//! coordinator owns the repositories, writes the audit log and publishes a
//! fresh snapshot of a collection after each successful save.

pub mod document;
pub mod init;
pub mod file_io;
pub mod records;
pub mod transactions;

pub use document::DocumentRepository;
pub use file_io::{read_json, stage_json, write_json_atomic, StagedWrite};
pub use records::RecordRepository;
pub use transactions::TransactionRepository;

use std::sync::Arc;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::HearthPaths;
use crate::error::HearthResult;
use crate::models::{CategoryTree, PermanentBudgets, TemporaryBudgets};
use crate::sync::{Collection, LiveState, Snapshot, SnapshotHub, Subscription};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HearthPaths,
    pub transactions: TransactionRepository,
    pub categories: DocumentRepository<CategoryTree>,
    pub temp_categories: DocumentRepository<CategoryTree>,
    pub budgets: DocumentRepository<PermanentBudgets>,
    pub temp_budgets: DocumentRepository<TemporaryBudgets>,
    pub records: RecordRepository,
    audit: AuditLogger,
    hub: SnapshotHub,
}

impl Storage {
    /// Create a new Storage instance; nothing is read until [`load_all`](Self::load_all)
    pub fn new(paths: HearthPaths) -> HearthResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: DocumentRepository::new(paths.categories_file()),
            temp_categories: DocumentRepository::new(paths.temp_categories_file()),
            budgets: DocumentRepository::new(paths.budgets_file()),
            temp_budgets: DocumentRepository::new(paths.temp_budgets_file()),
            records: RecordRepository::new(paths.records_file()),
            audit: AuditLogger::new(paths.audit_log()),
            hub: SnapshotHub::new(),
            paths,
        })
    }

    pub fn paths(&self) -> &HearthPaths {
        &self.paths
    }

    /// Load all data from disk and publish every collection
    pub fn load_all(&self) -> HearthResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        self.temp_categories.load()?;
        self.budgets.load()?;
        self.temp_budgets.load()?;
        self.records.load()?;
        for collection in Collection::ALL {
            self.publish(collection)?;
        }
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> HearthResult<()> {
        for collection in Collection::ALL {
            self.save(collection)?;
        }
        Ok(())
    }

    /// Save one collection, then publish its new snapshot
    pub fn save(&self, collection: Collection) -> HearthResult<()> {
        self.commit(&[collection])
    }

    fn stage(&self, collection: Collection) -> HearthResult<StagedWrite> {
        match collection {
            Collection::Transactions => self.transactions.stage(),
            Collection::Categories => self.categories.stage(),
            Collection::TempCategories => self.temp_categories.stage(),
            Collection::Budgets => self.budgets.stage(),
            Collection::TempBudgets => self.temp_budgets.stage(),
            Collection::Records => self.records.stage(),
        }
    }

    /// Persist the collections a change touched
    ///
    /// Every collection is staged to a temp file before any document is
    /// replaced, so a failure while staging leaves all of them as they were.
    /// On any failure memory is reloaded from disk and the error returned.
    pub fn commit(&self, collections: &[Collection]) -> HearthResult<()> {
        let result = self.write_collections(collections);
        if let Err(e) = &result {
            if let Err(reload_err) = self.reload() {
                tracing::error!(error = %reload_err, "reload after failed save also failed");
            }
            tracing::error!(error = %e, "commit failed, change not applied");
        }
        result?;

        for collection in collections {
            self.publish(*collection)?;
        }
        Ok(())
    }

    fn write_collections(&self, collections: &[Collection]) -> HearthResult<()> {
        let mut staged = Vec::with_capacity(collections.len());
        for collection in collections {
            match self.stage(*collection) {
                Ok(write) => staged.push(write),
                Err(e) => {
                    tracing::error!(%collection, error = %e, "failed to stage collection");
                    return Err(e);
                }
            }
        }
        for write in staged {
            let path = write.path().display().to_string();
            write.publish().map_err(|e| {
                tracing::error!(%path, error = %e, "failed to replace document");
                e
            })?;
        }
        Ok(())
    }

    /// Discard in-memory changes by re-reading everything from disk
    pub fn reload(&self) -> HearthResult<()> {
        tracing::warn!("reloading store from disk");
        self.load_all()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Subscribe to snapshots published after this call
    pub fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    /// Current snapshot of one collection
    pub fn snapshot_of(&self, collection: Collection) -> HearthResult<Snapshot> {
        Ok(match collection {
            Collection::Transactions => Snapshot::Transactions(Arc::new(self.transactions.get_all()?)),
            Collection::Categories => Snapshot::Categories(Arc::new(self.categories.get()?)),
            Collection::TempCategories => {
                Snapshot::TempCategories(Arc::new(self.temp_categories.get()?))
            }
            Collection::Budgets => Snapshot::Budgets(Arc::new(self.budgets.get()?)),
            Collection::TempBudgets => Snapshot::TempBudgets(Arc::new(self.temp_budgets.get()?)),
            Collection::Records => Snapshot::Records(Arc::new(self.records.get_all()?)),
        })
    }

    /// A complete state built from what is currently in memory
    pub fn snapshot(&self) -> HearthResult<LiveState> {
        let mut state = LiveState::new();
        for collection in Collection::ALL {
            state.apply(self.snapshot_of(collection)?);
        }
        Ok(state)
    }

    fn publish(&self, collection: Collection) -> HearthResult<()> {
        self.hub.publish(self.snapshot_of(collection)?);
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Audit failures are logged and never undo a saved change
    fn write_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            tracing::warn!(error = %e, entity = %entry.entity_id, "failed to write audit entry");
        }
    }

    pub fn log_create<T: Serialize>(&self, entity_type: EntityType, id: impl Into<String>, entity: &T) {
        self.write_audit(AuditEntry::create(entity_type, id, entity));
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: impl Into<String>,
        before: &T,
        after: &T,
    ) {
        self.write_audit(AuditEntry::update(entity_type, id, before, after));
    }

    pub fn log_delete<T: Serialize>(&self, entity_type: EntityType, id: impl Into<String>, entity: &T) {
        self.write_audit(AuditEntry::delete(entity_type, id, entity));
    }
}
