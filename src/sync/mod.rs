//! Live snapshots of the stored collections
//!
//! Each collection is published independently as an immutable `Arc`
//! snapshot. Consumers fold whatever has arrived into a [`LiveState`] and
//! compute from that; a collection that has not arrived yet reads as empty.

mod hub;
mod state;

pub use hub::{SnapshotHub, Subscription};
pub use state::LiveState;

use std::fmt;
use std::sync::Arc;

use crate::models::{CategoryTree, PermanentBudgets, Record, TemporaryBudgets, Transaction};

/// The independently published collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Categories,
    TempCategories,
    Budgets,
    TempBudgets,
    Records,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Transactions,
        Collection::Categories,
        Collection::TempCategories,
        Collection::Budgets,
        Collection::TempBudgets,
        Collection::Records,
    ];
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Transactions => "transactions",
            Collection::Categories => "categories",
            Collection::TempCategories => "temp_categories",
            Collection::Budgets => "budgets",
            Collection::TempBudgets => "temp_budgets",
            Collection::Records => "records",
        };
        f.write_str(name)
    }
}

/// One published version of one collection
#[derive(Debug, Clone)]
pub enum Snapshot {
    Transactions(Arc<Vec<Transaction>>),
    Categories(Arc<CategoryTree>),
    TempCategories(Arc<CategoryTree>),
    Budgets(Arc<PermanentBudgets>),
    TempBudgets(Arc<TemporaryBudgets>),
    Records(Arc<Vec<Record>>),
}

impl Snapshot {
    pub fn collection(&self) -> Collection {
        match self {
            Snapshot::Transactions(_) => Collection::Transactions,
            Snapshot::Categories(_) => Collection::Categories,
            Snapshot::TempCategories(_) => Collection::TempCategories,
            Snapshot::Budgets(_) => Collection::Budgets,
            Snapshot::TempBudgets(_) => Collection::TempBudgets,
            Snapshot::Records(_) => Collection::Records,
        }
    }
}
