//! Service layer for Hearth
//!
//! The pure engine (period resolution, aggregation, differentials and
//! clean planning) works on a [`LiveState`](crate::sync::LiveState)
//! snapshot. The services on top validate input, write through the
//! storage layer and record every change in the audit log.

pub mod aggregation;
pub mod budget;
pub mod category;
pub mod cleaner;
pub mod period;
pub mod record;
pub mod transaction;

pub use aggregation::{aggregate_spending, filter_window, total_by_kind, KindTotals};
pub use budget::{budgeted_for, meaningful, monthly_overview, MonthlyOverview};
pub use category::CategoryService;
pub use cleaner::{plan_clean, CleanPlan, CleanReport, CleanerService};
pub use period::{first_intersecting, resolve_period};
pub use record::RecordService;
pub use transaction::{CreateTransactionInput, TransactionService, TransactionUpdate};
