//! Hearth - household budgeting for the terminal
//!
//! Hearth records income and expense transactions, tracks permanent and
//! time-bounded ("temporary") category budgets, computes monthly balances
//! and budget-versus-actual differentials, exports CSV reports and asks an
//! external advisor for narrative advice.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Transactions, category trees, budgets, months and records
//! - `storage`: JSON document storage with atomic writes
//! - `sync`: Snapshot publication and the live state the engine reads
//! - `services`: Period resolution, aggregation, differentials, cleaning
//!   and the validated write paths
//! - `audit`: Audit logging system
//! - `export`: Multi-section CSV report
//! - `advisor`: Advice prompt and response validation
//! - `crypto`: PIN gate
//! - `display`, `cli`, `tui`: Terminal front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth::config::{paths::HearthPaths, settings::Settings};
//! use hearth::services::monthly_overview;
//! use hearth::storage::Storage;
//!
//! let paths = HearthPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let overview = monthly_overview(&storage.snapshot()?, hearth::models::MonthRef::current());
//! ```

pub mod advisor;
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod sync;
pub mod tui;

pub use error::{HearthError, HearthResult};
