//! Terminal User Interface module
//!
//! A PIN lock screen and a monthly summary built with ratatui. Screen and
//! modal state go through the reducer in [`state`]; the [`App`] runs the
//! effects it asks for and keeps a live copy of the data from storage
//! snapshots.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run_tui;
