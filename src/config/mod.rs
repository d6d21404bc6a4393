//! Configuration module for Hearth
//!
//! - Path resolution for the data directory
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HearthPaths;
pub use settings::Settings;
