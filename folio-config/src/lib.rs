//! Configuration system for the folio tab/session manager.
//!
//! This crate provides configuration loading, saving, and default values
//! for the tab session core. It includes:
//!
//! - Bounds for the MRU history and the closed-tab metadata cache
//! - The storage namespace prefix and data directory
//! - Log level selection for the debug log bridge

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
