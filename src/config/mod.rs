//! Configuration module for the finance tracker
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Key-value user settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::{CategoryLists, CurrencyFormat, SettingsStore};
