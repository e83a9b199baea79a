//! Storage layer for the finance tracker
//!
//! Provides JSON document collections with atomic writes and automatic
//! directory creation.

pub mod collection;
pub mod file_io;
pub mod init;

pub use collection::{Collection, Document};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::config::paths::FinancePaths;
use crate::config::settings::SettingsStore;
use crate::error::FinanceError;
use crate::models::{Budget, Goal, Transaction};

/// Owns every collection plus the settings store
pub struct Storage {
    paths: FinancePaths,
    pub transactions: Collection<Transaction>,
    pub budgets: Collection<Budget>,
    pub goals: Collection<Goal>,
    pub settings: SettingsStore,
}

impl Storage {
    /// Create storage for `paths` without reading anything yet
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: Collection::new(paths.transactions_file()),
            budgets: Collection::new(paths.budgets_file()),
            goals: Collection::new(paths.goals_file()),
            settings: SettingsStore::new(paths.settings_file()),
            paths,
        })
    }

    /// Create storage and load all data once
    pub fn open(paths: FinancePaths) -> Result<Self, FinanceError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        tracing::debug!(base_dir = %storage.paths.base_dir().display(), "storage opened");
        Ok(storage)
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        self.settings.load()?;
        Ok(())
    }

    /// Clear every collection and the settings
    pub fn reset_all(&self) -> Result<bool, FinanceError> {
        let transactions = self.transactions.clear()?;
        let budgets = self.budgets.clear()?;
        let goals = self.goals.clear()?;
        self.settings.clear()?;
        tracing::warn!(transactions, budgets, goals, "all data reset");
        Ok(true)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::open(paths).unwrap();

        storage
            .budgets
            .insert(Budget::monthly("Logement", Money::from_units(1000)))
            .unwrap();
        storage
            .goals
            .insert(Goal::new("Vacances", Money::from_units(100), Money::from_units(5)))
            .unwrap();

        assert!(storage.reset_all().unwrap());
        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert_eq!(storage.goals.count().unwrap(), 0);
        assert!(storage.settings.is_empty().unwrap());
        assert_eq!(storage.settings.currency().unwrap(), "EUR");
    }
}
