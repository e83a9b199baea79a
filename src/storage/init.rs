//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and empty
//! collection files.

use serde_json::Value;

use crate::config::paths::FinancePaths;
use crate::config::settings::default_settings;
use crate::error::FinanceError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are never overwritten.
pub fn initialize_storage(paths: &FinancePaths) -> Result<(), FinanceError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        write_json_atomic(paths.settings_file(), &default_settings())?;
        tracing::info!(path = %paths.settings_file().display(), "wrote default settings");
    }

    for file in [
        paths.transactions_file(),
        paths.budgets_file(),
        paths.goals_file(),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &Vec::<Value>::new())?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinancePaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.transactions_file().exists());
        assert!(paths.budgets_file().exists());
        assert!(paths.goals_file().exists());
    }

    #[test]
    fn test_default_settings_written() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.settings_file()).unwrap();
        let settings: Map<String, Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(settings["currency"], "EUR");
        assert_eq!(settings["categories"]["expense"][8], "Épargne");
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        write_json_atomic(paths.settings_file(), &json!({ "currency": "USD" })).unwrap();
        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.settings_file()).unwrap();
        let settings: Map<String, Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(settings["currency"], "USD");
        assert!(!settings.contains_key("locale"));
    }
}
