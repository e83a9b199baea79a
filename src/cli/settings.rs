//! Settings CLI commands

use clap::Subcommand;
use serde_json::{Map, Value};

use crate::display::settings::format_settings;
use crate::error::FinanceResult;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show every setting, defaults included
    Show,
    /// Print one setting as JSON
    Get {
        /// Setting key (e.g., "currency")
        key: String,
    },
    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// New value; parsed as JSON when possible, otherwise kept as text
        value: String,
    },
    /// List the configured income and expense categories
    Categories,
}

/// JSON literal if it parses as one, plain string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Handle a settings command
pub fn handle_settings_command(storage: &Storage, cmd: SettingsCommands) -> FinanceResult<()> {
    let settings = &storage.settings;

    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(&settings.get_all()?));
        }

        SettingsCommands::Get { key } => match settings.get(&key)? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => println!("'{}' is not set", key),
        },

        SettingsCommands::Set { key, value } => {
            let mut changes = Map::new();
            changes.insert(key.clone(), parse_value(&value));
            let current = settings.update(changes)?;
            if let Some(stored) = current.get(&key) {
                println!("{} = {}", key, stored);
            }
        }

        SettingsCommands::Categories => {
            let lists = settings.categories()?;
            println!("Income:   {}", lists.income.join(", "));
            println!("Expenses: {}", lists.expense.join(", "));
        }
    }

    Ok(())
}
