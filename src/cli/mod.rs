//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod goal;
pub mod report;
pub mod settings;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Parse a user-entered amount such as `42`, `12,50` or `€9.99`
pub(crate) fn parse_amount(input: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00' or '12,5'. Error: {}",
            input, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

pub(crate) fn parse_optional_date(input: Option<String>) -> FinanceResult<Option<NaiveDate>> {
    input.as_deref().map(parse_date).transpose()
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
