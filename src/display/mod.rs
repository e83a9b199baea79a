//! Display formatting for terminal output
//!
//! Provides utilities for formatting records as tables and detail views.
//! Amounts are rendered with the user's configured currency.

pub mod budget;
pub mod goal;
pub mod settings;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list};
pub use goal::{format_goal_details, format_goal_list, format_projection, progress_bar};
pub use settings::format_settings;
pub use transaction::{format_transaction_details, format_transaction_list};

/// Shorten `text` to at most `max` characters, marking the cut with `…`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
