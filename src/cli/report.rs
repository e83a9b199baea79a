//! CLI commands for reports
//!
//! Expenses by category and budget alerts, as text or JSON.

use clap::Subcommand;

use crate::error::FinanceResult;
use crate::reports::{alerts, ReportEngine};
use crate::services::{BudgetService, GoalService, TransactionService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expenses per category against their budgets
    #[command(alias = "spending")]
    Expenses {
        /// Reporting period ("month" or "year")
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Budgets at or above 90% of their limit this month
    Alerts {
        /// Print the alerts as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> FinanceResult<()> {
    let transactions = TransactionService::new(storage);
    let budgets = BudgetService::new(storage);
    let goals = GoalService::new(storage);
    let engine = ReportEngine::new(&transactions, &budgets, &goals);

    match cmd {
        ReportCommands::Expenses { period, json } => {
            let report = engine.expenses_by_category(&period)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Alerts { json } => {
            let found = engine.budget_alerts()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                print!("{}", alerts::format_terminal(&found));
            }
        }
    }

    Ok(())
}
