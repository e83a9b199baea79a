//! Budget CLI commands

use clap::Subcommand;

use crate::display::budget::{format_budget_details, format_budget_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetPatch, BudgetRecurrence, NewBudget};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List all budgets
    List,
    /// Show budget details
    Show {
        /// Budget ID or category name
        budget: String,
    },
    /// Add a budget for a category
    Add {
        /// Category name
        category: String,
        /// Spending limit (e.g., "400" or "99,90")
        amount: String,
        /// Recurrence (weekly, monthly, yearly)
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },
    /// Edit a budget
    Edit {
        /// Budget ID or category name
        budget: String,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New spending limit
        #[arg(short, long)]
        amount: Option<String>,
        /// New recurrence
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },
}

fn parse_period(input: &str) -> FinanceResult<BudgetRecurrence> {
    input.parse().map_err(|_| {
        FinanceError::Validation(format!(
            "Invalid budget period: '{}'. Use weekly, monthly or yearly",
            input
        ))
    })
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> FinanceResult<()> {
    let service = BudgetService::new(storage);
    let currency = storage.settings.currency_format()?;

    match cmd {
        BudgetCommands::List => {
            let budgets = service.list()?;
            print!("{}", format_budget_list(&budgets, &currency));
        }

        BudgetCommands::Show { budget } => {
            let found = service
                .find(&budget)?
                .ok_or_else(|| FinanceError::budget_not_found(&budget))?;
            print!("{}", format_budget_details(&found, &currency));
        }

        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let input = NewBudget {
                category,
                amount: parse_amount(&amount)?,
                period: parse_period(&period)?,
            };
            let budget = service.create(input)?;
            println!(
                "Created budget: {} {} per {} ({})",
                budget.category,
                currency.format(budget.amount),
                budget.period,
                budget.id.short()
            );
        }

        BudgetCommands::Edit {
            budget,
            category,
            amount,
            period,
        } => {
            let found = service
                .find(&budget)?
                .ok_or_else(|| FinanceError::budget_not_found(&budget))?;

            let patch = BudgetPatch {
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                period: period.as_deref().map(parse_period).transpose()?,
            };
            if patch.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            service.update(found.id, patch)?;
            if let Some(updated) = service.get(found.id)? {
                print!("{}", format_budget_details(&updated, &currency));
            }
        }

        BudgetCommands::Delete { budget } => {
            let found = service
                .find(&budget)?
                .ok_or_else(|| FinanceError::budget_not_found(&budget))?;
            service.delete(found.id)?;
            println!("Deleted budget: {}", found.category);
        }
    }

    Ok(())
}
