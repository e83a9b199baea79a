//! Goal CLI commands
//!
//! Goal management plus saving towards a goal and completion projections.

use clap::Subcommand;

use crate::display::goal::{format_goal_details, format_goal_list, format_projection};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalPatch, Money, NewGoal};
use crate::reports::ReportEngine;
use crate::services::{BudgetService, GoalService, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_optional_date};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List all goals with progress
    List,
    /// Show goal details
    Show {
        /// Goal ID or name
        goal: String,
    },
    /// Add a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Planned monthly contribution
        #[arg(short, long)]
        monthly: String,
        /// Amount already saved
        #[arg(short, long)]
        current: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
    },
    /// Edit a goal
    Edit {
        /// Goal ID or name
        goal: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
        /// New planned monthly contribution
        #[arg(short, long)]
        monthly: Option<String>,
        /// Overwrite the saved amount
        #[arg(short, long)]
        current: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,
    },
    /// Delete a goal
    Delete {
        /// Goal ID or name
        goal: String,
    },
    /// Add to a goal's saved amount without recording an expense
    Contribute {
        /// Goal ID or name
        goal: String,
        /// Amount to add
        amount: String,
    },
    /// Save towards a goal and record the matching savings expense
    Save {
        /// Goal ID or name
        goal: String,
        /// Amount to save
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Only update the goal, do not record an expense
        #[arg(long)]
        no_transaction: bool,
    },
    /// Project when a goal will be reached
    Projection {
        /// Goal ID or name
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(storage: &Storage, cmd: GoalCommands) -> FinanceResult<()> {
    let service = GoalService::new(storage);
    let currency = storage.settings.currency_format()?;

    let find = |identifier: &str| -> FinanceResult<Goal> {
        service
            .find(identifier)?
            .ok_or_else(|| FinanceError::goal_not_found(identifier))
    };

    match cmd {
        GoalCommands::List => {
            let goals = service.list()?;
            print!("{}", format_goal_list(&goals, &currency));
        }

        GoalCommands::Show { goal } => {
            let found = find(&goal)?;
            print!("{}", format_goal_details(&found, &currency));
        }

        GoalCommands::Add {
            name,
            target,
            monthly,
            current,
            deadline,
        } => {
            let mut input = NewGoal::new(name, parse_amount(&target)?, parse_amount(&monthly)?);
            if let Some(current) = current {
                input.current = parse_amount(&current)?;
            }
            input.target_date = parse_optional_date(deadline)?;

            let goal = service.create(input)?;
            println!(
                "Created goal: {} (target {}, {} per month) ({})",
                goal.name,
                currency.format(goal.target),
                currency.format(goal.monthly_contribution),
                goal.id.short()
            );
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            monthly,
            current,
            deadline,
            clear_deadline,
        } => {
            let found = find(&goal)?;

            let target_date = if clear_deadline {
                Some(None)
            } else {
                parse_optional_date(deadline)?.map(Some)
            };
            let patch = GoalPatch {
                name,
                target: target.as_deref().map(parse_amount).transpose()?,
                current: current.as_deref().map(parse_amount).transpose()?,
                target_date,
                monthly_contribution: monthly.as_deref().map(parse_amount).transpose()?,
            };
            if patch.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            service.update(found.id, patch)?;
            if let Some(updated) = service.get(found.id)? {
                print!("{}", format_goal_details(&updated, &currency));
            }
        }

        GoalCommands::Delete { goal } => {
            let found = find(&goal)?;
            service.delete(found.id)?;
            println!("Deleted goal: {}", found.name);
        }

        GoalCommands::Contribute { goal, amount } => {
            let found = find(&goal)?;
            let amount: Money = parse_amount(&amount)?;
            let updated = service.add_contribution(found.id, amount)?;
            println!(
                "Added {} to '{}' (now {} of {})",
                currency.format(amount),
                updated.name,
                currency.format(updated.current),
                currency.format(updated.target)
            );
        }

        GoalCommands::Save {
            goal,
            amount,
            date,
            no_transaction,
        } => {
            let found = find(&goal)?;
            let amount = parse_amount(&amount)?;
            let date = parse_optional_date(date)?;

            let transactions = TransactionService::new(storage);
            let budgets = BudgetService::new(storage);
            let engine = ReportEngine::new(&transactions, &budgets, &service);

            let saving = engine.save_to_goal(found.id, amount, date, !no_transaction)?;
            print!("{}", saving.format_terminal(&found.name));
        }

        GoalCommands::Projection { goal } => {
            let found = find(&goal)?;

            let transactions = TransactionService::new(storage);
            let budgets = BudgetService::new(storage);
            let engine = ReportEngine::new(&transactions, &budgets, &service);

            let projection = engine.goal_projection(found.id)?;
            print!("{}", format_projection(&found, &projection, &currency));
        }
    }

    Ok(())
}
