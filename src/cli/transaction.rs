//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, TransactionKind, TransactionPatch};
use crate::services::{DateRange, TransactionQuery, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_optional_date, today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type (income or expense)
        kind: String,
        /// Category name
        category: String,
        /// Amount (e.g., "50.00" or "12,5"), always positive
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category name
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_kind(input: &str) -> FinanceResult<TransactionKind> {
    input.parse().map_err(|_| {
        FinanceError::Validation(format!(
            "Invalid transaction type: '{}'. Use income or expense",
            input
        ))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);
    let currency = storage.settings.currency_format()?;

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => today(),
            };

            let mut input = NewTransaction::new(kind, category, amount, date);
            if let Some(description) = description {
                input = input.with_description(description);
            }

            let txn = service.create(input)?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind);
            println!("  Category: {}", txn.category);
            println!("  Amount:   {}", currency.format(txn.amount));
            if !txn.description.is_empty() {
                println!("  Memo:     {}", txn.description);
            }
        }

        TransactionCommands::List {
            kind,
            category,
            from,
            to,
            limit,
        } => {
            let mut query = TransactionQuery::new();
            if let Some(kind) = kind {
                query = query.kind(parse_kind(&kind)?);
            }
            if let Some(category) = category {
                query = query.category(category);
            }

            let start = parse_optional_date(from)?;
            let end = parse_optional_date(to)?;
            if start.is_some() || end.is_some() {
                query = query.date_range(DateRange { start, end });
            }

            let mut transactions = service.list(&query)?;
            let total = transactions.len();
            transactions.truncate(limit);

            print!("{}", format_transaction_list(&transactions, &currency));
            if total > transactions.len() {
                println!("Showing {} of {} transactions", transactions.len(), total);
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            print!("{}", format_transaction_details(&txn, &currency));
        }

        TransactionCommands::Edit {
            id,
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            let patch = TransactionPatch {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                date: parse_optional_date(date)?,
            };

            if patch.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            service.update(txn.id, patch)?;
            if let Some(updated) = service.get(txn.id)? {
                println!("Updated transaction: {}", updated.id);
                println!("  Date:     {}", updated.date);
                println!("  Category: {}", updated.category);
                println!("  Amount:   {}", currency.format(updated.amount));
            }
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:     {}", txn.date);
                println!("  Category: {}", txn.category);
                println!("  Amount:   {}", currency.format(txn.amount));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted {} transaction: {} ({} {})",
                deleted,
                txn.id.short(),
                txn.category,
                currency.format(txn.amount)
            );
        }
    }

    Ok(())
}
