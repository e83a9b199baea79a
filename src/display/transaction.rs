//! Transaction display formatting
//!
//! Register-style tables and a detail view for single transactions.

use tabled::{settings::Style, Table, Tabled};

use crate::config::CurrencyFormat;
use crate::models::{Money, Transaction, TransactionKind};

use super::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &CurrencyFormat) -> Self {
        let signed = match txn.kind {
            TransactionKind::Income => txn.amount,
            TransactionKind::Expense => -txn.amount,
        };
        Self {
            id: txn.id.short(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: truncate(&txn.category, 20),
            amount: currency.format(signed),
            description: truncate(&txn.description, 30),
        }
    }
}

/// Format a list of transactions as a table, newest first as given
pub fn format_transaction_list(transactions: &[Transaction], currency: &CurrencyFormat) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<_> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, currency))
        .collect();

    let income: Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s)  income {}  expenses {}  net {}\n",
        transactions.len(),
        currency.format(income),
        currency.format(expenses),
        currency.format(income - expenses)
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", currency.format(txn.amount)));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}
