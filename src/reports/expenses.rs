//! Expenses by Category Report
//!
//! Sums expenses per category over a month or year window and compares each
//! category with its budget.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, DateWindow, Money, ReportPeriod, Transaction};

/// Spending against budget for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category: String,
    pub spent: Money,
    /// Zero when no budget exists for the category
    pub budget: Money,
    /// Budget left, never negative
    pub remaining: Money,
    /// Rounded share of the budget consumed, capped at 100
    pub percentage: i64,
}

impl CategoryExpense {
    fn new(category: String, spent: Money, budget: Money) -> Self {
        let percentage = spent.percent_of(budget).map_or(100, |p| p.min(100));
        Self {
            category,
            spent,
            budget,
            remaining: (budget - spent).max_zero(),
            percentage,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

/// Expenses by category over a reporting window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesByCategoryReport {
    pub period: ReportPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: Vec<CategoryExpense>,
}

impl ExpensesByCategoryReport {
    /// Build the report from the window's expenses (newest first) and all budgets
    ///
    /// Categories appear in the order they are first met in `expenses`.
    /// Categories with a budget but no spending are left out.
    pub fn build(
        period: ReportPeriod,
        window: DateWindow,
        expenses: &[Transaction],
        budgets: &[Budget],
    ) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut spent: HashMap<&str, Money> = HashMap::new();
        for txn in expenses.iter().filter(|t| t.is_expense()) {
            let total = spent.entry(txn.category.as_str()).or_insert_with(|| {
                order.push(txn.category.as_str());
                Money::zero()
            });
            *total += txn.amount;
        }

        let limits = first_budget_per_category(budgets);

        let categories = order
            .into_iter()
            .map(|category| {
                CategoryExpense::new(
                    category.to_string(),
                    spent.get(category).copied().unwrap_or_default(),
                    limits.get(category).copied().unwrap_or_default(),
                )
            })
            .collect();

        Self {
            period,
            start_date: window.start_date,
            end_date: window.end_date,
            categories,
        }
    }

    pub fn total_spent(&self) -> Money {
        self.categories.iter().map(|c| c.spent).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Expenses by Category ({}): {} to {}\n",
            self.period, self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>7}\n",
            "Category", "Spent", "Budget", "Remaining", "%"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.categories {
            let marker = if row.is_over_budget() { " !" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>6}%{}\n",
                row.category, row.spent, row.budget, row.remaining, row.percentage, marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!("{:<24} {:>12}\n", "TOTAL", self.total_spent()));

        output
    }
}

/// Budget amount per category, keeping the first budget seen
pub(crate) fn first_budget_per_category(budgets: &[Budget]) -> HashMap<&str, Money> {
    let mut limits = HashMap::new();
    for budget in budgets {
        limits.entry(budget.category.as_str()).or_insert(budget.amount);
    }
    limits
}
