//! Budget display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::config::CurrencyFormat;
use crate::models::Budget;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
}

/// Format budgets as a table in stored order
pub fn format_budget_list(budgets: &[Budget], currency: &CurrencyFormat) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.short(),
        category: b.category.clone(),
        amount: currency.format(b.amount),
        period: b.period.to_string(),
    });

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

pub fn format_budget_details(budget: &Budget, currency: &CurrencyFormat) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget:   {}\n", budget.id));
    output.push_str(&format!("Category: {}\n", budget.category));
    output.push_str(&format!("Amount:   {}\n", currency.format(budget.amount)));
    output.push_str(&format!("Period:   {}\n", budget.period));
    output.push_str(&format!(
        "Created:  {}\n",
        budget.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_budget_list() {
        let budgets = vec![
            Budget::monthly("Logement", Money::from_units(1000)),
            Budget::monthly("Loisirs", Money::from_units(100)),
        ];
        let output = format_budget_list(&budgets, &CurrencyFormat::default());

        assert!(output.contains("Logement"));
        assert!(output.contains("1 000,00 €"));
        assert!(output.contains("monthly"));
        assert!(output.contains(&budgets[0].id.short()));
    }

    #[test]
    fn test_empty_and_details() {
        assert_eq!(
            format_budget_list(&[], &CurrencyFormat::default()),
            "No budgets found.\n"
        );

        let budget = Budget::monthly("Transport", Money::from_units(80));
        let output = format_budget_details(&budget, &CurrencyFormat::default());
        assert!(output.contains("Category: Transport"));
        assert!(output.contains("Amount:   80,00 €"));
    }
}
