//! Budget Alerts
//!
//! Flags budgets whose current-month spending has reached 90% of the limit.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Budget, Money, Transaction};

/// Percentage at which a budget starts raising an alert
pub const ALERT_THRESHOLD: i64 = 90;

/// Percentage at which an alert becomes high severity
pub const HIGH_SEVERITY_THRESHOLD: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

impl AlertSeverity {
    fn for_percentage(percentage: i64) -> Self {
        if percentage >= HIGH_SEVERITY_THRESHOLD {
            Self::High
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A budget at or over the alert threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// Rounded share of the budget consumed, not capped
    pub percentage: i64,
    pub severity: AlertSeverity,
}

/// Check every budget against the month's expenses
///
/// Alerts follow budget order. Budgets with a non-positive amount cannot be
/// measured and are skipped.
pub fn detect(month_expenses: &[Transaction], budgets: &[Budget]) -> Vec<BudgetAlert> {
    let mut spent_by_category: HashMap<&str, Money> = HashMap::new();
    for txn in month_expenses.iter().filter(|t| t.is_expense()) {
        *spent_by_category.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    budgets
        .iter()
        .filter_map(|budget| {
            let spent = spent_by_category
                .get(budget.category.as_str())
                .copied()
                .unwrap_or_default();
            let Some(percentage) = spent.percent_of(budget.amount) else {
                tracing::warn!(
                    id = %budget.id,
                    category = %budget.category,
                    amount = %budget.amount,
                    "skipping budget with non-positive amount"
                );
                return None;
            };

            (percentage >= ALERT_THRESHOLD).then(|| BudgetAlert {
                category: budget.category.clone(),
                budget: budget.amount,
                spent,
                percentage,
                severity: AlertSeverity::for_percentage(percentage),
            })
        })
        .collect()
}

/// Format alerts for terminal display
pub fn format_terminal(alerts: &[BudgetAlert]) -> String {
    if alerts.is_empty() {
        return "No budget alerts this month.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<24} {:>12} {:>12} {:>7}\n",
        "Level", "Category", "Spent", "Budget", "%"
    ));
    output.push_str(&"-".repeat(67));
    output.push('\n');

    for alert in alerts {
        let level = match alert.severity {
            AlertSeverity::High => "HIGH",
            AlertSeverity::Medium => "MEDIUM",
        };
        output.push_str(&format!(
            "{:<8} {:<24} {:>12} {:>12} {:>6}%\n",
            level, alert.category, alert.spent, alert.budget, alert.percentage
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn expense(category: &str, units: i64) -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            category,
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )
    }

    #[test]
    fn test_medium_and_high_alerts() {
        let expenses = vec![expense("Logement", 900), expense("Loisirs", 120)];
        let budgets = vec![
            Budget::monthly("Logement", Money::from_units(1000)),
            Budget::monthly("Loisirs", Money::from_units(100)),
        ];

        let alerts = detect(&expenses, &budgets);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].category, "Logement");
        assert_eq!(alerts[0].percentage, 90);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);

        assert_eq!(alerts[1].category, "Loisirs");
        assert_eq!(alerts[1].percentage, 120);
        assert_eq!(alerts[1].severity, AlertSeverity::High);
    }

    #[test]
    fn test_below_threshold_and_unspent_budgets_are_quiet() {
        let expenses = vec![expense("Transport", 89)];
        let budgets = vec![
            Budget::monthly("Transport", Money::from_units(100)),
            Budget::monthly("Santé", Money::from_units(50)),
        ];

        assert!(detect(&expenses, &budgets).is_empty());
    }

    #[test]
    fn test_exactly_full_budget_is_high() {
        let expenses = vec![expense("Factures", 100)];
        let budgets = vec![Budget::monthly("Factures", Money::from_units(100))];

        let alerts = detect(&expenses, &budgets);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_income_is_ignored() {
        let mut salary = expense("Loisirs", 500);
        salary.kind = TransactionKind::Income;
        let budgets = vec![Budget::monthly("Loisirs", Money::from_units(100))];

        assert!(detect(&[salary], &budgets).is_empty());
    }

    #[test]
    fn test_non_positive_budget_skipped() {
        let mut broken = Budget::monthly("Divers", Money::from_units(10));
        broken.amount = Money::zero();

        assert!(detect(&[expense("Divers", 10)], &[broken]).is_empty());
    }

    #[test]
    fn test_serialized_severity() {
        let alerts = detect(
            &[expense("Loisirs", 95)],
            &[Budget::monthly("Loisirs", Money::from_units(100))],
        );
        let json = serde_json::to_value(&alerts[0]).unwrap();
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["percentage"], 95);
    }

    #[test]
    fn test_terminal_format() {
        let alerts = detect(
            &[expense("Loisirs", 120)],
            &[Budget::monthly("Loisirs", Money::from_units(100))],
        );
        let output = format_terminal(&alerts);
        assert!(output.contains("HIGH"));
        assert!(output.contains("120%"));
        assert!(format_terminal(&[]).contains("No budget alerts"));
    }
}
