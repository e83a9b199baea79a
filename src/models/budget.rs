//! Budget model
//!
//! A budget is a spending ceiling for one category over a recurring period.
//! One budget per category is expected but not enforced by storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::BudgetId;
use super::money::Money;

/// How often a budget ceiling resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetRecurrence {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetRecurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            other => Err(format!("Unknown budget period: {}", other)),
        }
    }
}

/// A spending ceiling for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    /// Category label matched against transaction categories
    pub category: String,

    /// Ceiling for one period
    pub amount: Money,

    #[serde(default)]
    pub period: BudgetRecurrence,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget with a fresh id
    pub fn new(category: impl Into<String>, amount: Money, period: BudgetRecurrence) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            period,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a monthly budget
    pub fn monthly(category: impl Into<String>, amount: Money) -> Self {
        Self::new(category, amount, BudgetRecurrence::Monthly)
    }

    /// Merge the set fields of a patch into this record
    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.category, self.amount, self.period)
    }
}

/// Input for creating a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub period: BudgetRecurrence,
}

impl NewBudget {
    pub fn monthly(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
            period: BudgetRecurrence::Monthly,
        }
    }

    pub fn into_budget(self) -> Budget {
        Budget::new(self.category.trim(), self.amount, self.period)
    }
}

/// Partial update of a budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetRecurrence>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none() && self.period.is_none()
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NonPositiveAmount(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::monthly("Logement", Money::from_units(1000));
        assert_eq!(budget.period, BudgetRecurrence::Monthly);
        assert!(budget.validate().is_ok());
        assert_eq!(budget.to_string(), "Logement: 1000.00 (monthly)");
    }

    #[test]
    fn test_validation() {
        let budget = Budget::monthly("Loisirs", Money::zero());
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveAmount(Money::zero()))
        );

        let budget = Budget::monthly("", Money::from_units(10));
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyCategory));
    }

    #[test]
    fn test_apply_patch() {
        let mut budget = Budget::monthly("Alimentation", Money::from_units(500));
        budget.apply(BudgetPatch {
            amount: Some(Money::from_units(600)),
            ..Default::default()
        });
        assert_eq!(budget.amount, Money::from_units(600));
        assert_eq!(budget.category, "Alimentation");
        assert_eq!(budget.period, BudgetRecurrence::Monthly);
    }

    #[test]
    fn test_period_defaults_to_monthly_on_the_wire() {
        let input: NewBudget =
            serde_json::from_str(r#"{"category":"Transport","amount":15000}"#).unwrap();
        assert_eq!(input.period, BudgetRecurrence::Monthly);
        assert_eq!(input.amount, Money::from_units(150));
    }

    #[test]
    fn test_recurrence_from_str() {
        assert_eq!("Weekly".parse::<BudgetRecurrence>(), Ok(BudgetRecurrence::Weekly));
        assert_eq!("annual".parse::<BudgetRecurrence>(), Ok(BudgetRecurrence::Yearly));
        assert!("daily".parse::<BudgetRecurrence>().is_err());
    }
}
