//! Saving towards a goal
//!
//! A saving is a goal contribution optionally mirrored by an expense in the
//! reserved savings category, so the money leaves the monthly spending view.

use serde::{Deserialize, Serialize};

use crate::models::{GoalId, Money};

/// Expense category used for money moved into a goal
pub const SAVINGS_CATEGORY: &str = "Épargne";

/// Description of the expense recorded for a saving
pub fn savings_description(goal_name: &str) -> String {
    format!("Épargne pour: {}", goal_name)
}

/// Outcome of saving towards a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsContribution {
    pub goal_id: GoalId,
    pub amount: Money,
    /// Saved amount after the contribution
    pub new_total: Money,
    pub transaction_created: bool,
}

impl SavingsContribution {
    pub fn format_terminal(&self, goal_name: &str) -> String {
        let mut output = format!(
            "Saved {} towards '{}' (now {})\n",
            self.amount, goal_name, self.new_total
        );
        if self.transaction_created {
            output.push_str(&format!(
                "Recorded an expense in '{}'\n",
                SAVINGS_CATEGORY
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description() {
        assert_eq!(savings_description("Vacances"), "Épargne pour: Vacances");
    }

    #[test]
    fn test_serialized_shape() {
        let saving = SavingsContribution {
            goal_id: GoalId::new(),
            amount: Money::from_units(500),
            new_total: Money::from_units(1500),
            transaction_created: true,
        };
        let json = serde_json::to_value(&saving).unwrap();
        assert_eq!(json["newTotal"], 150000);
        assert_eq!(json["transactionCreated"], true);
        assert!(saving.format_terminal("Vacances").contains("Épargne"));
    }
}
