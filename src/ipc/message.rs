//! Wire messages for the request/response relay
//!
//! A request is `{"channel": "<name>", "payload": ...}`; the payload is
//! omitted for channels that take no arguments. A response is either
//! `{"ok": true, "data": ...}` or
//! `{"ok": false, "error": {"kind": "...", "message": "..."}}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FinanceError;
use crate::models::{
    BudgetId, BudgetPatch, GoalId, GoalPatch, Money, NewBudget, NewGoal, NewTransaction,
    TransactionId, TransactionPatch,
};
use crate::services::TransactionQuery;

/// Error kind for requests that could not be decoded
pub const INVALID_REQUEST: &str = "invalid_request";

/// One relay request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum Request {
    GetTransactions(Option<TransactionQuery>),
    AddTransaction(NewTransaction),
    UpdateTransaction {
        id: TransactionId,
        changes: TransactionPatch,
    },
    DeleteTransaction {
        id: TransactionId,
    },

    GetBudgets,
    GetBudgetByCategory {
        category: String,
    },
    AddBudget(NewBudget),
    UpdateBudget {
        id: BudgetId,
        changes: BudgetPatch,
    },
    DeleteBudget {
        id: BudgetId,
    },

    GetGoals,
    GetGoalById {
        id: GoalId,
    },
    AddGoal(NewGoal),
    UpdateGoal {
        id: GoalId,
        changes: GoalPatch,
    },
    DeleteGoal {
        id: GoalId,
    },
    AddToGoal {
        id: GoalId,
        amount: Money,
    },

    GetSettings,
    UpdateSettings(Map<String, Value>),
    ResetData,

    ExpensesReport {
        period: String,
    },
    BudgetAlerts,
    SaveToGoal(SaveToGoal),
    GoalProjection {
        id: GoalId,
    },
}

impl Request {
    /// Channel name as it appears on the wire
    pub fn channel(&self) -> &'static str {
        match self {
            Self::GetTransactions(_) => "get-transactions",
            Self::AddTransaction(_) => "add-transaction",
            Self::UpdateTransaction { .. } => "update-transaction",
            Self::DeleteTransaction { .. } => "delete-transaction",
            Self::GetBudgets => "get-budgets",
            Self::GetBudgetByCategory { .. } => "get-budget-by-category",
            Self::AddBudget(_) => "add-budget",
            Self::UpdateBudget { .. } => "update-budget",
            Self::DeleteBudget { .. } => "delete-budget",
            Self::GetGoals => "get-goals",
            Self::GetGoalById { .. } => "get-goal-by-id",
            Self::AddGoal(_) => "add-goal",
            Self::UpdateGoal { .. } => "update-goal",
            Self::DeleteGoal { .. } => "delete-goal",
            Self::AddToGoal { .. } => "add-to-goal",
            Self::GetSettings => "get-settings",
            Self::UpdateSettings(_) => "update-settings",
            Self::ResetData => "reset-data",
            Self::ExpensesReport { .. } => "expenses-report",
            Self::BudgetAlerts => "budget-alerts",
            Self::SaveToGoal(_) => "save-to-goal",
            Self::GoalProjection { .. } => "goal-projection",
        }
    }
}

/// Payload of the `save-to-goal` channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveToGoal {
    pub goal_id: GoalId,
    pub amount: Money,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_create_transaction")]
    pub create_transaction: bool,
}

fn default_create_transaction() -> bool {
    true
}

/// Failure description carried by an unsuccessful response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// One relay response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                kind: kind.into(),
                message: message.into(),
            }),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::failure(INVALID_REQUEST, message)
    }

    /// Kind of the carried error, if any
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }
}

impl From<&FinanceError> for Response {
    fn from(err: &FinanceError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_channel_without_payload() {
        let request: Request = serde_json::from_str(r#"{"channel":"get-budgets"}"#).unwrap();
        assert_eq!(request, Request::GetBudgets);
    }

    #[test]
    fn test_optional_payload() {
        let request: Request =
            serde_json::from_str(r#"{"channel":"get-transactions"}"#).unwrap();
        assert_eq!(request, Request::GetTransactions(None));

        let request: Request = serde_json::from_value(json!({
            "channel": "get-transactions",
            "payload": { "type": "expense", "dateRange": { "start": "2025-03-01" } }
        }))
        .unwrap();
        let Request::GetTransactions(Some(query)) = request else {
            panic!("expected a query");
        };
        assert!(query.kind.is_some());
        assert!(query.date_range.unwrap().end.is_none());
    }

    #[test]
    fn test_save_to_goal_defaults_to_recording_expense() {
        let goal_id = GoalId::new();
        let request: Request = serde_json::from_value(json!({
            "channel": "save-to-goal",
            "payload": { "goalId": goal_id, "amount": 50000 }
        }))
        .unwrap();

        let Request::SaveToGoal(payload) = request else {
            panic!("expected save-to-goal");
        };
        assert!(payload.create_transaction);
        assert_eq!(payload.amount, Money::from_units(500));
        assert!(payload.date.is_none());
    }

    #[test]
    fn test_channel_names_round_trip() {
        let request = Request::DeleteGoal { id: GoalId::new() };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["channel"], request.channel());
    }

    #[test]
    fn test_unknown_channel_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"channel":"drop-tables"}"#).is_err());
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(Response::success(json!(1))).unwrap();
        assert_eq!(ok, json!({ "ok": true, "data": 1 }));

        let err = Response::from(&FinanceError::goal_not_found("abc"));
        assert_eq!(err.error_kind(), Some("not_found"));
        let err = serde_json::to_value(err).unwrap();
        assert_eq!(err["ok"], false);
        assert!(err.get("data").is_none());
        assert_eq!(err["error"]["message"], "Goal not found: abc");
    }
}
