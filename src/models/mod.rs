//! Core data models for the finance tracker
//!
//! This module contains the records stored in the three collections
//! (transactions, budgets, goals) and the value types they share.

pub mod budget;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetPatch, BudgetRecurrence, BudgetValidationError, NewBudget};
pub use goal::{Goal, GoalPatch, GoalProjection, GoalValidationError, NewGoal};
pub use ids::{BudgetId, GoalId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{DateWindow, ReportPeriod};
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, TransactionPatch, TransactionValidationError,
};
