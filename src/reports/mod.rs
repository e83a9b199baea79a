//! Reports module for the finance tracker
//!
//! Provides the expenses-by-category report, budget alerts, saving towards
//! goals and goal projections, all computed by [`ReportEngine`].

pub mod alerts;
pub mod engine;
pub mod expenses;
pub mod ledger;
pub mod savings;

pub use alerts::{AlertSeverity, BudgetAlert};
pub use engine::ReportEngine;
pub use expenses::{CategoryExpense, ExpensesByCategoryReport};
pub use ledger::{BudgetLedger, GoalLedger, TransactionLedger};
pub use savings::{SavingsContribution, SAVINGS_CATEGORY};
