//! Read/write seams between the report engine and the record services
//!
//! The engine only sees these traits, so the storage-backed services can be
//! swapped for in-memory ledgers.

use crate::error::FinanceResult;
use crate::models::{Budget, Goal, GoalId, Money, NewTransaction, Transaction};
use crate::services::{BudgetService, GoalService, TransactionQuery, TransactionService};

/// Transaction operations needed for reporting
pub trait TransactionLedger {
    /// Transactions matching `query`, newest date first
    fn list_transactions(&self, query: &TransactionQuery) -> FinanceResult<Vec<Transaction>>;

    fn create_transaction(&self, input: NewTransaction) -> FinanceResult<Transaction>;
}

/// Budget operations needed for reporting
pub trait BudgetLedger {
    /// Every budget in insertion order
    fn list_budgets(&self) -> FinanceResult<Vec<Budget>>;
}

/// Goal operations needed for reporting
pub trait GoalLedger {
    fn get_goal(&self, id: GoalId) -> FinanceResult<Option<Goal>>;

    /// Add to a goal's saved amount; fails if the goal does not exist
    fn add_contribution(&self, id: GoalId, amount: Money) -> FinanceResult<Goal>;
}

impl TransactionLedger for TransactionService<'_> {
    fn list_transactions(&self, query: &TransactionQuery) -> FinanceResult<Vec<Transaction>> {
        self.list(query)
    }

    fn create_transaction(&self, input: NewTransaction) -> FinanceResult<Transaction> {
        self.create(input)
    }
}

impl BudgetLedger for BudgetService<'_> {
    fn list_budgets(&self) -> FinanceResult<Vec<Budget>> {
        self.list()
    }
}

impl GoalLedger for GoalService<'_> {
    fn get_goal(&self, id: GoalId) -> FinanceResult<Option<Goal>> {
        self.get(id)
    }

    fn add_contribution(&self, id: GoalId, amount: Money) -> FinanceResult<Goal> {
        GoalService::add_contribution(self, id, amount)
    }
}
