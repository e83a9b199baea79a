//! Report engine
//!
//! Derived views over the three record collections: expenses by category,
//! budget alerts, saving towards a goal and goal projections.

use chrono::{Local, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    DateWindow, GoalId, GoalProjection, Money, NewTransaction, ReportPeriod, TransactionKind,
};
use crate::services::{DateRange, TransactionQuery};

use super::alerts::{self, BudgetAlert};
use super::expenses::ExpensesByCategoryReport;
use super::ledger::{BudgetLedger, GoalLedger, TransactionLedger};
use super::savings::{savings_description, SavingsContribution, SAVINGS_CATEGORY};

/// Computes reports over injected ledgers
pub struct ReportEngine<'a> {
    transactions: &'a dyn TransactionLedger,
    budgets: &'a dyn BudgetLedger,
    goals: &'a dyn GoalLedger,
    today: Option<NaiveDate>,
}

impl<'a> ReportEngine<'a> {
    pub fn new(
        transactions: &'a dyn TransactionLedger,
        budgets: &'a dyn BudgetLedger,
        goals: &'a dyn GoalLedger,
    ) -> Self {
        Self {
            transactions,
            budgets,
            goals,
            today: None,
        }
    }

    /// Pin the current day instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Expenses per category for the current `"month"` or `"year"`
    ///
    /// Any other period fails before a single record is read.
    pub fn expenses_by_category(&self, period: &str) -> FinanceResult<ExpensesByCategoryReport> {
        let period: ReportPeriod = period.parse()?;
        let window = period.window(self.today());

        let expenses = self.expenses_in(window)?;
        let budgets = self.budgets.list_budgets()?;

        let report = ExpensesByCategoryReport::build(period, window, &expenses, &budgets);
        tracing::debug!(
            %period,
            window = %window,
            categories = report.categories.len(),
            "expenses report generated"
        );
        Ok(report)
    }

    /// Budgets at or above 90% of their limit this month
    pub fn budget_alerts(&self) -> FinanceResult<Vec<BudgetAlert>> {
        let window = DateWindow::month_of(self.today());
        let budgets = self.budgets.list_budgets()?;
        let expenses = self.expenses_in(window)?;

        let alerts = alerts::detect(&expenses, &budgets);
        tracing::debug!(budgets = budgets.len(), alerts = alerts.len(), "budget alerts checked");
        Ok(alerts)
    }

    /// Contribute to a goal and, if asked, record the matching expense
    ///
    /// The expense is dated `date`, or today when absent. A missing goal
    /// fails before anything is written. The two writes are not atomic: if
    /// recording the expense fails, the contribution stays and the error is
    /// returned.
    pub fn save_to_goal(
        &self,
        goal_id: GoalId,
        amount: Money,
        date: Option<NaiveDate>,
        create_transaction: bool,
    ) -> FinanceResult<SavingsContribution> {
        let goal = self
            .goals
            .get_goal(goal_id)?
            .ok_or_else(|| FinanceError::goal_not_found(goal_id.to_string()))?;

        if create_transaction && !amount.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Savings amount must be positive to record an expense, got {}",
                amount
            )));
        }
        let new_total = goal.current.checked_add(amount).ok_or_else(|| {
            FinanceError::Validation(format!(
                "Contribution of {} exceeds the largest storable amount",
                amount
            ))
        })?;

        self.goals.add_contribution(goal_id, amount)?;

        if create_transaction {
            let input = NewTransaction::expense(
                SAVINGS_CATEGORY,
                amount,
                date.unwrap_or_else(|| self.today()),
            )
            .with_description(savings_description(&goal.name));

            if let Err(e) = self.transactions.create_transaction(input) {
                tracing::error!(
                    goal_id = %goal_id,
                    amount = %amount,
                    error = %e,
                    "contribution saved but the savings expense could not be recorded"
                );
                return Err(e);
            }
        }

        let saving = SavingsContribution {
            goal_id,
            amount,
            new_total,
            transaction_created: create_transaction,
        };
        tracing::info!(
            goal_id = %goal_id,
            amount = %amount,
            new_total = %saving.new_total,
            transaction_created = create_transaction,
            "saved towards goal"
        );
        Ok(saving)
    }

    /// Progress and estimated completion of a goal as of today
    pub fn goal_projection(&self, goal_id: GoalId) -> FinanceResult<GoalProjection> {
        let goal = self
            .goals
            .get_goal(goal_id)?
            .ok_or_else(|| FinanceError::goal_not_found(goal_id.to_string()))?;

        GoalProjection::for_goal(&goal, self.today())
            .map_err(|e| FinanceError::Validation(e.to_string()))
    }

    fn expenses_in(&self, window: DateWindow) -> FinanceResult<Vec<crate::models::Transaction>> {
        let query = TransactionQuery::new()
            .kind(TransactionKind::Expense)
            .date_range(DateRange::between(window.start_date, window.end_date));
        self.transactions.list_transactions(&query)
    }
}
