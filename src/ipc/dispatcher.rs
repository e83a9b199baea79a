//! Request routing for the relay
//!
//! Every request is handled to completion before the next one is read.
//! Failures are turned into error responses; nothing here panics on bad input.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::reports::ReportEngine;
use crate::services::{BudgetService, GoalService, TransactionService};
use crate::storage::Storage;

use super::message::{Request, Response};

/// Routes relay requests to the services and the report engine
pub struct Dispatcher<'a> {
    storage: &'a Storage,
    today: Option<NaiveDate>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            today: None,
        }
    }

    /// Pin the day used by reports instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Handle one decoded request
    pub fn handle(&self, request: Request) -> Response {
        let channel = request.channel();
        info!(channel, "relay request");

        match self.route(request) {
            Ok(data) => Response::success(data),
            Err(e) => {
                if e.is_not_found() || e.is_validation() {
                    tracing::warn!(channel, error = %e, "request rejected");
                } else {
                    tracing::error!(channel, error = %e, "request failed");
                }
                Response::from(&e)
            }
        }
    }

    /// Decode one JSON line, handle it and encode the response
    pub fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                tracing::warn!(error = %e, "undecodable relay request");
                Response::invalid_request(e.to_string())
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"ok":false,"error":{{"kind":"json","message":"{}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    /// Answer requests line by line until `reader` is exhausted
    ///
    /// Blank lines are ignored. Each response is flushed before the next
    /// request is read.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> FinanceResult<()> {
        let mut handled = 0usize;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            writeln!(writer, "{}", response)?;
            writer.flush()?;
            handled += 1;
        }

        info!(handled, "relay input closed");
        Ok(())
    }

    fn route(&self, request: Request) -> FinanceResult<Value> {
        let transactions = TransactionService::new(self.storage);
        let budgets = BudgetService::new(self.storage);
        let goals = GoalService::new(self.storage);

        match request {
            Request::GetTransactions(query) => {
                to_data(transactions.list(&query.unwrap_or_default())?)
            }
            Request::AddTransaction(input) => to_data(transactions.create(input)?),
            Request::UpdateTransaction { id, changes } => to_data(transactions.update(id, changes)?),
            Request::DeleteTransaction { id } => to_data(transactions.delete(id)?),

            Request::GetBudgets => to_data(budgets.list()?),
            Request::GetBudgetByCategory { category } => {
                to_data(budgets.get_by_category(&category)?)
            }
            Request::AddBudget(input) => to_data(budgets.create(input)?),
            Request::UpdateBudget { id, changes } => to_data(budgets.update(id, changes)?),
            Request::DeleteBudget { id } => to_data(budgets.delete(id)?),

            Request::GetGoals => to_data(goals.list()?),
            Request::GetGoalById { id } => to_data(goals.get(id)?),
            Request::AddGoal(input) => to_data(goals.create(input)?),
            Request::UpdateGoal { id, changes } => to_data(goals.update(id, changes)?),
            Request::DeleteGoal { id } => to_data(goals.delete(id)?),
            Request::AddToGoal { id, amount } => to_data(goals.add_contribution(id, amount)?),

            Request::GetSettings => to_data(self.storage.settings.get_all()?),
            Request::UpdateSettings(changes) => to_data(self.storage.settings.update(changes)?),
            Request::ResetData => to_data(self.storage.reset_all()?),

            Request::ExpensesReport { period } => {
                to_data(self.engine(&transactions, &budgets, &goals).expenses_by_category(&period)?)
            }
            Request::BudgetAlerts => {
                to_data(self.engine(&transactions, &budgets, &goals).budget_alerts()?)
            }
            Request::SaveToGoal(payload) => to_data(
                self.engine(&transactions, &budgets, &goals).save_to_goal(
                    payload.goal_id,
                    payload.amount,
                    payload.date,
                    payload.create_transaction,
                )?,
            ),
            Request::GoalProjection { id } => {
                to_data(self.engine(&transactions, &budgets, &goals).goal_projection(id)?)
            }
        }
    }

    fn engine<'s>(
        &self,
        transactions: &'s TransactionService<'a>,
        budgets: &'s BudgetService<'a>,
        goals: &'s GoalService<'a>,
    ) -> ReportEngine<'s> {
        let engine = ReportEngine::new(transactions, budgets, goals);
        match self.today {
            Some(today) => engine.with_today(today),
            None => engine,
        }
    }
}

fn to_data<T: Serialize>(value: T) -> FinanceResult<Value> {
    serde_json::to_value(value).map_err(FinanceError::from)
}
