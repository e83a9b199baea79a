//! Budget service
//!
//! Budgets are spending limits attached to a category by name. Category
//! uniqueness is not enforced: a duplicate is stored and reported in the log.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetId, BudgetPatch, NewBudget};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All budgets in insertion order
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets.all()
    }

    pub fn get(&self, id: BudgetId) -> FinanceResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by full or short ID, then by category name
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Budget>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<BudgetId>() {
            if let Some(budget) = self.get(id)? {
                return Ok(Some(budget));
            }
        }
        if let Some(budget) = self.storage.budgets.find_one(|b| b.id.short() == identifier)? {
            return Ok(Some(budget));
        }
        self.get_by_category(identifier)
    }

    /// First budget attached to `category`
    pub fn get_by_category(&self, category: &str) -> FinanceResult<Option<Budget>> {
        self.storage.budgets.find_one(|b| b.category == category)
    }

    /// Create a new budget
    pub fn create(&self, input: NewBudget) -> FinanceResult<Budget> {
        let budget = input.into_budget();
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        if self.get_by_category(&budget.category)?.is_some() {
            tracing::warn!(
                category = %budget.category,
                "a budget already exists for this category; reports use the first one"
            );
        }

        let budget = self.storage.budgets.insert(budget)?;
        tracing::info!(
            id = %budget.id,
            category = %budget.category,
            amount = %budget.amount,
            period = %budget.period,
            "budget created"
        );
        Ok(budget)
    }

    /// Merge `patch` into a budget; returns the modified count
    pub fn update(&self, id: BudgetId, patch: BudgetPatch) -> FinanceResult<usize> {
        let Some(mut budget) = self.get(id)? else {
            tracing::debug!(%id, "update of missing budget");
            return Ok(0);
        };

        budget.apply(patch);
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let modified = self.storage.budgets.update(id, |stored| *stored = budget)?;
        tracing::info!(%id, modified, "budget updated");
        Ok(modified)
    }

    /// Delete a budget; returns the removed count
    pub fn delete(&self, id: BudgetId) -> FinanceResult<usize> {
        let removed = self.storage.budgets.remove(id)?;
        tracing::info!(%id, removed, "budget deleted");
        Ok(removed)
    }
}
