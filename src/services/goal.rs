//! Goal service
//!
//! Savings goals with a target amount and a running saved amount. Unlike the
//! other update paths, contributing to a goal that does not exist is an error.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalId, GoalPatch, Money, NewGoal};
use crate::storage::Storage;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All goals in insertion order
    pub fn list(&self) -> FinanceResult<Vec<Goal>> {
        self.storage.goals.all()
    }

    pub fn get(&self, id: GoalId) -> FinanceResult<Option<Goal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by full or short ID, then by exact name
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Goal>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<GoalId>() {
            if let Some(goal) = self.get(id)? {
                return Ok(Some(goal));
            }
        }
        self.storage
            .goals
            .find_one(|g| g.id.short() == identifier || g.name == identifier)
    }

    /// Create a new goal
    pub fn create(&self, input: NewGoal) -> FinanceResult<Goal> {
        let goal = input.into_goal();
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let goal = self.storage.goals.insert(goal)?;
        tracing::info!(
            id = %goal.id,
            name = %goal.name,
            target = %goal.target,
            "goal created"
        );
        Ok(goal)
    }

    /// Merge `patch` into a goal; returns the modified count
    pub fn update(&self, id: GoalId, patch: GoalPatch) -> FinanceResult<usize> {
        let Some(mut goal) = self.get(id)? else {
            tracing::debug!(%id, "update of missing goal");
            return Ok(0);
        };

        goal.apply(patch);
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let modified = self.storage.goals.update(id, |stored| *stored = goal)?;
        tracing::info!(%id, modified, "goal updated");
        Ok(modified)
    }

    /// Delete a goal; returns the removed count
    pub fn delete(&self, id: GoalId) -> FinanceResult<usize> {
        let removed = self.storage.goals.remove(id)?;
        tracing::info!(%id, removed, "goal deleted");
        Ok(removed)
    }

    /// Add `amount` to a goal's saved amount and return the updated goal
    ///
    /// The saved amount may exceed the target. A contribution that would
    /// take it below zero or past the storable range is a validation error
    /// and nothing is written.
    pub fn add_contribution(&self, id: GoalId, amount: Money) -> FinanceResult<Goal> {
        let mut goal = self
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        goal.contribute(amount)
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        let updated = goal.clone();
        self.storage.goals.update(id, |stored| *stored = goal)?;

        tracing::info!(
            %id,
            amount = %amount,
            current = %updated.current,
            target = %updated.target,
            "contribution added to goal"
        );
        if updated.is_reached() {
            tracing::info!(%id, name = %updated.name, "goal reached");
        }
        Ok(updated)
    }
}
