//! Savings goal model
//!
//! Tracks progress toward a target amount and projects when the target will
//! be reached at the planned monthly contribution.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    /// Amount to reach
    pub target: Money,

    /// Amount saved so far; may exceed `target`
    #[serde(default)]
    pub current: Money,

    /// Optional deadline
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    /// Planned saving per month, used for projections only
    pub monthly_contribution: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(name: impl Into<String>, target: Money, monthly_contribution: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            current: Money::zero(),
            target_date: None,
            monthly_contribution,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_current(mut self, current: Money) -> Self {
        self.current = current;
        self
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Add a contribution to the saved amount
    ///
    /// Negative amounts withdraw savings but may not take the saved amount
    /// below zero. The goal is unchanged when an error is returned.
    pub fn contribute(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        let current = self
            .current
            .checked_add(amount)
            .ok_or(GoalValidationError::ContributionOverflow(amount))?;
        if current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(current));
        }

        self.current = current;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Saved amount as a percentage of the target (unrounded)
    pub fn progress_percentage(&self) -> f64 {
        self.current.ratio_percent(self.target)
    }

    /// Amount still missing; negative once the target is exceeded
    pub fn remaining_amount(&self) -> Money {
        self.target - self.current
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }

    /// Whole months of contributions needed to reach the target
    pub fn months_to_completion(&self) -> Result<u32, GoalValidationError> {
        if !self.monthly_contribution.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(
                self.monthly_contribution,
            ));
        }

        let remaining = self.remaining_amount().cents();
        if remaining <= 0 {
            return Ok(0);
        }

        let monthly = i128::from(self.monthly_contribution.cents());
        let months = (i128::from(remaining) + monthly - 1) / monthly;
        Ok(u32::try_from(months).unwrap_or(u32::MAX))
    }

    /// Merge the set fields of a patch into this record
    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(target) = patch.target {
            self.target = target;
        }
        if let Some(current) = patch.current {
            self.current = current;
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = target_date;
        }
        if let Some(monthly) = patch.monthly_contribution {
            self.monthly_contribution = monthly;
        }
        self.updated_at = Utc::now();
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }

        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target));
        }

        if self.current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current));
        }

        if !self.monthly_contribution.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(
                self.monthly_contribution,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / {}", self.name, self.current, self.target)
    }
}

/// Input for creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target: Money,
    #[serde(default)]
    pub current: Money,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    pub monthly_contribution: Money,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: Money, monthly_contribution: Money) -> Self {
        Self {
            name: name.into(),
            target,
            current: Money::zero(),
            target_date: None,
            monthly_contribution,
        }
    }

    pub fn into_goal(self) -> Goal {
        let mut goal = Goal::new(self.name.trim(), self.target, self.monthly_contribution)
            .with_current(self.current);
        goal.target_date = self.target_date;
        goal
    }
}

/// Partial update of a goal
///
/// `target_date` is doubly optional: `Some(None)` clears the deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Money>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_some"
    )]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<Money>,
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target.is_none()
            && self.current.is_none()
            && self.target_date.is_none()
            && self.monthly_contribution.is_none()
    }
}

/// Distinguishes an explicit `null` from a missing field
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Derived progress figures for a goal at a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub goal_id: GoalId,
    pub progress_percentage: f64,
    pub remaining_amount: Money,
    pub months_to_completion: u32,
    pub estimated_completion: Option<NaiveDate>,
    /// Whether the estimate lands on or before the target date, if one is set
    pub on_track: Option<bool>,
}

impl GoalProjection {
    /// Project completion of `goal` starting from `today`
    pub fn for_goal(goal: &Goal, today: NaiveDate) -> Result<Self, GoalValidationError> {
        let months = goal.months_to_completion()?;
        let estimated_completion = today.checked_add_months(Months::new(months));
        let on_track = match (goal.target_date, estimated_completion) {
            (Some(deadline), Some(estimate)) => Some(estimate <= deadline),
            (Some(_), None) => Some(false),
            (None, _) => None,
        };

        Ok(Self {
            goal_id: goal.id,
            progress_percentage: goal.progress_percentage(),
            remaining_amount: goal.remaining_amount(),
            months_to_completion: months,
            estimated_completion,
            on_track,
        })
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    NonPositiveContribution(Money),
    ContributionOverflow(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Goal target must be positive, got {}", amount)
            }
            Self::NegativeCurrent(amount) => {
                write!(f, "Goal current amount cannot be negative, got {}", amount)
            }
            Self::NonPositiveContribution(amount) => write!(
                f,
                "Monthly contribution must be positive to project completion, got {}",
                amount
            ),
            Self::ContributionOverflow(amount) => {
                write!(f, "Contribution of {} exceeds the largest storable amount", amount)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn voiture() -> Goal {
        Goal::new("Voiture", Money::from_units(10000), Money::from_units(500))
            .with_current(Money::from_units(2500))
    }

    #[test]
    fn test_projection_helpers() {
        let goal = voiture();
        assert!((goal.progress_percentage() - 25.0).abs() < 1e-9);
        assert_eq!(goal.remaining_amount(), Money::from_units(7500));
        assert_eq!(goal.months_to_completion(), Ok(15));
    }

    #[test]
    fn test_months_round_up() {
        let goal = Goal::new("Vacances", Money::from_units(3000), Money::from_units(400))
            .with_current(Money::from_units(1000));
        // 2000 / 400 = 5 exactly
        assert_eq!(goal.months_to_completion(), Ok(5));

        let goal = goal.with_current(Money::from_units(1001));
        // 1999 / 400 = 4.9975 -> 5
        assert_eq!(goal.months_to_completion(), Ok(5));

        let goal = goal.with_current(Money::from_units(999));
        // 2001 / 400 -> 6
        assert_eq!(goal.months_to_completion(), Ok(6));
    }

    #[test]
    fn test_reached_goal_needs_zero_months() {
        let goal = voiture().with_current(Money::from_units(12000));
        assert!(goal.is_reached());
        assert_eq!(goal.remaining_amount(), Money::from_units(-2000));
        assert_eq!(goal.months_to_completion(), Ok(0));
        assert!(goal.progress_percentage() > 100.0);
    }

    #[test]
    fn test_non_positive_contribution_is_rejected() {
        let mut goal = voiture();
        goal.monthly_contribution = Money::zero();
        assert_eq!(
            goal.months_to_completion(),
            Err(GoalValidationError::NonPositiveContribution(Money::zero()))
        );
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_projection_with_deadline() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let goal = voiture().with_target_date(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());

        let projection = GoalProjection::for_goal(&goal, today).unwrap();
        assert_eq!(projection.months_to_completion, 15);
        assert_eq!(
            projection.estimated_completion,
            NaiveDate::from_ymd_opt(2026, 4, 15)
        );
        assert_eq!(projection.on_track, Some(true));

        let late = voiture().with_target_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        let projection = GoalProjection::for_goal(&late, today).unwrap();
        assert_eq!(projection.on_track, Some(false));
    }

    #[test]
    fn test_projection_without_deadline() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let projection = GoalProjection::for_goal(&voiture(), today).unwrap();
        assert_eq!(projection.on_track, None);
        assert_eq!(projection.remaining_amount, Money::from_units(7500));
    }

    #[test]
    fn test_patch_can_clear_target_date() {
        let mut goal = voiture().with_target_date(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());

        let keep: GoalPatch = serde_json::from_str(r#"{"current":300000}"#).unwrap();
        goal.apply(keep);
        assert!(goal.target_date.is_some());
        assert_eq!(goal.current, Money::from_units(3000));

        let clear: GoalPatch = serde_json::from_str(r#"{"targetDate":null}"#).unwrap();
        goal.apply(clear);
        assert!(goal.target_date.is_none());
    }

    #[test]
    fn test_validation() {
        assert!(voiture().validate().is_ok());

        let goal = Goal::new(" ", Money::from_units(10), Money::from_units(1));
        assert_eq!(goal.validate(), Err(GoalValidationError::EmptyName));

        let goal = Goal::new("Ordinateur", Money::zero(), Money::from_units(1));
        assert_eq!(
            goal.validate(),
            Err(GoalValidationError::NonPositiveTarget(Money::zero()))
        );

        let goal = Goal::new("Ordinateur", Money::from_units(1500), Money::from_units(150))
            .with_current(Money::from_cents(-1));
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::NegativeCurrent(_))
        ));
    }

    #[test]
    fn test_contribute_keeps_saved_amount_in_range() {
        let mut goal = voiture();

        goal.contribute(Money::from_units(-500)).unwrap();
        assert_eq!(goal.current, Money::from_units(2000));

        assert_eq!(
            goal.contribute(Money::from_units(-2001)),
            Err(GoalValidationError::NegativeCurrent(Money::from_units(-1)))
        );
        assert!(matches!(
            goal.contribute(Money::from_cents(i64::MAX)),
            Err(GoalValidationError::ContributionOverflow(_))
        ));
        assert_eq!(goal.current, Money::from_units(2000));
    }

    #[test]
    fn test_months_for_huge_remaining_amount() {
        let goal = Goal::new("Maison", Money::from_cents(i64::MAX), Money::from_cents(i64::MAX));
        assert_eq!(goal.months_to_completion(), Ok(1));
    }
}
