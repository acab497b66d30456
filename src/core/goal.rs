use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Display-only currency tag. Amounts are never converted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            code: "USD".to_string(),
            symbol: "$".to_string(),
        }
    }
}

/// A savings objective over a fixed date range.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Goal {
    pub title: String,
    pub target_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub currency: Currency,
}

/// Fields to replace on an existing goal. `None` keeps the current value.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub currency: Option<Currency>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.target_amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.currency.is_none()
    }
}

/// A goal as held by a goal store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GoalRecord {
    pub id: String,
    pub goal: Goal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        title: impl Into<String>,
        target_amount: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        currency: Currency,
    ) -> Result<Self> {
        let goal = Goal {
            title: title.into(),
            target_amount,
            start_date,
            end_date,
            currency,
        };
        goal.validate()?;
        Ok(goal)
    }

    fn validate(&self) -> Result<()> {
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            bail!(
                "Goal target must be a positive amount, got {}",
                self.target_amount
            );
        }
        if self.end_date <= self.start_date {
            bail!(
                "Goal end date {} must be after start date {}",
                self.end_date,
                self.start_date
            );
        }
        Ok(())
    }

    /// Returns a copy of this goal with the update applied, validated the same
    /// way as [`Goal::new`].
    pub fn apply(&self, update: &GoalUpdate) -> Result<Goal> {
        let mut goal = self.clone();
        if let Some(title) = &update.title {
            goal.title = title.clone();
        }
        if let Some(target) = update.target_amount {
            goal.target_amount = target;
        }
        if let Some(start) = update.start_date {
            goal.start_date = start;
        }
        if let Some(end) = update.end_date {
            goal.end_date = end;
        }
        if let Some(currency) = &update.currency {
            goal.currency = currency.clone();
        }
        goal.validate()?;
        Ok(goal)
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Number of 7-day periods the goal spans, rounded up. Never zero.
    pub fn total_weeks(&self) -> u32 {
        ceil_weeks(self.duration_days()).max(1) as u32
    }

    /// Flat amount to save each week if the target were spread evenly.
    pub fn weekly_target(&self) -> f64 {
        self.target_amount / self.total_weeks() as f64
    }
}

/// `ceil(days / 7)` for any sign of `days`.
pub(crate) fn ceil_weeks(days: i64) -> i64 {
    days.div_euclid(7) + i64::from(days.rem_euclid(7) > 0)
}
