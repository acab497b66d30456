//! Week arithmetic of a goal evaluated against a given day.
use crate::core::goal::{Goal, ceil_weeks};
use chrono::NaiveDate;
use serde::Serialize;

/// Where `today` falls within a goal's weekly periods.
///
/// Week numbers are 1-based. The start date is day 1 and each week is a
/// 7-day window, so a date `d` days after the start date belongs to week
/// `ceil((d + 1) / 7)`. When the goal length is an exact multiple of seven
/// the end date folds into the last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_weeks: u32,
    pub current_week: u32,
}

impl Timeline {
    /// Builds the timeline of `goal` as seen on `today`. The current week is
    /// clamped to `[1, total_weeks]`, so a goal that has not started yet is in
    /// week 1 and a finished goal stays on its last week.
    pub fn new(goal: &Goal, today: NaiveDate) -> Self {
        let total_weeks = goal.total_weeks();
        let elapsed = day_week(goal.start_date, today).max(1);
        let current_week = elapsed.min(i64::from(total_weeks)) as u32;

        Timeline {
            start_date: goal.start_date,
            end_date: goal.end_date,
            total_weeks,
            current_week,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Week number of `date`, or `None` when it is outside the goal range.
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        let week = day_week(self.start_date, date).min(i64::from(self.total_weeks));
        Some(week.max(1) as u32)
    }

    /// Whether an entry on `date` counts toward progress so far: inside the
    /// goal range and not past the current week.
    pub fn counts(&self, date: NaiveDate) -> bool {
        self.week_of(date)
            .is_some_and(|week| week <= self.current_week)
    }

    pub fn weeks_remaining(&self) -> i64 {
        i64::from(self.total_weeks) - i64::from(self.current_week)
    }

    pub fn is_finished(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }
}

fn day_week(start: NaiveDate, date: NaiveDate) -> i64 {
    ceil_weeks((date - start).num_days() + 1)
}
