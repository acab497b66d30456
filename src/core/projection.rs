//! Progress, pacing and projection of a goal from its weekly totals.
use crate::core::aggregate::PeriodTotal;
use crate::core::goal::Goal;
use crate::core::timeline::Timeline;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const AHEAD_RATIO: f64 = 1.05;
const FAR_BEHIND_RATIO: f64 = 0.8;
const ON_TRACK_RATIO: f64 = 0.95;

/// How actual savings compare with the amount expected by now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingStatus {
    Ahead,
    OnTrack,
    SlightlyBehind,
    FarBehind,
}

impl fmt::Display for PacingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PacingStatus::Ahead => "Ahead",
            PacingStatus::OnTrack => "On track",
            PacingStatus::SlightlyBehind => "Slightly behind",
            PacingStatus::FarBehind => "Far behind",
        };
        f.write_str(label)
    }
}

/// Display-ready metrics for a goal at its current week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub total_earned: f64,
    pub progress_percentage: f64,
    pub expected_at_this_point: f64,
    pub remaining_amount: f64,
    pub weeks_remaining: i64,
    pub adjusted_weekly_target: f64,
    pub average_weekly: f64,
    pub projected_total: f64,
    pub status: PacingStatus,
}

/// Net change between the two most recent weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekComparison {
    pub this_week: f64,
    pub last_week: f64,
    pub change: f64,
    pub percentage: f64,
}

/// Classifies pacing. Thresholds are checked in order and the first match
/// wins: `>= 105%` of expected is ahead, `< 80%` far behind, `>= 95%` on
/// track, anything else slightly behind.
///
/// With nothing expected yet (`expected <= 0`) any positive total is ahead and
/// the rest is on track.
pub fn classify(total_earned: f64, expected: f64) -> PacingStatus {
    if expected <= 0.0 {
        return if total_earned > 0.0 {
            PacingStatus::Ahead
        } else {
            PacingStatus::OnTrack
        };
    }

    if total_earned >= expected * AHEAD_RATIO {
        PacingStatus::Ahead
    } else if total_earned < expected * FAR_BEHIND_RATIO {
        PacingStatus::FarBehind
    } else if total_earned >= expected * ON_TRACK_RATIO {
        PacingStatus::OnTrack
    } else {
        PacingStatus::SlightlyBehind
    }
}

/// Computes progress of `goal` from its weekly `periods`.
///
/// The projected total is a linear extrapolation: the average net per elapsed
/// week continued over every week of the goal.
pub fn project(periods: &[PeriodTotal], goal: &Goal, timeline: &Timeline) -> Progress {
    let target = goal.target_amount;
    let total_weeks = f64::from(timeline.total_weeks);
    let current_week = f64::from(timeline.current_week);

    let total_earned: f64 = periods.iter().map(|p| p.net).sum();
    let progress_percentage = 100.0 * total_earned / target;
    let expected_at_this_point = if timeline.total_weeks > 0 {
        target * current_week / total_weeks
    } else {
        target
    };
    let remaining_amount = target - total_earned;
    let weeks_remaining = timeline.weeks_remaining();
    let adjusted_weekly_target = if weeks_remaining > 0 {
        remaining_amount / weeks_remaining as f64
    } else {
        0.0
    };
    let average_weekly = if timeline.current_week > 0 {
        total_earned / current_week
    } else {
        0.0
    };
    let projected_total = average_weekly * total_weeks;
    let status = classify(total_earned, expected_at_this_point);

    debug!(
        total_earned,
        expected_at_this_point,
        ?status,
        current_week = timeline.current_week,
        total_weeks = timeline.total_weeks,
        "Projected goal progress"
    );

    Progress {
        total_earned,
        progress_percentage,
        expected_at_this_point,
        remaining_amount,
        weeks_remaining,
        adjusted_weekly_target,
        average_weekly,
        projected_total,
        status,
    }
}

/// Compares the last two periods. `None` when fewer than two exist.
pub fn compare_last_two(periods: &[PeriodTotal]) -> Option<WeekComparison> {
    let [.., last_week, this_week] = periods else {
        return None;
    };

    let change = this_week.net - last_week.net;
    let percentage = if last_week.net > 0.0 {
        100.0 * change / last_week.net
    } else {
        0.0
    };

    Some(WeekComparison {
        this_week: this_week.net,
        last_week: last_week.net,
        change,
        percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::goal::Currency;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn half_year_goal() -> Goal {
        Goal::new(
            "Financial Goal 2024",
            25000.0,
            date("2024-01-01"),
            date("2024-06-30"),
            Currency::default(),
        )
        .unwrap()
    }

    fn period(week: u32, net: f64) -> PeriodTotal {
        PeriodTotal {
            net,
            income_total: net.max(0.0),
            expense_total: (-net).max(0.0),
            ..PeriodTotal::empty(week)
        }
    }

    fn periods_totalling(weeks: u32, total: f64) -> Vec<PeriodTotal> {
        (1..=weeks)
            .map(|w| period(w, total / f64::from(weeks)))
            .collect()
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(classify(1050.0, 1000.0), PacingStatus::Ahead);
        assert_eq!(classify(1049.99, 1000.0), PacingStatus::OnTrack);
        assert_eq!(classify(950.0, 1000.0), PacingStatus::OnTrack);
        assert_eq!(classify(949.99, 1000.0), PacingStatus::SlightlyBehind);
        assert_eq!(classify(800.0, 1000.0), PacingStatus::SlightlyBehind);
        assert_eq!(classify(799.99, 1000.0), PacingStatus::FarBehind);
    }

    #[test]
    fn test_status_with_nothing_expected() {
        assert_eq!(classify(10.0, 0.0), PacingStatus::Ahead);
        assert_eq!(classify(0.0, 0.0), PacingStatus::OnTrack);
        assert_eq!(classify(-10.0, 0.0), PacingStatus::OnTrack);
    }

    #[test]
    fn test_half_year_goal_far_behind() {
        let goal = half_year_goal();
        let timeline = Timeline::new(&goal, date("2024-03-10"));
        assert_eq!(timeline.total_weeks, 26);
        assert_eq!(timeline.current_week, 10);

        let periods = periods_totalling(10, 6000.0);
        let progress = project(&periods, &goal, &timeline);

        assert!((progress.total_earned - 6000.0).abs() < 1e-9);
        assert!((progress.expected_at_this_point - 9615.384615384615).abs() < 1e-6);
        assert_eq!(progress.status, PacingStatus::FarBehind);
        assert_eq!(progress.weeks_remaining, 16);
        assert!((progress.adjusted_weekly_target - 1187.5).abs() < 1e-9);
        assert!((progress.progress_percentage - 24.0).abs() < 1e-9);
        assert!((progress.average_weekly - 600.0).abs() < 1e-9);
        assert!((progress.projected_total - 15600.0).abs() < 1e-6);
        assert!((progress.remaining_amount - 19000.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_is_pure() {
        let goal = half_year_goal();
        let timeline = Timeline::new(&goal, date("2024-02-01"));
        let periods = periods_totalling(timeline.current_week, 4200.0);

        let first = project(&periods, &goal, &timeline);
        let second = project(&periods, &goal, &timeline);
        assert_eq!(first, second);
    }

    #[test]
    fn test_progress_is_unclamped() {
        let goal = half_year_goal();
        let timeline = Timeline::new(&goal, date("2024-07-15"));
        let periods = vec![period(1, 30000.0)];
        let progress = project(&periods, &goal, &timeline);
        assert!((progress.progress_percentage - 120.0).abs() < 1e-9);
        assert!(progress.remaining_amount < 0.0);

        let periods = vec![period(1, -500.0)];
        let progress = project(&periods, &goal, &timeline);
        assert!(progress.progress_percentage < 0.0);
    }

    #[test]
    fn test_no_weekly_target_at_goal_end() {
        let goal = half_year_goal();
        let timeline = Timeline::new(&goal, date("2024-12-01"));
        assert_eq!(timeline.current_week, 26);

        let periods = periods_totalling(26, 13000.0);
        let progress = project(&periods, &goal, &timeline);
        assert_eq!(progress.weeks_remaining, 0);
        assert_eq!(progress.adjusted_weekly_target, 0.0);
        assert!((progress.projected_total - 13000.0).abs() < 1e-6);
    }

    #[test]
    fn test_week_zero_does_not_divide_by_zero() {
        let goal = half_year_goal();
        let timeline = Timeline {
            start_date: goal.start_date,
            end_date: goal.end_date,
            total_weeks: 26,
            current_week: 0,
        };
        let progress = project(&[], &goal, &timeline);

        assert_eq!(progress.total_earned, 0.0);
        assert_eq!(progress.expected_at_this_point, 0.0);
        assert_eq!(progress.average_weekly, 0.0);
        assert_eq!(progress.projected_total, 0.0);
        assert!(progress.projected_total.is_finite());
        assert_eq!(progress.status, PacingStatus::OnTrack);
    }

    #[test]
    fn test_weeks_remaining_negative_guard() {
        let goal = half_year_goal();
        let timeline = Timeline {
            start_date: goal.start_date,
            end_date: goal.end_date,
            total_weeks: 26,
            current_week: 30,
        };
        let progress = project(&[period(1, 100.0)], &goal, &timeline);
        assert_eq!(progress.weeks_remaining, -4);
        assert_eq!(progress.adjusted_weekly_target, 0.0);
    }

    #[test]
    fn test_compare_requires_two_periods() {
        assert!(compare_last_two(&[]).is_none());
        assert!(compare_last_two(&[period(1, 100.0)]).is_none());
    }

    #[test]
    fn test_compare_last_two() {
        let cmp = compare_last_two(&[period(1, 100.0), period(2, 150.0)]).unwrap();
        assert_eq!(cmp.change, 50.0);
        assert_eq!(cmp.percentage, 50.0);
        assert_eq!(cmp.this_week, 150.0);
        assert_eq!(cmp.last_week, 100.0);
    }

    #[test]
    fn test_compare_uses_most_recent_weeks() {
        let periods = vec![period(1, 999.0), period(2, 200.0), period(3, 100.0)];
        let cmp = compare_last_two(&periods).unwrap();
        assert_eq!(cmp.change, -100.0);
        assert_eq!(cmp.percentage, -50.0);
    }

    #[test]
    fn test_compare_with_non_positive_last_week() {
        let cmp = compare_last_two(&[period(1, 0.0), period(2, 80.0)]).unwrap();
        assert_eq!(cmp.change, 80.0);
        assert_eq!(cmp.percentage, 0.0);

        let cmp = compare_last_two(&[period(1, -40.0), period(2, 60.0)]).unwrap();
        assert_eq!(cmp.change, 100.0);
        assert_eq!(cmp.percentage, 0.0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PacingStatus::SlightlyBehind.to_string(), "Slightly behind");
        assert_eq!(PacingStatus::Ahead.to_string(), "Ahead");
    }
}
