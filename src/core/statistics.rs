//! Summary statistics over weekly totals and the logging streak.
use crate::core::aggregate::PeriodTotal;
use crate::core::entry::Entry;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_net: f64,
    /// Net per elapsed week, weeks without entries included.
    pub average_weekly: f64,
    pub best_week: Option<PeriodTotal>,
    pub worst_week: Option<PeriodTotal>,
    pub source_totals: BTreeMap<String, f64>,
}

impl Statistics {
    pub fn from_periods(periods: &[PeriodTotal]) -> Self {
        let total_income = periods.iter().map(|p| p.income_total).sum();
        let total_expenses = periods.iter().map(|p| p.expense_total).sum();
        let total_net: f64 = periods.iter().map(|p| p.net).sum();
        let average_weekly = if periods.is_empty() {
            0.0
        } else {
            total_net / periods.len() as f64
        };

        let mut best_week: Option<&PeriodTotal> = None;
        let mut worst_week: Option<&PeriodTotal> = None;
        let mut source_totals = BTreeMap::new();
        for period in periods {
            if best_week.is_none_or(|best| period.net > best.net) {
                best_week = Some(period);
            }
            if worst_week.is_none_or(|worst| period.net < worst.net) {
                worst_week = Some(period);
            }
            for (source, amount) in &period.income_by_source {
                *source_totals.entry(source.clone()).or_insert(0.0) += amount;
            }
        }

        Statistics {
            total_income,
            total_expenses,
            total_net,
            average_weekly,
            best_week: best_week.cloned(),
            worst_week: worst_week.cloned(),
            source_totals,
        }
    }
}

/// Consecutive days with at least one entry, counted back from `today`.
///
/// A day without entries yet does not break the streak when it is `today`:
/// counting then starts from yesterday.
pub fn streak_days(entries: &[Entry], today: NaiveDate) -> u32 {
    let logged: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut day = if logged.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while logged.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn period(week: u32, income: &[(&str, f64)], expenses: f64) -> PeriodTotal {
        let income_by_source: BTreeMap<String, f64> = income
            .iter()
            .map(|(source, amount)| (source.to_string(), *amount))
            .collect();
        let income_total: f64 = income_by_source.values().sum();
        PeriodTotal {
            week,
            income_total,
            expense_total: expenses,
            net: income_total - expenses,
            income_by_source,
        }
    }

    fn entry_on(d: &str) -> Entry {
        Entry::new(date(d), BTreeMap::from([("salary".to_string(), 1.0)]), 0.0).unwrap()
    }

    #[test]
    fn test_statistics_over_periods() {
        let periods = vec![
            period(1, &[("salary", 500.0), ("tips", 50.0)], 100.0),
            period(2, &[], 0.0),
            period(3, &[("salary", 800.0)], 200.0),
            period(4, &[("tips", 30.0)], 90.0),
        ];
        let stats = Statistics::from_periods(&periods);

        assert_eq!(stats.total_income, 1380.0);
        assert_eq!(stats.total_expenses, 390.0);
        assert_eq!(stats.total_net, 990.0);
        assert_eq!(stats.average_weekly, 247.5);
        assert_eq!(stats.best_week.unwrap().week, 3);
        assert_eq!(stats.worst_week.unwrap().week, 4);
        assert_eq!(stats.source_totals["salary"], 1300.0);
        assert_eq!(stats.source_totals["tips"], 80.0);
    }

    #[test]
    fn test_statistics_of_no_periods() {
        let stats = Statistics::from_periods(&[]);
        assert_eq!(stats.total_net, 0.0);
        assert_eq!(stats.average_weekly, 0.0);
        assert!(stats.best_week.is_none());
        assert!(stats.worst_week.is_none());
        assert!(stats.source_totals.is_empty());
    }

    #[test]
    fn test_first_week_wins_ties() {
        let periods = vec![period(1, &[], 0.0), period(2, &[], 0.0)];
        let stats = Statistics::from_periods(&periods);
        assert_eq!(stats.best_week.unwrap().week, 1);
        assert_eq!(stats.worst_week.unwrap().week, 1);
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let entries = vec![
            entry_on("2024-03-10"),
            entry_on("2024-03-09"),
            entry_on("2024-03-09"),
            entry_on("2024-03-08"),
            entry_on("2024-03-06"),
        ];
        assert_eq!(streak_days(&entries, date("2024-03-10")), 3);
    }

    #[test]
    fn test_streak_survives_unlogged_today() {
        let entries = vec![entry_on("2024-03-09"), entry_on("2024-03-08")];
        assert_eq!(streak_days(&entries, date("2024-03-10")), 2);
        assert_eq!(streak_days(&entries, date("2024-03-11")), 0);
        assert_eq!(streak_days(&[], date("2024-03-11")), 0);
    }
}
