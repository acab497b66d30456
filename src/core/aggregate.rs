//! Reduces dated entries into weekly totals.
use crate::core::entry::Entry;
use crate::core::timeline::Timeline;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Income, expenses and net for one week of a goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub week: u32,
    pub income_total: f64,
    pub expense_total: f64,
    pub net: f64,
    pub income_by_source: BTreeMap<String, f64>,
}

impl PeriodTotal {
    pub fn empty(week: u32) -> Self {
        PeriodTotal {
            week,
            income_total: 0.0,
            expense_total: 0.0,
            net: 0.0,
            income_by_source: BTreeMap::new(),
        }
    }

    fn add(&mut self, entry: &Entry) {
        for (source, amount) in &entry.income_by_source {
            *self.income_by_source.entry(source.clone()).or_insert(0.0) += amount;
        }
        self.income_total += entry.total_income();
        self.expense_total += entry.expenses;
        self.net = self.income_total - self.expense_total;
    }
}

/// Groups `entries` into weeks `1..=timeline.current_week`, in ascending order.
///
/// Weeks without entries are kept with zero totals. Entries outside the goal
/// range or after the current week are ignored; entries sharing a date are
/// summed.
pub fn aggregate(entries: &[Entry], timeline: &Timeline) -> Vec<PeriodTotal> {
    let mut periods: Vec<PeriodTotal> = (1..=timeline.current_week)
        .map(PeriodTotal::empty)
        .collect();

    let mut skipped = 0usize;
    for entry in entries {
        match timeline.week_of(entry.date) {
            Some(week) if week <= timeline.current_week => {
                periods[(week - 1) as usize].add(entry);
            }
            _ => skipped += 1,
        }
    }

    debug!(
        entries = entries.len(),
        skipped,
        weeks = periods.len(),
        "Aggregated entries into weekly periods"
    );
    periods
}

/// Total income per source over the entries that count toward the goal so far.
pub fn source_totals(entries: &[Entry], timeline: &Timeline) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for entry in entries.iter().filter(|e| timeline.counts(e.date)) {
        for (source, amount) in &entry.income_by_source {
            *totals.entry(source.clone()).or_insert(0.0) += amount;
        }
    }
    totals
}

/// Total income from a single named source. Unknown sources total zero.
pub fn source_total(entries: &[Entry], timeline: &Timeline, source: &str) -> f64 {
    entries
        .iter()
        .filter(|e| timeline.counts(e.date))
        .filter_map(|e| e.income_by_source.get(source))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::goal::{Currency, Goal};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(d: &str, income: &[(&str, f64)], expenses: f64) -> Entry {
        let income = income
            .iter()
            .map(|(source, amount)| (source.to_string(), *amount))
            .collect();
        Entry::new(date(d), income, expenses).unwrap()
    }

    fn timeline(today: &str) -> Timeline {
        let goal = Goal::new(
            "Trip",
            5000.0,
            date("2024-01-01"),
            date("2024-03-31"),
            Currency::default(),
        )
        .unwrap();
        Timeline::new(&goal, date(today))
    }

    #[test]
    fn test_one_period_per_elapsed_week_without_gaps() {
        let t = timeline("2024-01-25");
        assert_eq!(t.current_week, 4);

        let entries = vec![entry("2024-01-20", &[("salary", 100.0)], 0.0)];
        let periods = aggregate(&entries, &t);

        assert_eq!(periods.len(), 4);
        let weeks: Vec<u32> = periods.iter().map(|p| p.week).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
        assert_eq!(periods[0], PeriodTotal::empty(1));
        assert_eq!(periods[2].net, 100.0);
    }

    #[test]
    fn test_same_date_entries_are_summed() {
        let t = timeline("2024-01-05");
        let entries = vec![
            entry("2024-01-03", &[("salary", 100.0)], 10.0),
            entry("2024-01-03", &[("salary", 50.0), ("tips", 25.0)], 5.0),
        ];
        let periods = aggregate(&entries, &t);

        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].income_total, 175.0);
        assert_eq!(periods[0].expense_total, 15.0);
        assert_eq!(periods[0].net, 160.0);
        assert_eq!(periods[0].income_by_source["salary"], 150.0);
        assert_eq!(periods[0].income_by_source["tips"], 25.0);
    }

    #[test]
    fn test_excludes_out_of_range_and_future_entries() {
        let t = timeline("2024-01-10");
        let entries = vec![
            entry("2023-12-31", &[("salary", 1000.0)], 0.0),
            entry("2024-01-02", &[("salary", 10.0)], 0.0),
            entry("2024-02-20", &[("salary", 500.0)], 0.0),
            entry("2024-04-01", &[("salary", 700.0)], 0.0),
        ];
        let periods = aggregate(&entries, &t);

        let total: f64 = periods.iter().map(|p| p.net).sum();
        assert_eq!(total, 10.0);
    }

    #[test]
    fn test_aggregation_conserves_net() {
        let t = timeline("2024-03-31");
        let entries = vec![
            entry("2024-01-01", &[("salary", 200.0)], 30.0),
            entry("2024-01-08", &[("salary", 100.0)], 0.0),
            entry("2024-01-09", &[("freelance", 75.0)], 20.0),
            entry("2024-02-14", &[], 60.0),
            entry("2024-03-31", &[("salary", 300.0), ("freelance", 40.0)], 15.0),
        ];
        let periods = aggregate(&entries, &t);

        let by_period: f64 = periods.iter().map(|p| p.net).sum();
        let by_entry: f64 = entries.iter().map(Entry::net).sum();
        assert_eq!(by_period, by_entry);
        assert_eq!(periods.len() as u32, t.current_week);
        assert_eq!(periods[0].net, 170.0);
        assert_eq!(periods[1].net, 155.0);
    }

    #[test]
    fn test_source_totals_over_included_entries() {
        let t = timeline("2024-01-20");
        let entries = vec![
            entry("2024-01-02", &[("salary", 100.0), ("photography", 40.0)], 0.0),
            entry("2024-01-15", &[("photography", 60.0)], 0.0),
            entry("2023-12-20", &[("photography", 999.0)], 0.0),
        ];

        let totals = source_totals(&entries, &t);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["salary"], 100.0);
        assert_eq!(totals["photography"], 100.0);

        assert_eq!(source_total(&entries, &t, "photography"), 100.0);
        assert_eq!(source_total(&entries, &t, "unknown"), 0.0);
    }
}
