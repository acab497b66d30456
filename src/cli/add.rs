use super::ui;
use crate::core::{Currency, Entry, Goal, Timeline};
use crate::store::{EntryStore, GoalStore};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Parses a `SOURCE=AMOUNT` command-line argument.
pub fn parse_income_arg(arg: &str) -> Result<(String, f64), String> {
    let (source, amount) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SOURCE=AMOUNT, got '{arg}'"))?;
    let source = source.trim();
    if source.is_empty() {
        return Err(format!("missing source name in '{arg}'"));
    }
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount '{}' for source '{source}'", amount.trim()))?;
    Ok((source.to_string(), amount))
}

/// Records an entry for `date`. Repeated sources are summed. A note is added
/// when the active goal will not count the entry as of `today`.
pub async fn run<S>(
    store: &S,
    date: NaiveDate,
    today: NaiveDate,
    income: &[(String, f64)],
    expenses: Option<f64>,
    default_currency: &Currency,
) -> Result<String>
where
    S: EntryStore + GoalStore,
{
    if income.is_empty() && expenses.is_none() {
        bail!("Nothing to record: give at least one --income or --expenses");
    }

    let mut income_by_source = BTreeMap::new();
    for (source, amount) in income {
        *income_by_source.entry(source.clone()).or_insert(0.0) += amount;
    }
    let entry = Entry::new(date, income_by_source, expenses.unwrap_or(0.0))?;

    let active = store.get_active_goal().await?;
    let mut output = String::new();
    if let Some(note) = active.as_ref().and_then(|r| uncounted_note(&r.goal, date, today)) {
        output.push_str(&ui::style_text(&note, ui::StyleType::Error));
    }
    let currency = active
        .as_ref()
        .map_or(default_currency, |r| &r.goal.currency);

    let net = entry.net();
    let id = store.save_entry(entry).await?;
    info!(%id, %date, net, "Saved entry");

    output.push_str(&format!(
        "Saved entry for {date}. Net: {}",
        ui::style_text(&ui::format_money(net, currency), ui::StyleType::TotalValue)
    ));
    Ok(output)
}

fn uncounted_note(goal: &Goal, date: NaiveDate, today: NaiveDate) -> Option<String> {
    let timeline = Timeline::new(goal, today);
    match timeline.week_of(date) {
        None => {
            info!(%date, goal = %goal.title, "Entry date outside active goal range");
            Some(format!(
                "Note: {date} is outside the goal period {} to {}; \
                 it will not count toward '{}'.\n",
                goal.start_date, goal.end_date, goal.title
            ))
        }
        Some(week) if week > timeline.current_week => {
            info!(%date, week, "Entry dated in a week that has not started");
            Some(format!(
                "Note: {date} falls in week {week}, which has not started yet; \
                 it will count toward '{}' once that week begins.\n",
                goal.title
            ))
        }
        Some(_) => None,
    }
}
