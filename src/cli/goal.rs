use super::ui;
use crate::core::{Currency, Goal, GoalRecord, GoalUpdate, Timeline};
use crate::store::GoalStore;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::Cell;
use tracing::info;

/// Arguments for creating a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency_code: Option<String>,
    pub currency_symbol: Option<String>,
}

impl NewGoal {
    fn into_goal(self, default_currency: &Currency) -> Result<Goal> {
        let currency = Currency {
            code: self
                .currency_code
                .unwrap_or_else(|| default_currency.code.clone()),
            symbol: self
                .currency_symbol
                .unwrap_or_else(|| default_currency.symbol.clone()),
        };
        Goal::new(
            self.title,
            self.target_amount,
            self.start_date,
            self.end_date,
            currency,
        )
    }
}

/// Creates a new active goal; the previous one is archived.
pub async fn set(
    store: &dyn GoalStore,
    new_goal: NewGoal,
    default_currency: &Currency,
) -> Result<String> {
    let goal = new_goal.into_goal(default_currency)?;
    let previous = store.get_active_goal().await?;
    let summary = format!(
        "Created goal '{}': {} over {} weeks ({} per week).",
        goal.title,
        ui::format_money(goal.target_amount, &goal.currency),
        goal.total_weeks(),
        ui::format_money(goal.weekly_target(), &goal.currency),
    );

    let id = store.save_goal(goal).await?;
    info!(%id, "Created goal");

    let mut output = summary;
    if let Some(previous) = previous {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Archived previous goal '{}'.", previous.goal.title),
                ui::StyleType::Subtle
            )
        ));
    }
    Ok(output)
}

/// Applies `update` to the active goal.
pub async fn edit(store: &dyn GoalStore, update: GoalUpdate) -> Result<String> {
    if update.is_empty() {
        bail!("Nothing to update: give at least one field to change");
    }
    let active = store
        .get_active_goal()
        .await?
        .context("No active goal to edit")?;

    store.update_goal(&active.id, update).await?;
    info!(id = %active.id, "Updated goal");
    Ok(format!("Updated goal '{}'.", active.goal.title))
}

/// Describes the active goal as of `today`.
pub fn render_details(record: &GoalRecord, today: NaiveDate) -> String {
    let goal = &record.goal;
    let timeline = Timeline::new(goal, today);

    let mut table = ui::new_styled_table();
    let rows = [
        ("Target", ui::format_money(goal.target_amount, &goal.currency)),
        (
            "Currency",
            format!("{} ({})", goal.currency.code, goal.currency.symbol),
        ),
        ("Start", goal.start_date.to_string()),
        ("End", goal.end_date.to_string()),
        ("Duration", format!("{} weeks", timeline.total_weeks)),
        (
            "Current week",
            format!("Week {} of {}", timeline.current_week, timeline.total_weeks),
        ),
        (
            "Weekly target",
            ui::format_money(goal.weekly_target(), &goal.currency),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![ui::header_cell(label), Cell::new(value)]);
    }

    format!(
        "Goal: {}\n\n{}",
        ui::style_text(&goal.title, ui::StyleType::Title),
        table
    )
}

/// Lists all goals, newest first.
pub fn render_history(records: &[GoalRecord]) -> String {
    if records.is_empty() {
        return ui::style_text("No goals created yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Title"),
        ui::header_cell("Target"),
        ui::header_cell("Start"),
        ui::header_cell("End"),
        ui::header_cell("Status"),
    ]);
    for record in records {
        let goal = &record.goal;
        let status = if record.is_active {
            ui::style_text("active", ui::StyleType::TotalValue)
        } else {
            ui::style_text("archived", ui::StyleType::Subtle)
        };
        table.add_row(vec![
            Cell::new(&goal.title),
            ui::money_cell(goal.target_amount, &goal.currency),
            Cell::new(goal.start_date),
            Cell::new(goal.end_date),
            Cell::new(status),
        ]);
    }
    table.to_string()
}
