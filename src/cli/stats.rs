use super::ui;
use crate::core::{Currency, Entry, GoalRecord, PeriodTotal, Statistics, Timeline, aggregate};
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment};

/// Source columns: configured sources first, then any other source seen in
/// the periods, alphabetically.
fn source_columns(configured: &[String], periods: &[PeriodTotal]) -> Vec<String> {
    let mut columns: Vec<String> = configured.to_vec();
    for period in periods {
        for source in period.income_by_source.keys() {
            if !columns.contains(source) {
                columns.push(source.clone());
            }
        }
    }
    columns[configured.len()..].sort();
    columns
}

fn weekly_table(periods: &[PeriodTotal], sources: &[String], currency: &Currency) -> String {
    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Week")];
    header.extend(sources.iter().map(|s| ui::header_cell(s)));
    header.extend([
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Net"),
    ]);
    table.set_header(header);

    for period in periods {
        let mut row = vec![Cell::new(period.week).set_alignment(CellAlignment::Right)];
        row.extend(sources.iter().map(|source| {
            let amount = period.income_by_source.get(source).copied().unwrap_or(0.0);
            ui::money_cell(amount, currency)
        }));
        row.extend([
            ui::money_cell(period.income_total, currency),
            ui::money_cell(period.expense_total, currency),
            ui::net_cell(period.net, currency),
        ]);
        table.add_row(row);
    }
    table.to_string()
}

fn summary_table(stats: &Statistics, currency: &Currency) -> String {
    let week_label = |period: &Option<PeriodTotal>| {
        period.as_ref().map_or("N/A".to_string(), |p| {
            format!("{} (week {})", ui::format_money(p.net, currency), p.week)
        })
    };

    let mut table = ui::new_styled_table();
    let rows = [
        ("Total income", ui::format_money(stats.total_income, currency)),
        (
            "Total expenses",
            ui::format_money(stats.total_expenses, currency),
        ),
        ("Net saved", ui::format_money(stats.total_net, currency)),
        (
            "Average weekly",
            ui::format_money(stats.average_weekly, currency),
        ),
        ("Best week", week_label(&stats.best_week)),
        ("Worst week", week_label(&stats.worst_week)),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            ui::header_cell(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

fn sources_table(stats: &Statistics, sources: &[String], currency: &Currency) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Source"),
        ui::header_cell("Total"),
        ui::header_cell("Share (%)"),
    ]);
    for source in sources {
        let total = stats.source_totals.get(source).copied().unwrap_or(0.0);
        let share = if stats.total_income > 0.0 {
            format!("{:.1}%", 100.0 * total / stats.total_income)
        } else {
            "N/A".to_string()
        };
        table.add_row(vec![
            Cell::new(source),
            ui::money_cell(total, currency),
            Cell::new(share).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Renders weekly totals, summary statistics and totals by source for the
/// goal as of `today`.
pub fn render(
    record: &GoalRecord,
    entries: &[Entry],
    configured_sources: &[String],
    today: NaiveDate,
) -> String {
    let goal = &record.goal;
    let currency = &goal.currency;
    let timeline = Timeline::new(goal, today);
    let periods = aggregate(entries, &timeline);
    let stats = Statistics::from_periods(&periods);
    let sources = source_columns(configured_sources, &periods);

    let mut output = format!(
        "Statistics: {}\n\n",
        ui::style_text(&goal.title, ui::StyleType::Title)
    );
    output.push_str(&ui::style_text("Weekly progress", ui::StyleType::TotalLabel));
    output.push('\n');
    output.push_str(&weekly_table(&periods, &sources, currency));
    output.push_str("\n\n");
    output.push_str(&summary_table(&stats, currency));
    if !sources.is_empty() {
        output.push_str("\n\n");
        output.push_str(&ui::style_text("Total by source", ui::StyleType::TotalLabel));
        output.push('\n');
        output.push_str(&sources_table(&stats, &sources, currency));
    }
    output
}
