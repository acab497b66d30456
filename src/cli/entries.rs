use super::ui;
use crate::core::{Currency, Entry};
use comfy_table::Cell;

/// Renders entries as a table, in the order given, optionally truncated.
pub fn render(entries: &[Entry], limit: Option<usize>, currency: &Currency) -> String {
    if entries.is_empty() {
        return ui::style_text("No entries recorded yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Net"),
    ]);

    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    for entry in &entries[..shown] {
        let income = if entry.income_by_source.is_empty() {
            "-".to_string()
        } else {
            entry
                .income_by_source
                .iter()
                .map(|(source, amount)| {
                    format!("{source}: {}", ui::format_money(*amount, currency))
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        table.add_row(vec![
            Cell::new(entry.date),
            Cell::new(income),
            ui::money_cell(entry.expenses, currency),
            ui::net_cell(entry.net(), currency),
        ]);
    }

    let mut output = table.to_string();
    if shown < entries.len() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Showing {shown} of {} entries", entries.len()),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn entry(d: &str, salary: f64, expenses: f64) -> Entry {
        Entry::new(
            NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            BTreeMap::from([("salary".to_string(), salary)]),
            expenses,
        )
        .unwrap()
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[], None, &Currency::default()).contains("No entries"));
    }

    #[test]
    fn test_render_with_limit() {
        let entries = vec![
            entry("2024-01-03", 300.0, 10.0),
            entry("2024-01-02", 200.0, 0.0),
            entry("2024-01-01", 1500.0, 0.0),
        ];
        let output = render(&entries, Some(2), &Currency::default());
        assert!(output.contains("2024-01-03"));
        assert!(output.contains("salary: $300.00"));
        assert!(output.contains("$290.00"));
        assert!(!output.contains("2024-01-01"));
        assert!(output.contains("Showing 2 of 3 entries"));
    }
}
