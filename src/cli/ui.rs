use crate::core::{Currency, PacingStatus};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

const PROGRESS_BAR_WIDTH: usize = 30;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Colours a pacing status: green ahead, yellow on track, orange slightly
/// behind, red far behind.
pub fn style_status(status: PacingStatus) -> String {
    let text = status.to_string();
    let styled = match status {
        PacingStatus::Ahead => style(text).green().bold(),
        PacingStatus::OnTrack => style(text).yellow().bold(),
        PacingStatus::SlightlyBehind => style(text).color256(208).bold(),
        PacingStatus::FarBehind => style(text).red().bold(),
    };
    styled.to_string()
}

/// Formats an amount with the currency symbol, thousands separators and two
/// decimals, e.g. `-$1,234.50`.
pub fn format_money(amount: f64, currency: &Currency) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{grouped}.{fraction}", currency.symbol)
}

/// Text progress bar for a percentage, filled up to 100%.
pub fn progress_bar(percentage: f64) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        style("#".repeat(filled)).green(),
        style("-".repeat(PROGRESS_BAR_WIDTH - filled)).dim()
    )
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned money cell.
pub fn money_cell(amount: f64, currency: &Currency) -> Cell {
    Cell::new(format_money(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Right-aligned money cell coloured by sign.
pub fn net_cell(amount: f64, currency: &Currency) -> Cell {
    let cell = money_cell(amount, currency);
    if amount >= 0.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

/// Signed percentage change, e.g. `+12.5%`.
pub fn format_change(percentage: f64, change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{percentage:.1}%")
}
