use kopi_core::{ForecastRow, ForecastTable, Projection};

use super::format::format_amount;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    alignment: Alignment,
}

const COLUMNS: [Column; 5] = [
    Column {
        header: "",
        alignment: Alignment::Left,
    },
    Column {
        header: "Monthly",
        alignment: Alignment::Right,
    },
    Column {
        header: "Daily",
        alignment: Alignment::Right,
    },
    Column {
        header: "Yearly",
        alignment: Alignment::Right,
    },
    Column {
        header: "Decade",
        alignment: Alignment::Right,
    },
];

/// Renders the forecast as a fixed-width text table.
///
/// Summary rows come first (income, expenses, balance); detail rows are indented
/// under the income and expense rows.
pub fn render_forecast_table(table: &ForecastTable) -> String {
    let mut rows = Vec::new();
    rows.push(projection_row("Income", &table.income));
    rows.extend(table.income_details.iter().map(detail_row));
    rows.push(projection_row("Expenses", &table.expenses));
    rows.extend(table.expense_details.iter().map(detail_row));
    rows.push(projection_row("Balance", &table.balance));

    let widths = compute_widths(&rows);
    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|c| c.header.to_string()).collect();
    out.push_str(&render_row(&header, &widths));
    out.push('\n');
    out.push_str(&horizontal_rule(&widths));
    for row in &rows {
        out.push('\n');
        out.push_str(&render_row(row, &widths));
    }
    out
}

fn projection_row(label: &str, projection: &Projection) -> Vec<String> {
    vec![
        label.to_string(),
        format_amount(projection.monthly),
        format_amount(projection.daily),
        format_amount(projection.yearly),
        format_amount(projection.decade),
    ]
}

fn detail_row(row: &ForecastRow) -> Vec<String> {
    projection_row(&format!("  {}", row.label), &row.projection)
}

fn compute_widths(rows: &[Vec<String>]) -> Vec<usize> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .fold(column.header.chars().count(), usize::max)
        })
        .collect()
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (column, width))| {
            let text = row.get(idx).map(String::as_str).unwrap_or("");
            let remaining = width.saturating_sub(text.chars().count());
            match column.alignment {
                Alignment::Left => format!("{}{}", text, " ".repeat(remaining)),
                Alignment::Right => format!("{}{}", " ".repeat(remaining), text),
            }
        })
        .collect();
    cells.join(" | ").trim_end().to_string()
}

fn horizontal_rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-")
}
