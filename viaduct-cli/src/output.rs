//! Plain-text table rendering for query reports.

use serde_json::Value;
use viaduct_core::query::QueryReport;

pub(crate) fn print_table(report: &QueryReport) {
    println!("--- {}: {} ---", report.query, report.description);

    let mut widths: Vec<usize> = report.columns.iter().map(|c| c.len()).collect();
    let rows: Vec<Vec<String>> = report
        .results
        .iter()
        .map(|row| {
            report
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = render_cell(&row[*column]);
                    widths[i] = widths[i].max(cell.len());
                    cell
                })
                .collect()
        })
        .collect();

    println!("{}", format_row(report.columns.iter().copied(), &widths));
    for row in &rows {
        println!("{}", format_row(row.iter().map(String::as_str), &widths));
    }
    println!("Count: {}\n", report.count);
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
