/// Plain-text rendering of grid traversals for the interactive shell
///
/// Tables are tab-separated with one decimal place; empty cells print as `-`.
use crate::grid::{ComplexityEntry, GridStore};

const MISSING: &str = "-";
const RULE: &str = "-----------------------------";

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => MISSING.to_string(),
    }
}

fn render_table<'a>(
    title: &str,
    corner: &str,
    headers: impl Iterator<Item = String>,
    rows: impl Iterator<Item = (String, &'a [Option<f64>])>,
) -> String {
    let mut out = format!("\n--- {title} ---\n{corner}\t| ");
    for header in headers {
        out.push_str(&header);
        out.push('\t');
    }
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');

    for (label, values) in rows {
        out.push_str(&label);
        out.push_str("\t| ");
        for value in values {
            out.push_str(&format_cell(*value));
            out.push('\t');
        }
        out.push('\n');
    }
    out
}

/// Years down, cities across
pub fn render_row_major(grid: &GridStore) -> String {
    let rows = grid.row_major();
    render_table(
        "Row-Major Access",
        "Year",
        grid.cities().iter().cloned(),
        rows.iter().map(|r| (r.year.to_string(), r.values.as_slice())),
    )
}

/// Cities down, years across
pub fn render_column_major(grid: &GridStore) -> String {
    let columns = grid.column_major();
    render_table(
        "Column-Major Access",
        "City",
        grid.years().map(|y| y.to_string()),
        columns.iter().map(|c| (c.city.clone(), c.values.as_slice())),
    )
}

pub fn render_sparse(grid: &GridStore) -> String {
    let mut out = String::from("\n--- Sparse Data (Only Valid Records) ---\n");
    out.push_str("Year\tCity\tTemperature\n");
    for entry in grid.sparse() {
        out.push_str(&format!(
            "{}\t{}\t{:.1}\n",
            entry.year, entry.city, entry.temperature
        ));
    }
    out
}

pub fn render_complexity(entries: &[ComplexityEntry]) -> String {
    let mut out = String::from("\n--- Complexity Analysis ---\n");
    for entry in entries {
        out.push_str(&format!(
            "{}: Time {}, Space {}\n",
            entry.operation, entry.time, entry.space
        ));
    }
    out
}
