// Plain-text rendering of tables and winner records for the terminal.

use raffle_engine::Table;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

/// Renders a table with aligned columns, a header and a separator line.
pub fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in table.rows.iter() {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).cloned().unwrap_or(0)))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(render_row(&table.columns));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in table.rows.iter() {
        lines.push(render_row(row));
    }
    lines.push(format!("({} row(s))", table.len()));
    lines.join("\n")
}

/// Renders one record as `COLUMN: value` lines, the way the original tool
/// announced a winner.
pub fn render_record(columns: &[String], row: &[String]) -> String {
    columns
        .iter()
        .zip(row.iter())
        .map(|(c, v)| format!("{}: {}", c, v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The winner record as a JSON object, keyed by column name.
pub fn record_to_json(columns: &[String], row: &[String]) -> JSValue {
    let mut obj: JSMap<String, JSValue> = JSMap::new();
    for (c, v) in columns.iter().zip(row.iter()) {
        obj.insert(c.clone(), json!(v));
    }
    JSValue::Object(obj)
}
