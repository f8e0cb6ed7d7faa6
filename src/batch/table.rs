use serde_json::Value;

use super::{BatchRow, column_order};
use crate::wire::format_number;

/// On-screen table for held batch rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Text shown in a table cell: strings unquoted, missing cells blank.
pub fn display_cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => format_number(number),
        Some(other) => other.to_string(),
    }
}

/// `None` when there are no rows, so nothing is drawn.
pub fn table(rows: &[BatchRow]) -> Option<BatchTable> {
    if rows.is_empty() {
        return None;
    }
    let columns = column_order(rows);
    let cells = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| display_cell(row.get(column)))
                .collect()
        })
        .collect();
    Some(BatchTable {
        columns,
        rows: cells,
    })
}
