use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::{BatchRow, column_order};
use crate::wire::format_number;

/// File name offered for the downloaded predictions.
pub const EXPORT_FILE_NAME: &str = "predicciones.csv";
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No rows to export")]
    Empty,
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Directory(#[from] crate::app_dirs::AppDirError),
}

/// A ready-to-save CSV download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Encode one cell as a JSON literal.
///
/// Strings come out quoted with JSON escapes, so commas, quotes and newlines
/// survive inside a cell. This is not RFC 4180 quoting. Missing and null
/// cells become `""`.
pub fn encode_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "\"\"".to_string(),
        Some(Value::Number(number)) => format_number(number),
        Some(other) => other.to_string(),
    }
}

/// Header line plus one line per row, joined with `\n`.
///
/// `None` when there is nothing to export.
pub fn encode_csv(rows: &[BatchRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let columns = column_order(rows);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(","));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| encode_cell(row.get(column)))
            .collect();
        lines.push(cells.join(","));
    }
    Some(lines.join("\n"))
}

pub fn export_rows(rows: &[BatchRow]) -> Option<ExportArtifact> {
    encode_csv(rows).map(|contents| ExportArtifact {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: EXPORT_MIME,
        contents,
    })
}

/// Write the artifact into `dir`, replacing a previous export of the same name.
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, artifact.contents.as_bytes()).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Reverse [`encode_cell`] for a whole data line.
///
/// A data line is a comma-separated list of JSON literals, which is exactly
/// the inside of a JSON array.
pub fn decode_line(line: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(&format!("[{line}]"))
}
