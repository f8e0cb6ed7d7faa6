//! Batch rows returned by the scoring service, their on-screen table and the
//! downloadable CSV re-encoding.
//!
//! Rows are schema-less: the service decides the columns. The first row's key
//! order is the canonical column order everywhere, see [`column_order`].

mod export;
mod file;
mod table;

pub use export::{
    EXPORT_FILE_NAME, EXPORT_MIME, ExportArtifact, ExportError, decode_line, encode_cell,
    encode_csv, export_rows, write_artifact,
};
pub use file::UploadedFile;
pub use table::{BatchTable, display_cell, table};

/// One scored row: column name to value, in the order the service sent them.
pub type BatchRow = serde_json::Map<String, serde_json::Value>;

/// Columns the scoring service needs in an uploaded file.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "costo_total",
    "plazo_meses",
    "adicionales_pct",
    "ampliaciones",
    "penalidades",
    "baja_competencia",
    "empresa_sancionada",
    "consorcio",
    "experiencia_entidad",
    "region_riesgo",
    "tipo_proceso",
];

/// Column order for display and export: the keys of the first row.
///
/// Later rows are assumed, not checked, to share the same keys.
pub fn column_order(rows: &[BatchRow]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn rows_from_json(json: serde_json::Value) -> Vec<BatchRow> {
    serde_json::from_value(json).unwrap()
}
