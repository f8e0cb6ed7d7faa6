use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::jobs::BatchJobResult;
use super::{
    GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE, PredictorController, RequestLifecycle, StatusTone,
};
use crate::app_dirs;
use crate::batch::{self, BatchRow, BatchTable, ExportArtifact, ExportError, UploadedFile};

#[derive(Debug, Default)]
pub(super) struct BatchState {
    pub(super) selected: Option<UploadedFile>,
    pub(super) rows: Vec<BatchRow>,
    pub(super) count: Option<u64>,
    pub(super) lifecycle: RequestLifecycle,
}

impl PredictorController {
    /// Remember the file for the next upload. No network effect.
    pub fn select_file(&mut self, file: UploadedFile) {
        if !file.is_csv() {
            debug!(file = file.file_name(), "selected file has no .csv extension");
        }
        self.set_status(
            format!("Archivo seleccionado: {}", file.file_name()),
            StatusTone::Info,
        );
        self.batch.selected = Some(file);
    }

    pub fn selected_file(&self) -> Option<&UploadedFile> {
        self.batch.selected.as_ref()
    }

    pub fn upload_enabled(&self) -> bool {
        self.batch.selected.is_some() && !self.batch.lifecycle.is_busy()
    }

    /// Post the selected file to the batch endpoint.
    ///
    /// Without a selected file the user is told to pick one. The file handle
    /// moves into the upload job.
    pub fn upload_batch(&mut self) -> bool {
        if self.batch.lifecycle.is_busy() {
            debug!("batch upload already in flight; upload ignored");
            return false;
        }
        let Some(file) = self.batch.selected.take() else {
            self.notify(NO_FILE_MESSAGE, StatusTone::Warning);
            return false;
        };
        self.batch.lifecycle.begin();
        info!(file = file.file_name(), "batch upload requested");
        self.set_status(
            format!("Procesando {}...", file.file_name()),
            StatusTone::Busy,
        );
        self.jobs.begin_batch_upload(file);
        true
    }

    pub fn is_batch_busy(&self) -> bool {
        self.batch.lifecycle.is_busy()
    }

    pub fn batch_lifecycle(&self) -> RequestLifecycle {
        self.batch.lifecycle
    }

    pub fn batch_rows(&self) -> &[BatchRow] {
        &self.batch.rows
    }

    /// Row count reported by the service for the last batch, if any.
    pub fn batch_count(&self) -> Option<u64> {
        self.batch.count
    }

    pub fn batch_table(&self) -> Option<BatchTable> {
        batch::table(&self.batch.rows)
    }

    pub fn export_enabled(&self) -> bool {
        !self.batch.rows.is_empty()
    }

    pub fn export_rows(&self) -> Option<ExportArtifact> {
        batch::export_rows(&self.batch.rows)
    }

    /// Write the export into `dir`, the configured export directory, or the
    /// app exports directory, in that order of preference.
    pub fn save_export(&mut self, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        let artifact = self.export_rows().ok_or(ExportError::Empty)?;
        let dir = match dir.or(self.settings.export_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => app_dirs::exports_dir()?,
        };
        let path = batch::write_artifact(&artifact, &dir)?;
        info!(path = %path.display(), rows = self.batch.rows.len(), "predictions exported");
        self.set_status(
            format!("Exportado a {}", path.display()),
            StatusTone::Info,
        );
        Ok(path)
    }

    pub(super) fn apply_batch_result(&mut self, message: BatchJobResult) {
        self.batch.lifecycle.settle(&message.result);
        match message.result {
            Ok(reply) => {
                info!(
                    file = %message.file_name,
                    rows = reply.rows.len(),
                    count = ?reply.count,
                    "batch predictions received"
                );
                self.batch.rows = reply.rows;
                self.batch.count = reply.count;
                self.set_status(
                    format!("{} filas procesadas", self.batch.rows.len()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                warn!(file = %message.file_name, error = %err, "batch upload failed");
                self.notify(GENERIC_FAILURE_MESSAGE, StatusTone::Error);
            }
        }
    }
}
