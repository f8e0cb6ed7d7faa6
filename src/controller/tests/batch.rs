use std::sync::Arc;

use serde_json::json;

use super::super::test_support::*;
use super::super::*;
use crate::batch::{ExportError, UploadedFile, rows_from_json};
use crate::scoring::{BatchReply, ScoringError};

fn reply(rows: serde_json::Value) -> BatchReply {
    let rows = rows_from_json(rows);
    BatchReply {
        count: Some(rows.len() as u64),
        rows,
    }
}

fn sample_file() -> UploadedFile {
    UploadedFile::from_bytes("obras.csv", b"costo_total,plazo_meses\n1000,3\n".to_vec())
}

fn controller_with_rows(service: &Arc<FakeService>) -> PredictorController {
    service.push_batch(Ok(reply(json!([
        {"a": 1, "b": "x,y"},
        {"a": 2, "b": "z"}
    ]))));
    let mut controller = controller_with(service);
    controller.select_file(sample_file());
    assert!(controller.upload_batch());
    assert!(controller.wait_until_idle(WAIT));
    controller
}

#[test]
fn upload_without_file_asks_for_one() {
    let service = Arc::new(FakeService::default());
    let mut controller = controller_with(&service);
    assert!(!controller.upload_enabled());
    assert!(!controller.upload_batch());
    assert!(!controller.is_batch_busy());

    let notification = controller.take_notification().unwrap();
    assert_eq!(notification.message, NO_FILE_MESSAGE);
    assert_eq!(notification.tone, StatusTone::Warning);
    assert!(controller.take_notification().is_none());
    assert!(service.uploads.lock().unwrap().is_empty());
}

#[test]
fn upload_replaces_rows_and_enables_export() {
    let service = Arc::new(FakeService::default());
    let controller = controller_with_rows(&service);

    assert_eq!(*service.uploads.lock().unwrap(), vec!["obras.csv".to_string()]);
    assert_eq!(controller.batch_lifecycle(), RequestLifecycle::Succeeded);
    assert_eq!(controller.batch_rows().len(), 2);
    assert_eq!(controller.batch_count(), Some(2));
    assert!(controller.selected_file().is_none());
    assert!(controller.export_enabled());

    let artifact = controller.export_rows().unwrap();
    assert_eq!(artifact.file_name, "predicciones.csv");
    assert_eq!(artifact.contents, "a,b\n1,\"x,y\"\n2,\"z\"");

    let table = controller.batch_table().unwrap();
    assert_eq!(table.columns, vec!["a", "b"]);
    assert_eq!(table.rows[0], vec!["1", "x,y"]);
}

#[test]
fn empty_reply_disables_export() {
    let service = Arc::new(FakeService::default());
    service.push_batch(Ok(reply(json!([]))));
    let mut controller = controller_with(&service);
    controller.select_file(sample_file());
    controller.upload_batch();
    assert!(controller.wait_until_idle(WAIT));

    assert!(!controller.export_enabled());
    assert!(controller.export_rows().is_none());
    assert!(controller.batch_table().is_none());
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        controller.save_export(Some(dir.path())),
        Err(ExportError::Empty)
    ));
}

#[test]
fn failed_upload_keeps_previous_rows() {
    let service = Arc::new(FakeService::default());
    let mut controller = controller_with_rows(&service);
    service.push_batch(Err(ScoringError::Status(422)));
    controller.select_file(sample_file());
    controller.upload_batch();
    assert!(controller.wait_until_idle(WAIT));

    assert_eq!(controller.batch_lifecycle(), RequestLifecycle::Failed);
    assert_eq!(controller.batch_rows().len(), 2);
    assert_eq!(
        controller.take_notification().map(|n| n.message),
        Some(GENERIC_FAILURE_MESSAGE.to_string())
    );
}

#[test]
fn save_export_prefers_explicit_then_configured_dir() {
    let service = Arc::new(FakeService::default());
    let mut controller = controller_with_rows(&service);
    let explicit = tempfile::tempdir().unwrap();
    let path = controller.save_export(Some(explicit.path())).unwrap();
    assert_eq!(path, explicit.path().join("predicciones.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "a,b\n1,\"x,y\"\n2,\"z\""
    );

    let configured = tempfile::tempdir().unwrap();
    controller.settings.export_dir = Some(configured.path().join("out"));
    let path = controller.save_export(None).unwrap();
    assert_eq!(path, configured.path().join("out").join("predicciones.csv"));
}

#[test]
fn save_export_falls_back_to_app_exports_dir() {
    let base = tempfile::tempdir().unwrap();
    let _guard = crate::app_dirs::ConfigBaseGuard::set(base.path().to_path_buf());
    let service = Arc::new(FakeService::default());
    let mut controller = controller_with_rows(&service);
    let path = controller.save_export(None).unwrap();
    assert_eq!(
        path,
        base.path()
            .join(crate::app_dirs::APP_DIR_NAME)
            .join("exports")
            .join("predicciones.csv")
    );
    assert!(path.is_file());
}

#[test]
fn single_and_batch_run_independently() {
    let service = Arc::new(FakeService::default());
    service.gate.close();
    service.push_prediction(Ok(response(0.1, 0, &[])));
    service.push_batch(Ok(reply(json!([{"a": 1}]))));
    let mut controller = controller_with(&service);
    fill_sample_form(&mut controller);
    controller.select_file(sample_file());

    assert!(controller.submit_prediction());
    assert!(controller.upload_batch());
    assert!(controller.is_single_busy());
    assert!(controller.is_batch_busy());
    assert!(controller.is_busy());

    service.gate.open();
    assert!(controller.wait_until_idle(WAIT));
    assert!(controller.result().is_some());
    assert_eq!(controller.batch_rows().len(), 1);
}
