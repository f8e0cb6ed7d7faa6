use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc,
    mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError},
};
use std::thread;
use std::time::Duration;

use crate::batch::UploadedFile;
use crate::form::PredictionRequest;
use crate::scoring::{BatchReply, PredictionResponse, ScoringError, ScoringService};

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
    BatchFinished(BatchJobResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) result: Result<PredictionResponse, ScoringError>,
}

#[derive(Debug)]
pub(crate) struct BatchJobResult {
    pub(crate) file_name: String,
    pub(crate) result: Result<BatchReply, ScoringError>,
}

pub(crate) struct ControllerJobs {
    service: Arc<dyn ScoringService>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
}

impl ControllerJobs {
    pub(super) fn new(service: Arc<dyn ScoringService>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            service,
            message_tx,
            message_rx,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn recv_message_timeout(
        &self,
        timeout: Duration,
    ) -> Result<JobMessage, RecvTimeoutError> {
        self.message_rx.recv_timeout(timeout)
    }

    pub(super) fn begin_prediction(&self, request: PredictionRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = run_guarded(|| service.predict(&request));
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult { result }));
        });
    }

    pub(super) fn begin_batch_upload(&self, file: UploadedFile) {
        let service = Arc::clone(&self.service);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let file_name = file.file_name().to_string();
            let result = run_guarded(|| service.predict_batch(&file));
            let _ = tx.send(JobMessage::BatchFinished(BatchJobResult { file_name, result }));
        });
    }
}

/// Run a job body so that a panic still produces a failure message.
fn run_guarded<T>(job: impl FnOnce() -> Result<T, ScoringError>) -> Result<T, ScoringError> {
    match panic::catch_unwind(AssertUnwindSafe(job)) {
        Ok(result) => result,
        Err(payload) => Err(ScoringError::Aborted(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
