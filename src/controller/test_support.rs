use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

use super::*;
use crate::batch::UploadedFile;
use crate::form::{FormField, PredictionRequest, RegionRiesgo, TipoProceso};
use crate::scoring::{BatchReply, PredictionResponse, ScoringError};

/// Holds workers until opened. Starts open.
#[derive(Default)]
pub(super) struct Gate {
    closed: Mutex<bool>,
    changed: Condvar,
}

impl Gate {
    pub(super) fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }

    pub(super) fn open(&self) {
        *self.closed.lock().unwrap() = false;
        self.changed.notify_all();
    }

    fn wait(&self) {
        let mut closed = self.closed.lock().unwrap();
        while *closed {
            closed = self.changed.wait(closed).unwrap();
        }
    }
}

/// Scripted scoring service. Unscripted calls fail with a transport error.
#[derive(Default)]
pub(super) struct FakeService {
    pub(super) predictions: Mutex<VecDeque<Result<PredictionResponse, ScoringError>>>,
    pub(super) batches: Mutex<VecDeque<Result<BatchReply, ScoringError>>>,
    pub(super) requests: Mutex<Vec<PredictionRequest>>,
    pub(super) uploads: Mutex<Vec<String>>,
    pub(super) gate: Gate,
    pub(super) panic_on_predict: bool,
}

impl FakeService {
    pub(super) fn push_prediction(&self, reply: Result<PredictionResponse, ScoringError>) {
        self.predictions.lock().unwrap().push_back(reply);
    }

    pub(super) fn push_batch(&self, reply: Result<BatchReply, ScoringError>) {
        self.batches.lock().unwrap().push_back(reply);
    }
}

impl ScoringService for FakeService {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ScoringError> {
        self.gate.wait();
        self.requests.lock().unwrap().push(request.clone());
        if self.panic_on_predict {
            panic!("scripted panic");
        }
        self.predictions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoringError::Transport("no scripted reply".into())))
    }

    fn predict_batch(&self, file: &UploadedFile) -> Result<BatchReply, ScoringError> {
        self.gate.wait();
        self.uploads.lock().unwrap().push(file.file_name().to_string());
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoringError::Transport("no scripted reply".into())))
    }
}

pub(super) fn controller_with(service: &Arc<FakeService>) -> PredictorController {
    PredictorController::new(service.clone(), ClientSettings::default())
}

/// The sample project: 500000, 12, 5, 1, 0, flags 1/0/0/1, ALTA, Licitación.
pub(super) fn fill_sample_form(controller: &mut PredictorController) {
    controller.set_field(FormField::CostoTotal, "500000").unwrap();
    controller.set_field(FormField::PlazoMeses, "12").unwrap();
    controller.set_field(FormField::AdicionalesPct, "5").unwrap();
    controller.set_field(FormField::Ampliaciones, "1").unwrap();
    controller.set_field(FormField::Penalidades, "0").unwrap();
    controller.set_field(FormField::BajaCompetencia, true).unwrap();
    controller.set_field(FormField::EmpresaSancionada, false).unwrap();
    controller.set_field(FormField::Consorcio, false).unwrap();
    controller.set_field(FormField::ExperienciaEntidad, true).unwrap();
    controller.set_field(FormField::RegionRiesgo, RegionRiesgo::Alta).unwrap();
    controller
        .set_field(FormField::TipoProceso, TipoProceso::Licitacion)
        .unwrap();
}

pub(super) fn response(prob_riesgo: f64, pred_riesgo: i64, flags: &[&str]) -> PredictionResponse {
    PredictionResponse {
        prob_riesgo,
        pred_riesgo,
        top_flags: Some(flags.iter().map(|flag| flag.to_string()).collect()),
    }
}

pub(super) const WAIT: std::time::Duration = std::time::Duration::from_secs(5);
