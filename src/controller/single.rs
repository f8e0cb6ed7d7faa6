use tracing::{debug, info, warn};

use super::jobs::PredictionJobResult;
use super::{GENERIC_FAILURE_MESSAGE, PredictorController, RequestLifecycle, StatusTone};
use crate::form::{FieldValue, FormError, FormField, FormStateStore, PredictionForm};
use crate::presenter::{self, ResultView};
use crate::scoring::PredictionResponse;

#[derive(Debug, Default)]
pub(super) struct SingleState {
    pub(super) lifecycle: RequestLifecycle,
    pub(super) result: Option<PredictionResponse>,
}

impl PredictorController {
    pub fn form(&self) -> &PredictionForm {
        self.form.form()
    }

    pub fn form_store(&self) -> &FormStateStore {
        &self.form
    }

    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        self.form.set(field, value)
    }

    /// Set a field from user text, addressed by its wire name.
    pub fn set_field_from_str(&mut self, name: &str, text: &str) -> Result<(), FormError> {
        self.form.set_from_str(name, text)
    }

    /// Restore the default form and drop the displayed result.
    ///
    /// A request already in flight is not cancelled; its reply is still shown.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.single.result = None;
        self.set_status("Formulario reiniciado", StatusTone::Idle);
    }

    pub fn submit_enabled(&self) -> bool {
        self.form.can_submit() && !self.single.lifecycle.is_busy()
    }

    /// Start a prediction for the current form.
    ///
    /// Returns `false` without side effects when the trigger is disabled.
    pub fn submit_prediction(&mut self) -> bool {
        if self.single.lifecycle.is_busy() {
            debug!("prediction already in flight; submit ignored");
            return false;
        }
        let Some(request) = self.form.form().to_request() else {
            debug!(
                invalid = ?self.form.form().invalid_fields(),
                "form incomplete; submit ignored"
            );
            return false;
        };
        self.single.lifecycle.begin();
        info!("prediction requested");
        self.set_status("Consultando modelo...", StatusTone::Busy);
        self.jobs.begin_prediction(request);
        true
    }

    pub fn is_single_busy(&self) -> bool {
        self.single.lifecycle.is_busy()
    }

    pub fn single_lifecycle(&self) -> RequestLifecycle {
        self.single.lifecycle
    }

    pub fn result(&self) -> Option<&PredictionResponse> {
        self.single.result.as_ref()
    }

    pub fn result_view(&self) -> Option<ResultView> {
        self.single.result.as_ref().map(presenter::present)
    }

    pub(super) fn apply_prediction_result(&mut self, message: PredictionJobResult) {
        self.single.lifecycle.settle(&message.result);
        match message.result {
            Ok(response) => {
                info!(
                    prob_riesgo = response.prob_riesgo,
                    pred_riesgo = response.pred_riesgo,
                    "prediction received"
                );
                let view = presenter::present(&response);
                self.single.result = Some(response);
                self.set_status(
                    format!("{} ({})", view.verdict.label(), view.percentage),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                warn!(error = %err, "prediction failed");
                self.notify(GENERIC_FAILURE_MESSAGE, StatusTone::Error);
            }
        }
    }
}
