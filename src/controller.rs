//! Session state for the prediction client.
//!
//! [`PredictorController`] owns the form, the single and batch coordinators
//! and the background job channel. A front end calls the action methods,
//! calls [`PredictorController::poll_background_jobs`] once per loop
//! iteration, and reads state back through the accessors.

mod background_jobs;
mod batch;
mod jobs;
mod lifecycle;
mod single;
mod status;

#[cfg(test)]
mod test_support;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::ClientSettings;
use crate::form::FormStateStore;
use crate::scoring::{HttpScoringClient, ScoringService};

pub use lifecycle::RequestLifecycle;
pub use status::{Notification, StatusLine, StatusTone};

use batch::BatchState;
use jobs::ControllerJobs;
use single::SingleState;

/// Shown for every failed round trip; details go to the log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error en respuesta del servidor";
/// Shown when an upload is requested before a file was chosen.
pub const NO_FILE_MESSAGE: &str = "Selecciona un archivo CSV primero.";

/// Maintains client state and bridges the scoring service to a front end.
pub struct PredictorController {
    settings: ClientSettings,
    form: FormStateStore,
    single: SingleState,
    batch: BatchState,
    jobs: ControllerJobs,
    status: StatusLine,
    notifications: VecDeque<Notification>,
}

impl PredictorController {
    pub fn new(service: Arc<dyn ScoringService>, settings: ClientSettings) -> Self {
        Self {
            settings,
            form: FormStateStore::new(),
            single: SingleState::default(),
            batch: BatchState::default(),
            jobs: ControllerJobs::new(service),
            status: StatusLine::default(),
            notifications: VecDeque::new(),
        }
    }

    /// Controller talking to the HTTP scoring service named in `settings`.
    pub fn with_http_client(settings: ClientSettings) -> Self {
        let client = HttpScoringClient::new(&settings);
        Self::new(Arc::new(client), settings)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Pop the oldest pending notification. Each one is delivered once.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    /// True while either coordinator has a request in flight.
    pub fn is_busy(&self) -> bool {
        self.is_single_busy() || self.is_batch_busy()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = StatusLine {
            text: text.into(),
            tone,
        };
    }

    fn notify(&mut self, message: impl Into<String>, tone: StatusTone) {
        let message = message.into();
        self.set_status(message.clone(), tone);
        self.notifications.push_back(Notification { message, tone });
    }
}
