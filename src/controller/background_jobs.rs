use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use super::PredictorController;
use super::jobs::JobMessage;

impl PredictorController {
    /// Apply every finished job. Call once per loop iteration.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            self.handle_job_message(message);
        }
    }

    /// Block until no request is in flight or `timeout` elapses.
    ///
    /// Returns `true` when the controller went idle.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll_background_jobs();
            if !self.is_busy() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.jobs.recv_message_timeout(remaining) {
                Ok(message) => self.handle_job_message(message),
                Err(RecvTimeoutError::Timeout) => return !self.is_busy(),
                Err(RecvTimeoutError::Disconnected) => return !self.is_busy(),
            }
        }
    }

    fn handle_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::PredictionFinished(message) => self.apply_prediction_result(message),
            JobMessage::BatchFinished(message) => self.apply_batch_result(message),
        }
    }
}
