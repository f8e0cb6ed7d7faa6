//! Wire contract with the remote scoring service.
//!
//! [`ScoringService`] is the seam the controller talks to; [`HttpScoringClient`]
//! is the production implementation over HTTP.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::batch::{BatchRow, UploadedFile};
use crate::form::PredictionRequest;

mod api;
mod multipart;

pub use api::{BATCH_ENDPOINT, HttpScoringClient, PREDICT_ENDPOINT};

/// Reply to a single prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prob_riesgo: f64,
    /// The service's binary decision; `1` means high risk.
    pub pred_riesgo: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_flags: Option<Vec<String>>,
}

/// Reply to a batch upload. Absent or null `rows` decode as no rows.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BatchReplyWire")]
pub struct BatchReply {
    pub rows: Vec<BatchRow>,
    pub count: Option<u64>,
}

#[derive(Deserialize)]
struct BatchReplyWire {
    #[serde(default)]
    rows: Option<Vec<BatchRow>>,
    #[serde(default)]
    count: Option<u64>,
}

impl From<BatchReplyWire> for BatchReply {
    fn from(wire: BatchReplyWire) -> Self {
        Self {
            rows: wire.rows.unwrap_or_default(),
            count: wire.count,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// The service answered with a non-success status. The body is not read.
    #[error("Scoring service responded with HTTP {0}")]
    Status(u16),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    Body(std::io::Error),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Scoring job stopped unexpectedly: {0}")]
    Aborted(String),
}

/// Calls the scoring service. Implementations are shared with worker threads.
pub trait ScoringService: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ScoringError>;

    fn predict_batch(&self, file: &UploadedFile) -> Result<BatchReply, ScoringError>;
}
