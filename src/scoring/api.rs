//! HTTP client for the scoring service endpoints.

use tracing::{debug, warn};

use super::multipart;
use super::{BatchReply, PredictionResponse, ScoringError, ScoringService};
use crate::batch::UploadedFile;
use crate::config::ClientSettings;
use crate::form::PredictionRequest;
use crate::http_client::{self, MAX_RESPONSE_BYTES};

pub const PREDICT_ENDPOINT: &str = "predict";
pub const BATCH_ENDPOINT: &str = "predict-csv";
const UPLOAD_FIELD: &str = "file";

/// Blocking client bound to one base address.
pub struct HttpScoringClient {
    agent: ureq::Agent,
    api_base: String,
}

impl HttpScoringClient {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            agent: http_client::build_agent(&settings.http),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl ScoringService for HttpScoringClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ScoringError> {
        let url = self.endpoint(PREDICT_ENDPOINT);
        debug!(%url, "posting prediction request");
        let response = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .send_json(request);
        let body = read_success_body(response)?;
        parse_json(&body)
    }

    fn predict_batch(&self, file: &UploadedFile) -> Result<BatchReply, ScoringError> {
        let data = file.read_bytes().map_err(|source| ScoringError::ReadFile {
            path: file
                .path()
                .map(|path| path.to_path_buf())
                .unwrap_or_else(|| file.file_name().into()),
            source,
        })?;
        let body = multipart::single_file(
            UPLOAD_FIELD,
            file.file_name(),
            file.content_type(),
            &data,
        );
        let url = self.endpoint(BATCH_ENDPOINT);
        debug!(%url, file = file.file_name(), bytes = data.len(), "uploading batch file");
        let response = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("Content-Type", &body.content_type())
            .send_bytes(&body.bytes);
        let body = read_success_body(response)?;
        parse_json(&body)
    }
}

fn read_success_body(
    response: Result<ureq::Response, ureq::Error>,
) -> Result<Vec<u8>, ScoringError> {
    match response {
        Ok(response) => {
            http_client::read_response_bytes(response, MAX_RESPONSE_BYTES).map_err(ScoringError::Body)
        }
        Err(ureq::Error::Status(code, _)) => {
            warn!(status = code, "scoring service rejected the request");
            Err(ScoringError::Status(code))
        }
        Err(ureq::Error::Transport(err)) => Err(ScoringError::Transport(err.to_string())),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ScoringError> {
    serde_json::from_slice(body).map_err(|err| ScoringError::Decode(err.to_string()))
}
