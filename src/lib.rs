//! Client library for the public works corruption-risk scoring service.
/// Application directory layout.
pub mod app_dirs;
/// Batch rows, their table view and CSV export.
pub mod batch;
/// Persistent client settings.
pub mod config;
/// Session state and background request handling.
pub mod controller;
/// Single-project form state and request payload.
pub mod form;
mod http_client;
/// Tracing setup for the binary.
pub mod logging;
/// Display derivation for prediction replies.
pub mod presenter;
/// Scoring service wire types and HTTP client.
pub mod scoring;
mod wire;
