//! Pipeline and publishing error types.

use std::path::PathBuf;

use thiserror::Error;
use wicket_core::enums::Recommendation;
use wicket_core::errors::CoreError;
use wicket_lake::LakeError;
use wicket_llm::GatewayError;

/// Errors that end an analysis request.
///
/// Parse failures never appear here: stages fall back instead.
#[derive(Debug, Error)]
pub enum AnalystError {
    /// The model could not be reached (not configured, quota, rate limit).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A query failed where the endpoint has no per-step place to record it.
    #[error(transparent)]
    Lake(#[from] LakeError),

    /// Publishing was refused or failed.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// A blocking worker panicked or was cancelled.
    #[error("Worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Errors from writing a project bundle to disk.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The validation report does not clear the gate.
    #[error(
        "Project not ready to publish. Validation status: {recommendation}. Score: {score}%. Fix issues and re-validate."
    )]
    NotReady {
        recommendation: Recommendation,
        score: f64,
    },

    /// A slug or table id would escape the project directory.
    #[error(transparent)]
    UnsafePath(#[from] CoreError),

    /// Filesystem error.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
