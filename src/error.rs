//! Error types for Paceline

use thiserror::Error;

/// Errors that can occur while configuring or exporting the pipeline
///
/// The pipeline itself never fails after construction: sample updates are
/// plain arithmetic. Everything here is raised either at construction time
/// or while encoding a snapshot.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("smoothing window must hold at least one sample, got {0}")]
    InvalidWindowSize(usize),

    #[error("smoothing factor must be within (0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
