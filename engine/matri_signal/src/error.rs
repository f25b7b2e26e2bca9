use std::time::Duration;

use thiserror::Error;

/// Errors a predictive-signal provider can report.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("model not available: {0}")]
    Unavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("signal value {0} is not a probability")]
    OutOfRange(f64),
    #[error("no signal within {0:?}")]
    TimedOut(Duration),
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode model: {0}")]
    Json(#[from] serde_json::Error),
}
