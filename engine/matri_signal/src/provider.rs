use std::time::Duration;

use async_trait::async_trait;
use matri_vitals::Vitals;

use crate::error::SignalError;

/// Source of a model-derived risk probability.
///
/// Implementations may be slow or fail outright; callers are expected to go
/// through [`observe`], which bounds the wait and folds every failure into a
/// [`SignalOutcome`].
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PredictiveSignal: Send + Sync {
    /// Estimate the probability of an adverse outcome for this reading.
    async fn predict(&self, vitals: &Vitals) -> Result<f64, SignalError>;
}

/// What the engine learned from the predictive signal for one assessment.
#[derive(Debug)]
pub enum SignalOutcome {
    Value(f64),
    Unavailable,
    Failed(SignalError),
}

impl SignalOutcome {
    /// The probability, if one was obtained and lies in `[0, 1]`.
    pub fn probability(&self) -> Option<f64> {
        match self {
            SignalOutcome::Value(p) if (0.0..=1.0).contains(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SignalOutcome::Failed(_))
    }
}

impl From<Option<f64>> for SignalOutcome {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(p) => SignalOutcome::Value(p),
            None => SignalOutcome::Unavailable,
        }
    }
}

impl From<Result<f64, SignalError>> for SignalOutcome {
    fn from(value: Result<f64, SignalError>) -> Self {
        match value {
            Ok(p) => SignalOutcome::Value(p),
            Err(e) => SignalOutcome::Failed(e),
        }
    }
}

/// Query `provider` for a probability, waiting at most `timeout`.
///
/// Never retries. A missing provider, or one reporting
/// [`SignalError::Unavailable`], yields [`SignalOutcome::Unavailable`]; any
/// other error, an elapsed timeout or a value outside `[0, 1]` yields
/// [`SignalOutcome::Failed`].
pub async fn observe(
    provider: Option<&dyn PredictiveSignal>,
    vitals: &Vitals,
    timeout: Duration,
) -> SignalOutcome {
    let Some(provider) = provider else {
        log::info!("no predictive signal configured; using rules only");
        return SignalOutcome::Unavailable;
    };

    match tokio::time::timeout(timeout, provider.predict(vitals)).await {
        Ok(Ok(p)) if (0.0..=1.0).contains(&p) => SignalOutcome::Value(p),
        Ok(Ok(p)) => {
            log::warn!("predictive signal returned {p}, ignoring it");
            SignalOutcome::Failed(SignalError::OutOfRange(p))
        }
        Ok(Err(SignalError::Unavailable(reason))) => {
            log::info!("predictive signal unavailable ({reason}); using rules only");
            SignalOutcome::Unavailable
        }
        Ok(Err(e)) => {
            log::warn!("predictive signal failed: {e}; using rules only");
            SignalOutcome::Failed(e)
        }
        Err(_) => {
            log::warn!("predictive signal timed out after {timeout:?}; using rules only");
            SignalOutcome::Failed(SignalError::TimedOut(timeout))
        }
    }
}

/// Placeholder provider that always reports the same probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StubSignal {
    pub probability: f64,
}

impl StubSignal {
    pub const DEFAULT_PROBABILITY: f64 = 0.1;

    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl Default for StubSignal {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROBABILITY)
    }
}

#[async_trait]
impl PredictiveSignal for StubSignal {
    async fn predict(&self, _vitals: &Vitals) -> Result<f64, SignalError> {
        Ok(self.probability)
    }
}
