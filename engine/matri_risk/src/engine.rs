use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use matri_signal::{observe, PredictiveSignal};
use matri_vitals::{Vitals, VitalsError};

use crate::assessment::{assess_with, AssessmentResult};
use crate::thresholds::{ThresholdError, ThresholdTable, STANDARD_THRESHOLDS};

/// Threshold table plus an optional predictive-signal provider.
///
/// The engine holds no mutable state. One instance can be shared (behind an
/// `Arc` or by reference) across any number of concurrent assessments.
#[derive(Clone)]
pub struct RiskEngine {
    thresholds: ThresholdTable,
    provider: Option<Arc<dyn PredictiveSignal>>,
    timeout: Duration,
}

impl RiskEngine {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(250);

    /// Standard thresholds, rules only.
    pub fn new() -> Self {
        Self {
            thresholds: STANDARD_THRESHOLDS,
            provider: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Result<Self, ThresholdError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }

    pub fn with_provider(mut self, provider: Arc<dyn PredictiveSignal>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Upper bound on how long to wait for the predictive signal.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Validate `vitals`, query the provider (if any) and score the reading.
    ///
    /// Only validation errors are returned. Provider failures and timeouts
    /// fall back to rule-only scoring.
    pub async fn assess(&self, vitals: &Vitals) -> Result<AssessmentResult, VitalsError> {
        vitals.validate()?;
        let signal = observe(self.provider.as_deref(), vitals, self.timeout).await;
        assess_with(&self.thresholds, vitals, &signal)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RiskEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskEngine")
            .field("thresholds", &self.thresholds)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn PredictiveSignal>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
