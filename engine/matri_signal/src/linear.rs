use std::fs::read_to_string;
use std::path::Path;

use async_trait::async_trait;
use matri_vitals::Vitals;
use serde::{Deserialize, Serialize};

use crate::error::SignalError;
use crate::provider::PredictiveSignal;

/// Number of features fed to a [`LinearSignal`].
pub const FEATURE_COUNT: usize = 4;

/// Scaled feature vector: systolic, diastolic, proteinuria grade, and fetal
/// heart rate distance from 140 bpm.
pub fn features(vitals: &Vitals) -> [f64; FEATURE_COUNT] {
    [
        vitals.systolic / 200.0,
        vitals.diastolic / 120.0,
        f64::from(vitals.proteinuria) / 4.0,
        (vitals.fetal_heart_rate - 140.0).abs() / 60.0,
    ]
}

/// A weighted sum over [`features`], clamped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSignal {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub model_name: String,
}

impl LinearSignal {
    pub fn new(
        weights: Vec<f64>,
        bias: f64,
        model_name: impl Into<String>,
    ) -> Result<Self, SignalError> {
        let model = Self {
            weights,
            bias,
            model_name: model_name.into(),
        };
        model.check()?;
        Ok(model)
    }

    /// Load weights from a JSON file written by `serde_json`.
    pub fn load_model(path: impl AsRef<Path>) -> Result<Self, SignalError> {
        let s = read_to_string(path)?;
        let model: LinearSignal = serde_json::from_str(&s)?;
        model.check()?;
        log::debug!("loaded predictive model '{}'", model.model_name);
        Ok(model)
    }

    fn check(&self) -> Result<(), SignalError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(SignalError::InvalidModel(format!(
                "expected {} weights, got {}",
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(SignalError::InvalidModel(format!(
                "model '{}' has non-finite parameters",
                self.model_name
            )));
        }
        Ok(())
    }

    pub fn score(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let s = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>();
        (s + self.bias).clamp(0.0, 1.0)
    }
}

#[async_trait]
impl PredictiveSignal for LinearSignal {
    async fn predict(&self, vitals: &Vitals) -> Result<f64, SignalError> {
        Ok(self.score(&features(vitals)))
    }
}
