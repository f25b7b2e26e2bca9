use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use matri_signal::{LinearSignal, StubSignal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::RiskEngine;
use crate::thresholds::{ThresholdError, ThresholdTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
    #[error("invalid signal settings: {0}")]
    Signal(String),
}

/// Engine settings, usually read from a TOML file at startup.
///
/// ```toml
/// [thresholds]
/// critical_systolic = 160
/// high_systolic = 140
///
/// [signal]
/// timeout_ms = 500
/// model = "models/maternal.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: ThresholdTable,
    #[serde(default)]
    pub signal: SignalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    /// JSON weight file for a linear model. Without one the stub is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
    pub stub_probability: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: RiskEngine::DEFAULT_TIMEOUT.as_millis() as u64,
            model: None,
            stub_probability: StubSignal::DEFAULT_PROBABILITY,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.signal.timeout_ms == 0 {
            return Err(ConfigError::Signal("timeout_ms must be greater than 0".into()));
        }
        if !(0.0..=1.0).contains(&self.signal.stub_probability) {
            return Err(ConfigError::Signal(format!(
                "stub_probability {} is not in [0, 1]",
                self.signal.stub_probability
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.signal.timeout_ms)
    }

    /// Build an engine from these settings.
    ///
    /// A model file that cannot be loaded leaves the engine without a
    /// provider, so assessments continue on rules alone.
    pub fn build_engine(&self) -> Result<RiskEngine, ConfigError> {
        self.validate()?;
        let engine = RiskEngine::new()
            .with_thresholds(self.thresholds)?
            .with_timeout(self.timeout());

        if !self.signal.enabled {
            return Ok(engine);
        }

        match &self.signal.model {
            Some(path) => match LinearSignal::load_model(path) {
                Ok(model) => Ok(engine.with_provider(Arc::new(model))),
                Err(e) => {
                    log::warn!(
                        "predictive model {} not loaded: {e}; continuing without it",
                        path.display()
                    );
                    Ok(engine)
                }
            },
            None => Ok(engine.with_provider(Arc::new(StubSignal::new(
                self.signal.stub_probability,
            )))),
        }
    }
}
