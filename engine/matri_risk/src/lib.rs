//! Maternal risk assessment.
//!
//! [`assess`] is a pure function from a vitals reading and an already-observed
//! predictive signal to an [`AssessmentResult`]. [`RiskEngine`] adds the async
//! step of querying a [`PredictiveSignal`] provider under a timeout.

pub mod assessment;
pub mod config;
pub mod engine;
pub mod thresholds;
pub mod tier;

pub use assessment::{assess, assess_with, AssessmentResult};
pub use config::{ConfigError, EngineConfig, SignalConfig};
pub use engine::RiskEngine;
pub use thresholds::{ThresholdError, ThresholdTable, STANDARD_THRESHOLDS};
pub use tier::{DisplayColor, RiskTier};

pub use matri_signal::{PredictiveSignal, SignalError, SignalOutcome};
pub use matri_vitals::{VitalField, Vitals, VitalsError, VitalsRecord};
