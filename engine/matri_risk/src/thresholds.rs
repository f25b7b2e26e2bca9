use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clinical cutoffs used by the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub critical_systolic: f64,
    pub critical_diastolic: f64,
    pub high_systolic: f64,
    pub high_diastolic: f64,
    pub fetal_hr_low: f64,
    pub fetal_hr_high: f64,
}

/// Standard antenatal cutoffs (mmHg and bpm).
pub const STANDARD_THRESHOLDS: ThresholdTable = ThresholdTable {
    critical_systolic: 160.0,
    critical_diastolic: 110.0,
    high_systolic: 140.0,
    high_diastolic: 90.0,
    fetal_hr_low: 110.0,
    fetal_hr_high: 160.0,
};

impl Default for ThresholdTable {
    fn default() -> Self {
        STANDARD_THRESHOLDS
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold {name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{critical} ({critical_value}) must be greater than {high} ({high_value})")]
    NotMoreExtreme {
        critical: &'static str,
        critical_value: f64,
        high: &'static str,
        high_value: f64,
    },
    #[error("fetal heart rate band is empty: low {low} is not below high {high}")]
    EmptyFetalBand { low: f64, high: f64 },
}

impl ThresholdTable {
    /// Check that every critical cutoff is strictly more extreme than its
    /// high counterpart and that the fetal heart rate band is non-empty.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("critical_systolic", self.critical_systolic),
            ("critical_diastolic", self.critical_diastolic),
            ("high_systolic", self.high_systolic),
            ("high_diastolic", self.high_diastolic),
            ("fetal_hr_low", self.fetal_hr_low),
            ("fetal_hr_high", self.fetal_hr_high),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThresholdError::NotPositive { name, value });
            }
        }
        if self.critical_systolic <= self.high_systolic {
            return Err(ThresholdError::NotMoreExtreme {
                critical: "critical_systolic",
                critical_value: self.critical_systolic,
                high: "high_systolic",
                high_value: self.high_systolic,
            });
        }
        if self.critical_diastolic <= self.high_diastolic {
            return Err(ThresholdError::NotMoreExtreme {
                critical: "critical_diastolic",
                critical_value: self.critical_diastolic,
                high: "high_diastolic",
                high_value: self.high_diastolic,
            });
        }
        if self.fetal_hr_low >= self.fetal_hr_high {
            return Err(ThresholdError::EmptyFetalBand {
                low: self.fetal_hr_low,
                high: self.fetal_hr_high,
            });
        }
        Ok(())
    }
}
