use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names a single field of a vitals record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalField {
    Systolic,
    Diastolic,
    Proteinuria,
    FetalHeartRate,
    GestationalWeeks,
}

impl VitalField {
    /// Inclusive range accepted for this field.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            VitalField::Systolic => (0.0, 300.0),
            VitalField::Diastolic => (0.0, 200.0),
            VitalField::Proteinuria => (0.0, 4.0),
            VitalField::FetalHeartRate => (0.0, 300.0),
            VitalField::GestationalWeeks => (0.0, 45.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VitalField::Systolic => "systolic",
            VitalField::Diastolic => "diastolic",
            VitalField::Proteinuria => "proteinuria",
            VitalField::FetalHeartRate => "fetal_heart_rate",
            VitalField::GestationalWeeks => "gestational_weeks",
        }
    }
}

impl fmt::Display for VitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a vitals record before any scoring happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VitalsError {
    #[error("missing required field: {field}")]
    Missing { field: VitalField },
    #[error("{field} is not a finite number")]
    NotFinite { field: VitalField },
    #[error("{field} = {value} is not a whole number")]
    NotInteger { field: VitalField, value: f64 },
    #[error("{field} = {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        field: VitalField,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl VitalsError {
    /// The field that caused the rejection.
    pub fn field(&self) -> VitalField {
        match self {
            VitalsError::Missing { field }
            | VitalsError::NotFinite { field }
            | VitalsError::NotInteger { field, .. }
            | VitalsError::OutOfRange { field, .. } => *field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_field() {
        let err = VitalsError::Missing {
            field: VitalField::FetalHeartRate,
        };
        assert_eq!(err.to_string(), "missing required field: fetal_heart_rate");
        assert_eq!(err.field(), VitalField::FetalHeartRate);

        let err = VitalsError::OutOfRange {
            field: VitalField::Proteinuria,
            value: 7.0,
            min: 0.0,
            max: 4.0,
        };
        assert_eq!(
            err.to_string(),
            "proteinuria = 7 is outside the accepted range 0..=4"
        );

        let err = VitalsError::NotInteger {
            field: VitalField::Proteinuria,
            value: 2.5,
        };
        assert_eq!(err.to_string(), "proteinuria = 2.5 is not a whole number");
        assert_eq!(err.field(), VitalField::Proteinuria);
    }
}
