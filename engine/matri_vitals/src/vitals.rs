use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{VitalField, VitalsError};

/// A single antenatal vitals reading.
///
/// The engine does not know which patient the reading belongs to; linking a
/// reading to a registration record is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Systolic blood pressure in mmHg
    pub systolic: f64,
    /// Diastolic blood pressure in mmHg
    pub diastolic: f64,
    /// Dipstick proteinuria grade, 0 (negative) through 4 (4+)
    pub proteinuria: u8,
    /// Fetal heart rate in beats per minute
    pub fetal_heart_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_weeks: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub symptoms: BTreeSet<String>,
}

impl Vitals {
    pub fn new(systolic: f64, diastolic: f64, proteinuria: u8, fetal_heart_rate: f64) -> Self {
        Self {
            systolic,
            diastolic,
            proteinuria,
            fetal_heart_rate,
            gestational_weeks: None,
            symptoms: BTreeSet::new(),
        }
    }

    pub fn with_gestational_weeks(mut self, weeks: f64) -> Self {
        self.gestational_weeks = Some(weeks);
        self
    }

    pub fn with_symptom(mut self, tag: impl Into<String>) -> Self {
        self.symptoms.insert(tag.into());
        self
    }

    /// Checks every numeric field against its accepted range.
    ///
    /// Fields are checked in declaration order and the first offending field
    /// is reported.
    pub fn validate(&self) -> Result<(), VitalsError> {
        check(VitalField::Systolic, self.systolic)?;
        check(VitalField::Diastolic, self.diastolic)?;
        check(VitalField::Proteinuria, f64::from(self.proteinuria))?;
        check(VitalField::FetalHeartRate, self.fetal_heart_rate)?;
        if let Some(weeks) = self.gestational_weeks {
            check(VitalField::GestationalWeeks, weeks)?;
        }
        Ok(())
    }
}

fn check(field: VitalField, value: f64) -> Result<(), VitalsError> {
    if !value.is_finite() {
        return Err(VitalsError::NotFinite { field });
    }
    let (min, max) = field.bounds();
    if value < min || value > max {
        return Err(VitalsError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Vitals as they arrive from a form or a JSON document, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    /// Read as a number so a fractional grade is reported as a vitals error
    #[serde(default)]
    pub proteinuria: Option<f64>,
    #[serde(default)]
    pub fetal_heart_rate: Option<f64>,
    #[serde(default)]
    pub gestational_weeks: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl VitalsRecord {
    /// Converts the record into validated [`Vitals`].
    pub fn into_vitals(self) -> Result<Vitals, VitalsError> {
        let systolic = require(VitalField::Systolic, self.systolic)?;
        let diastolic = require(VitalField::Diastolic, self.diastolic)?;
        let proteinuria = require(VitalField::Proteinuria, self.proteinuria)?;
        let fetal_heart_rate = require(VitalField::FetalHeartRate, self.fetal_heart_rate)?;

        let proteinuria = grade(proteinuria)?;

        let vitals = Vitals {
            systolic,
            diastolic,
            proteinuria,
            fetal_heart_rate,
            gestational_weeks: self.gestational_weeks,
            symptoms: self.symptoms.into_iter().collect(),
        };
        vitals.validate()?;
        Ok(vitals)
    }
}

/// Dipstick grades are whole numbers in `0..=4`.
fn grade(value: f64) -> Result<u8, VitalsError> {
    check(VitalField::Proteinuria, value)?;
    if value.fract() != 0.0 {
        return Err(VitalsError::NotInteger {
            field: VitalField::Proteinuria,
            value,
        });
    }
    Ok(value as u8)
}

fn require<T>(field: VitalField, value: Option<T>) -> Result<T, VitalsError> {
    value.ok_or(VitalsError::Missing { field })
}

impl TryFrom<VitalsRecord> for Vitals {
    type Error = VitalsError;

    fn try_from(record: VitalsRecord) -> Result<Self, Self::Error> {
        record.into_vitals()
    }
}

impl From<Vitals> for VitalsRecord {
    fn from(v: Vitals) -> Self {
        Self {
            systolic: Some(v.systolic),
            diastolic: Some(v.diastolic),
            proteinuria: Some(f64::from(v.proteinuria)),
            fetal_heart_rate: Some(v.fetal_heart_rate),
            gestational_weeks: v.gestational_weeks,
            symptoms: v.symptoms.into_iter().collect(),
        }
    }
}
