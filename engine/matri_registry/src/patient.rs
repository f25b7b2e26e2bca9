use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Days from the last menstrual period to the estimated delivery date.
pub const PREGNANCY_DAYS: i64 = 280;
/// Oldest LMP accepted at registration, in weeks.
pub const MAX_GESTATION_WEEKS: i64 = 44;
pub const MIN_AGE: u8 = 10;
pub const MAX_AGE: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("patient name is empty")]
    EmptyName,
    #[error("age {0} is outside {min}..={max}", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange(u8),
    #[error("last menstrual period {lmp} is after {today}")]
    LmpInFuture { lmp: NaiveDate, today: NaiveDate },
    #[error(
        "last menstrual period {lmp} is more than {weeks} weeks before {today}",
        weeks = MAX_GESTATION_WEEKS
    )]
    LmpTooOld { lmp: NaiveDate, today: NaiveDate },
}

/// A registered antenatal patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    /// First day of the last menstrual period
    pub lmp: NaiveDate,
    /// Estimated delivery date
    pub edd: NaiveDate,
    pub registered_at: DateTime<Utc>,
}

impl PatientRecord {
    /// Gestational age in weeks on `date`.
    pub fn gestational_weeks_on(&self, date: NaiveDate) -> f64 {
        gestational_weeks(self.lmp, date)
    }

    pub fn days_until_due(&self, date: NaiveDate) -> i64 {
        (self.edd - date).num_days()
    }
}

/// Estimated delivery date by Naegele's rule.
pub fn estimated_delivery_date(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(PREGNANCY_DAYS)
}

/// Whole days elapsed since `lmp`, expressed in weeks.
pub fn gestational_weeks(lmp: NaiveDate, on: NaiveDate) -> f64 {
    (on - lmp).num_days() as f64 / 7.0
}

/// Create a new patient record with a fresh ID.
pub fn register_patient(
    name: &str,
    age: u8,
    lmp: NaiveDate,
    today: NaiveDate,
) -> Result<PatientRecord, RegistrationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RegistrationError::AgeOutOfRange(age));
    }
    if lmp > today {
        return Err(RegistrationError::LmpInFuture { lmp, today });
    }
    if today - lmp > Duration::weeks(MAX_GESTATION_WEEKS) {
        return Err(RegistrationError::LmpTooOld { lmp, today });
    }

    let record = PatientRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        age,
        lmp,
        edd: estimated_delivery_date(lmp),
        registered_at: Utc::now(),
    };
    log::debug!("registered patient {} (EDD {})", record.id, record.edd);
    Ok(record)
}
