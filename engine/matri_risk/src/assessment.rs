use matri_signal::SignalOutcome;
use matri_vitals::{Vitals, VitalsError};
use serde::{Deserialize, Serialize};

use crate::thresholds::{ThresholdTable, STANDARD_THRESHOLDS};
use crate::tier::{DisplayColor, RiskTier};

pub const SEVERE_HYPERTENSION_POINTS: u32 = 50;
pub const HYPERTENSION_POINTS: u32 = 20;
pub const PREECLAMPSIA_POINTS: u32 = 40;
pub const FETAL_DISTRESS_POINTS: u32 = 30;
pub const SIGNAL_POINTS: u32 = 15;

/// Preeclampsia only counts once at least the hypertension rule has fired.
pub const PREECLAMPSIA_MIN_SCORE: u32 = 20;
/// Proteinuria grade that must be exceeded for preeclampsia.
pub const PREECLAMPSIA_PROTEINURIA: u8 = 1;
/// Probability that must be exceeded for the predictive signal to count.
pub const SIGNAL_CUTOFF: f64 = 0.75;

pub const NORMAL_LIMITS_REASON: &str = "Vitals within normal limits";

/// Outcome of one assessment.
///
/// Built fresh by every call and handed to the caller; reasons are kept in
/// the order the rules fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    tier: RiskTier,
    color: DisplayColor,
    action: String,
    reasons: Vec<String>,
    score: u32,
}

impl AssessmentResult {
    fn from_score(score: u32, reasons: Vec<String>) -> Self {
        let tier = RiskTier::from_score(score);
        // LOW discards whatever was accumulated.
        let reasons = if tier == RiskTier::Low {
            vec![NORMAL_LIMITS_REASON.to_string()]
        } else {
            reasons
        };
        Self {
            tier,
            color: tier.color(),
            action: tier.action().to_string(),
            reasons,
            score,
        }
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    pub fn color(&self) -> DisplayColor {
        self.color
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Assess `vitals` against [`STANDARD_THRESHOLDS`].
pub fn assess(vitals: &Vitals, signal: &SignalOutcome) -> Result<AssessmentResult, VitalsError> {
    assess_with(&STANDARD_THRESHOLDS, vitals, signal)
}

/// Assess `vitals` against a caller-supplied threshold table.
///
/// Rules run in a fixed order: hypertension, preeclampsia (which reads the
/// score accumulated so far), fetal distress, then the predictive signal. A
/// signal that is unavailable or failed contributes nothing.
pub fn assess_with(
    thresholds: &ThresholdTable,
    vitals: &Vitals,
    signal: &SignalOutcome,
) -> Result<AssessmentResult, VitalsError> {
    vitals.validate()?;

    let mut score = 0;
    let mut reasons = Vec::new();

    if vitals.systolic >= thresholds.critical_systolic
        || vitals.diastolic >= thresholds.critical_diastolic
    {
        score += SEVERE_HYPERTENSION_POINTS;
        log::debug!(
            "severe hypertension rule fired at {}/{} mmHg",
            vitals.systolic,
            vitals.diastolic
        );
        reasons.push(format!(
            "Severe Hypertension (BP {}/{} mmHg)",
            vitals.systolic, vitals.diastolic
        ));
    } else if vitals.systolic >= thresholds.high_systolic
        || vitals.diastolic >= thresholds.high_diastolic
    {
        score += HYPERTENSION_POINTS;
        log::debug!(
            "hypertension rule fired at {}/{} mmHg",
            vitals.systolic,
            vitals.diastolic
        );
        reasons.push(format!(
            "Hypertension detected (BP {}/{} mmHg)",
            vitals.systolic, vitals.diastolic
        ));
    }

    if score >= PREECLAMPSIA_MIN_SCORE && vitals.proteinuria > PREECLAMPSIA_PROTEINURIA {
        score += PREECLAMPSIA_POINTS;
        log::debug!("preeclampsia rule fired with proteinuria {}+", vitals.proteinuria);
        reasons.push(format!(
            "Preeclampsia risk: elevated BP with proteinuria {}+",
            vitals.proteinuria
        ));
    }

    if vitals.fetal_heart_rate < thresholds.fetal_hr_low
        || vitals.fetal_heart_rate > thresholds.fetal_hr_high
    {
        score += FETAL_DISTRESS_POINTS;
        log::debug!("fetal distress rule fired at {} bpm", vitals.fetal_heart_rate);
        reasons.push(format!(
            "Fetal distress: heart rate {} bpm outside {}-{}",
            vitals.fetal_heart_rate, thresholds.fetal_hr_low, thresholds.fetal_hr_high
        ));
    }

    match signal.probability() {
        Some(p) if p > SIGNAL_CUTOFF => {
            score += SIGNAL_POINTS;
            log::debug!("predictive signal {p} above cutoff {SIGNAL_CUTOFF}");
            reasons.push(format!("AI pattern match (probability {p:.3})"));
        }
        Some(p) => log::debug!("predictive signal {p} at or below cutoff {SIGNAL_CUTOFF}"),
        None => log::debug!("scoring without predictive signal ({signal:?})"),
    }

    let result = AssessmentResult::from_score(score, reasons);
    log::debug!("assessment score {} -> {}", result.score, result.tier);
    Ok(result)
}
