use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk classification, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Lowest score that reaches each tier.
pub const CRITICAL_MIN_SCORE: u32 = 50;
pub const HIGH_MIN_SCORE: u32 = 20;
pub const MEDIUM_MIN_SCORE: u32 = 10;

impl RiskTier {
    /// Map an accumulated score onto a tier. Lower bounds are inclusive.
    pub fn from_score(score: u32) -> Self {
        if score >= CRITICAL_MIN_SCORE {
            RiskTier::Critical
        } else if score >= HIGH_MIN_SCORE {
            RiskTier::High
        } else if score >= MEDIUM_MIN_SCORE {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn color(self) -> DisplayColor {
        match self {
            RiskTier::Critical => DisplayColor::Red,
            RiskTier::High => DisplayColor::Orange,
            RiskTier::Medium => DisplayColor::Yellow,
            RiskTier::Low => DisplayColor::Green,
        }
    }

    /// Recommended action for a health worker.
    pub fn action(self) -> &'static str {
        match self {
            RiskTier::Critical => "Emergency transport now",
            RiskTier::High => "Refer to facility; monitor and prepare for transport",
            RiskTier::Medium => "Re-check vitals in 4 hours",
            RiskTier::Low => "Stable: continue routine antenatal care",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color keyed to a [`RiskTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl DisplayColor {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayColor::Green => "green",
            DisplayColor::Yellow => "yellow",
            DisplayColor::Orange => "orange",
            DisplayColor::Red => "red",
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
