use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much trust to place in an elasticity estimate, derived only from
/// the number of valid observations behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Sample-size cut-offs for [`ConfidenceLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// At or above this many samples the estimate is at least medium.
    pub medium: usize,
    /// At or above this many samples the estimate is high.
    pub high: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self { medium: 5, high: 10 }
    }
}

impl ConfidenceLevel {
    pub fn from_sample_size(sample_size: usize, thresholds: &ConfidenceThresholds) -> Self {
        if sample_size >= thresholds.high {
            ConfidenceLevel::High
        } else if sample_size >= thresholds.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ConfidenceLevel::Low),
            "medium" => Ok(ConfidenceLevel::Medium),
            "high" => Ok(ConfidenceLevel::High),
            _ => Err(format!("Unknown confidence level: {s}")),
        }
    }
}
