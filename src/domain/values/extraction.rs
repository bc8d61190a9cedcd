//! Menu-extraction job lifecycle.
//!
//! An extraction job moves `queued → processing → completed | failed`.
//! `completed` and `failed` are terminal. The remote service may skip
//! `processing` and jump straight to a terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl ExtractionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtractionStatus::Completed | ExtractionStatus::Failed)
    }

    /// Whether a job reported as `self` may next be reported as `next`.
    pub fn can_transition_to(&self, next: ExtractionStatus) -> bool {
        use ExtractionStatus::*;
        match (self, next) {
            (Queued, Queued | Processing | Completed | Failed) => true,
            (Processing, Processing | Completed | Failed) => true,
            (Completed, _) | (Failed, _) => false,
            _ => false,
        }
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStatus::Queued => write!(f, "queued"),
            ExtractionStatus::Processing => write!(f, "processing"),
            ExtractionStatus::Completed => write!(f, "completed"),
            ExtractionStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ExtractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" | "pending" => Ok(ExtractionStatus::Queued),
            "processing" | "running" => Ok(ExtractionStatus::Processing),
            "completed" | "done" => Ok(ExtractionStatus::Completed),
            "failed" | "error" => Ok(ExtractionStatus::Failed),
            _ => Err(format!("Unknown extraction status: {s}")),
        }
    }
}

/// Bounded exponential backoff for polling a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of status polls before giving up.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub multiplier: f64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_backoff_ms: 500,
            multiplier: 2.0,
            max_backoff_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// Delay before poll number `attempt` (0-based), capped at `max_backoff_ms`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(attempt.min(64) as i32);
        let ms = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(ms as u64)
    }
}
