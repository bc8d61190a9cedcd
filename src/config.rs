//! Engine configuration.
//!
//! Resolved in three layers: built-in defaults, then an optional JSON file
//! named by `PRICELENS_CONFIG`, then individual `PRICELENS_*` overrides.

use crate::application::elasticity::ElasticityConfig;
use crate::application::price_events::ReconstructionConfig;
use crate::domain::error::DomainError;
use crate::domain::similarity::PairScorer;
use crate::domain::values::competitor_similarity::ScoreWeights;
use crate::domain::values::extraction::RetryPolicy;
use crate::domain::values::match_result::MatchMode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PARALLEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: PairScorer,
    pub match_mode: MatchMode,
    pub weights: ScoreWeights,
    pub reconstruction: ReconstructionConfig,
    pub elasticity: ElasticityConfig,
    pub retry: RetryPolicy,
    pub max_parallel: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matching: PairScorer::default(),
            match_mode: MatchMode::default(),
            weights: ScoreWeights::default(),
            reconstruction: ReconstructionConfig::default(),
            elasticity: ElasticityConfig::default(),
            retry: RetryPolicy::default(),
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

impl EngineConfig {
    /// Defaults, overlaid by `PRICELENS_CONFIG` and the environment.
    pub fn load() -> Result<Self, DomainError> {
        let mut config = match std::env::var("PRICELENS_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::InvalidInput(format!("Cannot read config {path}: {e}")))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PRICELENS_*` overrides fetched through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("PRICELENS_MATCH_MODE") {
            self.match_mode = mode.parse().map_err(DomainError::InvalidInput)?;
        }
        if let Some(threshold) = lookup("PRICELENS_MATCH_THRESHOLD") {
            self.matching.threshold = parse_number(&threshold, "PRICELENS_MATCH_THRESHOLD")?;
        }
        if let Some(weights) = lookup("PRICELENS_WEIGHTS") {
            self.weights = ScoreWeights::parse_triplet(&weights).map_err(DomainError::InvalidInput)?;
        }
        if let Some(min_events) = lookup("PRICELENS_MIN_EVENTS") {
            self.elasticity.min_events = parse_number(&min_events, "PRICELENS_MIN_EVENTS")?;
        }
        if let Some(max_parallel) = lookup("PRICELENS_MAX_PARALLEL") {
            self.max_parallel = parse_number(&max_parallel, "PRICELENS_MAX_PARALLEL")?;
        }
        if let Some(mode) = lookup("PRICELENS_EVENT_MODE") {
            self.reconstruction.mode = mode.parse().map_err(DomainError::InvalidInput)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.weights.validate().map_err(DomainError::InvalidInput)?;
        let m = &self.matching;
        if [m.name_weight, m.keyword_weight, m.threshold]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(DomainError::InvalidInput(format!("Invalid matching config: {m:?}")));
        }
        if !(0.0..=1.0).contains(&m.threshold) {
            return Err(DomainError::InvalidInput(format!(
                "Match threshold must be within [0, 1], got {}",
                m.threshold
            )));
        }
        if self.max_parallel == 0 {
            return Err(DomainError::InvalidInput("max_parallel must be at least 1".into()));
        }
        if !self.reconstruction.tolerance.is_finite() || self.reconstruction.tolerance < 0.0 {
            return Err(DomainError::InvalidInput("price match tolerance must be non-negative".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(DomainError::InvalidInput("retry.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, DomainError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| DomainError::InvalidInput(format!("Invalid {key} '{raw}': {e}")))
}
