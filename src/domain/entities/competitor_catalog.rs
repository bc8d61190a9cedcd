use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Registry row for a competitor of a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub competitor_id: String,
    pub name: String,
    pub distance_km: f64,
}

impl CompetitorProfile {
    pub fn new(
        competitor_id: impl Into<String>,
        name: impl Into<String>,
        distance_km: f64,
    ) -> Result<Self, DomainError> {
        let competitor_id = competitor_id.into();
        if competitor_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("competitor id must not be empty".into()));
        }
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "competitor {competitor_id} has invalid distance {distance_km}"
            )));
        }
        Ok(Self {
            competitor_id,
            name: name.into(),
            distance_km,
        })
    }
}

/// Read-only snapshot of a competitor's menu for one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorCatalog {
    pub competitor_id: String,
    pub name: String,
    pub distance_km: f64,
    pub entries: Vec<MenuEntry>,
}

impl CompetitorCatalog {
    pub fn new(
        competitor_id: impl Into<String>,
        name: impl Into<String>,
        distance_km: f64,
        entries: Vec<MenuEntry>,
    ) -> Result<Self, DomainError> {
        let profile = CompetitorProfile::new(competitor_id, name, distance_km)?;
        Ok(Self::from_profile(profile, entries))
    }

    pub fn from_profile(profile: CompetitorProfile, entries: Vec<MenuEntry>) -> Self {
        Self {
            competitor_id: profile.competitor_id,
            name: profile.name,
            distance_km: profile.distance_km,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
