use serde::{Deserialize, Serialize};

/// Relative weight of each signal in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub menu: f64,
    pub price: f64,
    pub distance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            menu: 0.6,
            price: 0.2,
            distance: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Rank on menu overlap alone; price and distance are ignored.
    pub fn menu_only() -> Self {
        Self {
            menu: 1.0,
            price: 0.0,
            distance: 0.0,
        }
    }

    /// Parse `"menu,price,distance"`, e.g. `"0.6,0.2,0.2"`.
    pub fn parse_triplet(s: &str) -> Result<Self, String> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("Invalid weights '{s}': {e}"))?;
        match parts.as_slice() {
            [menu, price, distance] => {
                let w = Self {
                    menu: *menu,
                    price: *price,
                    distance: *distance,
                };
                w.validate()?;
                Ok(w)
            }
            _ => Err(format!("Expected three comma-separated weights, got '{s}'")),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let all = [self.menu, self.price, self.distance];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("Weights must be finite and non-negative: {self:?}"));
        }
        if all.iter().sum::<f64>() <= 0.0 {
            return Err("At least one weight must be positive".into());
        }
        Ok(())
    }
}

/// Composite similarity of one competitor to our business, each score in `[0, 100]`.
///
/// The four headline scores are rounded for display; the `raw_*` fields keep
/// the unrounded values used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSimilarity {
    pub competitor_id: String,
    pub name: String,
    pub matched_items: usize,
    pub menu_similarity: f64,
    pub price_similarity: f64,
    pub distance_similarity: f64,
    pub composite: f64,
    pub raw_menu_similarity: f64,
    pub raw_price_similarity: f64,
    pub raw_distance_similarity: f64,
    pub raw_composite: f64,
}
