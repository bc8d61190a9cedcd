use crate::domain::values::confidence::ConfidenceLevel;
use serde::{Deserialize, Serialize};

/// Coefficient used when the event history cannot support an estimate.
pub const FALLBACK_COEFFICIENT: f64 = -1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityEstimate {
    pub product_id: String,
    /// Price elasticity of demand; never positive.
    pub coefficient: f64,
    /// Number of events that produced a valid ratio.
    pub sample_size: usize,
    pub confidence: ConfidenceLevel,
    /// Mean of the valid ratios (forced negative) even when the fallback
    /// coefficient was reported.
    pub observed_mean: Option<f64>,
    pub fallback: bool,
}

/// Projected effect of moving a product from its current price to a proposed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueImpact {
    pub current_price: f64,
    pub proposed_price: f64,
    pub price_change_pct: f64,
    pub quantity_change_pct: f64,
    pub baseline_quantity: f64,
    pub projected_quantity: f64,
    pub baseline_revenue: f64,
    pub projected_revenue: f64,
    pub revenue_change: f64,
    pub revenue_change_pct: f64,
}
