//! Price elasticity of demand from reconstructed price-change events.
//!
//! Each event with demand observed on both sides yields
//! `(Δq / q_before) / (Δp / p_old)`. The estimate is the mean of those
//! ratios, forced non-positive. With no ratio at all, or fewer than the
//! configured minimum, the fallback coefficient is reported instead.

use serde::{Deserialize, Serialize};

use crate::domain::entities::price_change_event::PriceChangeEvent;
use crate::domain::error::DomainError;
use crate::domain::values::confidence::{ConfidenceLevel, ConfidenceThresholds};
use crate::domain::values::elasticity::{ElasticityEstimate, RevenueImpact, FALLBACK_COEFFICIENT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticityConfig {
    /// Fewer valid ratios than this reports the fallback coefficient. One
    /// measured change is enough by default.
    pub min_events: usize,
    pub thresholds: ConfidenceThresholds,
    pub fallback_coefficient: f64,
}

impl Default for ElasticityConfig {
    fn default() -> Self {
        Self {
            min_events: 1,
            thresholds: ConfidenceThresholds::default(),
            fallback_coefficient: FALLBACK_COEFFICIENT,
        }
    }
}

/// Elasticity implied by one event, if it carries enough data.
pub fn elasticity_ratio(event: &PriceChangeEvent) -> Option<f64> {
    let (before, after) = (event.quantity_before?, event.quantity_after?);
    if !event.price_changed() || event.old_price <= 0.0 || before <= 0.0 {
        return None;
    }
    let pct_price = (event.new_price - event.old_price) / event.old_price;
    let pct_qty = (after - before) / before;
    let ratio = pct_qty / pct_price;
    ratio.is_finite().then_some(ratio)
}

pub fn estimate(product_id: &str, events: &[PriceChangeEvent], config: &ElasticityConfig) -> ElasticityEstimate {
    let ratios: Vec<f64> = events.iter().filter_map(elasticity_ratio).collect();
    let sample_size = ratios.len();

    if sample_size == 0 {
        return ElasticityEstimate {
            product_id: product_id.to_string(),
            coefficient: config.fallback_coefficient,
            sample_size,
            confidence: ConfidenceLevel::Low,
            observed_mean: None,
            fallback: true,
        };
    }

    let mean = -(ratios.iter().sum::<f64>() / sample_size as f64).abs();

    if sample_size < config.min_events {
        tracing::debug!(product_id, sample_size, "insufficient price changes; using fallback elasticity");
        return ElasticityEstimate {
            product_id: product_id.to_string(),
            coefficient: config.fallback_coefficient,
            sample_size,
            confidence: ConfidenceLevel::Low,
            observed_mean: Some(mean),
            fallback: true,
        };
    }

    ElasticityEstimate {
        product_id: product_id.to_string(),
        coefficient: mean,
        sample_size,
        confidence: ConfidenceLevel::from_sample_size(sample_size, &config.thresholds),
        observed_mean: Some(mean),
        fallback: false,
    }
}

/// Project revenue at `proposed_price` from a baseline of `baseline_quantity`
/// units at `current_price`, using the estimate's coefficient.
///
/// Projected quantity is linear in the price change and floored at zero.
pub fn project_revenue_impact(
    estimate: &ElasticityEstimate,
    current_price: f64,
    baseline_quantity: f64,
    proposed_price: f64,
) -> Result<RevenueImpact, DomainError> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(DomainError::InvalidInput(format!("current price must be positive, got {current_price}")));
    }
    if !proposed_price.is_finite() || proposed_price < 0.0 {
        return Err(DomainError::InvalidInput(format!("proposed price must be non-negative, got {proposed_price}")));
    }
    if !baseline_quantity.is_finite() || baseline_quantity < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "baseline quantity must be non-negative, got {baseline_quantity}"
        )));
    }

    let price_change_pct = (proposed_price - current_price) / current_price;
    let quantity_change_pct = (estimate.coefficient * price_change_pct).max(-1.0);
    let projected_quantity = baseline_quantity * (1.0 + quantity_change_pct);
    let baseline_revenue = current_price * baseline_quantity;
    let projected_revenue = proposed_price * projected_quantity;
    let revenue_change = projected_revenue - baseline_revenue;
    let revenue_change_pct = if baseline_revenue > 0.0 {
        revenue_change / baseline_revenue
    } else {
        0.0
    };

    Ok(RevenueImpact {
        current_price,
        proposed_price,
        price_change_pct,
        quantity_change_pct,
        baseline_quantity,
        projected_quantity,
        baseline_revenue,
        projected_revenue,
        revenue_change,
        revenue_change_pct,
    })
}
