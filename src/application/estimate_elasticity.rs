use crate::application::elasticity::{estimate, project_revenue_impact, ElasticityConfig};
use crate::application::price_events::{reconstruct, ReconstructionConfig};
use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::entities::price_change_event::PriceChangeEvent;
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::CatalogSource;
use crate::domain::ports::order_source::{PriceHistorySource, TransactionSource};
use crate::domain::values::elasticity::{ElasticityEstimate, RevenueImpact};
use serde::Serialize;
use std::sync::Arc;

/// Reconstruct events and estimate elasticity from already-fetched logs.
pub fn estimate_elasticity(
    product_id: &str,
    current_price: f64,
    transactions: &[OrderRecord],
    price_history: &[PriceHistoryRecord],
    reconstruction: &ReconstructionConfig,
    elasticity: &ElasticityConfig,
) -> Result<ElasticityEstimate, DomainError> {
    let events = reconstruct(product_id, current_price, transactions, price_history, reconstruction)?;
    Ok(estimate(product_id, &events, elasticity))
}

#[derive(Debug, Serialize)]
pub struct ElasticityReport {
    pub business_id: String,
    pub product_id: String,
    pub product_name: String,
    pub current_price: f64,
    pub events: Vec<PriceChangeEvent>,
    pub estimate: ElasticityEstimate,
    /// Present when a proposed price was given and a demand baseline exists.
    pub revenue_impact: Option<RevenueImpact>,
}

pub struct EstimateElasticityUseCase {
    catalog: Arc<dyn CatalogSource>,
    transactions: Arc<dyn TransactionSource>,
    history: Arc<dyn PriceHistorySource>,
    reconstruction: ReconstructionConfig,
    elasticity: ElasticityConfig,
}

impl EstimateElasticityUseCase {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        transactions: Arc<dyn TransactionSource>,
        history: Arc<dyn PriceHistorySource>,
        reconstruction: ReconstructionConfig,
        elasticity: ElasticityConfig,
    ) -> Self {
        Self {
            catalog,
            transactions,
            history,
            reconstruction,
            elasticity,
        }
    }

    /// Looks the product up on `business_id`'s own menu.
    fn load(
        &self,
        business_id: &str,
        product_id: &str,
    ) -> Result<(String, f64, Vec<OrderRecord>, Vec<PriceHistoryRecord>), DomainError> {
        if business_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("business id must not be empty".into()));
        }
        if product_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("product id must not be empty".into()));
        }
        let product = self
            .catalog
            .get_entry(business_id, product_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product not found: {business_id}/{product_id}")))?;
        let orders = self.transactions.get_orders(product_id)?;
        let history = self.history.get_history(product_id)?;
        Ok((product.name, product.price, orders, history))
    }

    pub fn events(&self, business_id: &str, product_id: &str) -> Result<Vec<PriceChangeEvent>, DomainError> {
        let (_, current_price, orders, history) = self.load(business_id, product_id)?;
        reconstruct(product_id, current_price, &orders, &history, &self.reconstruction)
    }

    pub fn execute(
        &self,
        business_id: &str,
        product_id: &str,
        proposed_price: Option<f64>,
    ) -> Result<ElasticityReport, DomainError> {
        let (product_name, current_price, orders, history) = self.load(business_id, product_id)?;
        let events = reconstruct(product_id, current_price, &orders, &history, &self.reconstruction)?;
        let estimate = estimate(product_id, &events, &self.elasticity);

        let revenue_impact = match proposed_price {
            Some(proposed) => match baseline_quantity(&events, &orders) {
                Some(baseline) => Some(project_revenue_impact(&estimate, current_price, baseline, proposed)?),
                None => {
                    tracing::warn!(product_id, "no sales data; cannot project revenue impact");
                    None
                }
            },
            None => None,
        };

        tracing::info!(
            business_id,
            product_id,
            coefficient = estimate.coefficient,
            sample_size = estimate.sample_size,
            confidence = %estimate.confidence,
            "estimated elasticity"
        );

        Ok(ElasticityReport {
            business_id: business_id.to_string(),
            product_id: product_id.to_string(),
            product_name,
            current_price,
            events,
            estimate,
            revenue_impact,
        })
    }
}

/// Current daily demand: the newest event's post-change quantity, or the
/// average over all usable orders.
fn baseline_quantity(events: &[PriceChangeEvent], orders: &[OrderRecord]) -> Option<f64> {
    if let Some(q) = events.iter().find_map(|e| e.quantity_after) {
        return Some(q);
    }
    let usable: Vec<&OrderRecord> = orders.iter().filter(|o| o.is_usable()).collect();
    let mut days: Vec<_> = usable.iter().map(|o| o.date).collect();
    days.sort();
    days.dedup();
    if days.is_empty() {
        return None;
    }
    Some(usable.iter().map(|o| o.quantity).sum::<f64>() / days.len() as f64)
}
