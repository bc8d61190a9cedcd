//! Composite competitor scoring.
//!
//! Each signal is mapped onto `[0, 100]` and blended with [`ScoreWeights`]:
//!
//! - menu: share of the competitor's considered items that matched ours
//! - price: `100 - 200 × |ours - theirs| / ours` over average prices
//! - distance: `100 - 20 × km`
//!
//! A competitor with no matched items, or with a weighted component that is
//! zero or undefined, is degenerate and gets no score at all.

use crate::domain::values::competitor_similarity::{CompetitorSimilarity, ScoreWeights};

/// Inputs for scoring one competitor.
#[derive(Debug, Clone)]
pub struct CompetitorSignals<'a> {
    pub competitor_id: &'a str,
    pub name: &'a str,
    pub matched_items: usize,
    pub considered_items: usize,
    pub our_avg_price: Option<f64>,
    pub their_avg_price: Option<f64>,
    pub distance_km: f64,
}

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        v
    } else {
        v.clamp(0.0, 100.0)
    }
}

pub fn menu_similarity(matched_items: usize, considered_items: usize) -> f64 {
    if considered_items == 0 {
        return 0.0;
    }
    clamp_score(100.0 * matched_items as f64 / considered_items as f64)
}

/// NaN when our average price is missing or not positive.
pub fn price_similarity(our_avg_price: Option<f64>, their_avg_price: Option<f64>) -> f64 {
    match (our_avg_price, their_avg_price) {
        (Some(ours), Some(theirs)) if ours > 0.0 && ours.is_finite() && theirs.is_finite() => {
            clamp_score((100.0 - 200.0 * (ours - theirs).abs() / ours).max(0.0))
        }
        _ => f64::NAN,
    }
}

pub fn distance_similarity(distance_km: f64) -> f64 {
    if !distance_km.is_finite() {
        return f64::NAN;
    }
    clamp_score((100.0 - 20.0 * distance_km).max(0.0))
}

#[derive(Debug, Clone, Default)]
pub struct CompetitorScoreAggregator {
    weights: ScoreWeights,
}

impl CompetitorScoreAggregator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Unrounded weighted blend, clamped to `[0, 100]`.
    pub fn raw_score(&self, menu: f64, price: f64, distance: f64) -> f64 {
        let mut total = 0.0;
        for (weight, value) in [
            (self.weights.menu, menu),
            (self.weights.price, price),
            (self.weights.distance, distance),
        ] {
            if weight > 0.0 {
                total += weight * value;
            }
        }
        clamp_score(total)
    }

    /// Composite rounded to the nearest integer for display.
    pub fn score(&self, menu: f64, price: f64, distance: f64) -> f64 {
        self.raw_score(menu, price, distance).round()
    }

    /// A weighted component that is zero or NaN makes the competitor degenerate.
    fn is_degenerate(&self, menu: f64, price: f64, distance: f64) -> bool {
        [
            (self.weights.menu, menu),
            (self.weights.price, price),
            (self.weights.distance, distance),
        ]
        .iter()
        .any(|(weight, value)| *weight > 0.0 && (value.is_nan() || *value == 0.0))
    }

    /// Score a competitor, or `None` when it must be left out of the ranking.
    pub fn evaluate(&self, signals: &CompetitorSignals<'_>) -> Option<CompetitorSimilarity> {
        if signals.matched_items == 0 {
            tracing::debug!(competitor = signals.competitor_id, "excluded: no matched items");
            return None;
        }

        let menu = menu_similarity(signals.matched_items, signals.considered_items);
        let price = price_similarity(signals.our_avg_price, signals.their_avg_price);
        let distance = distance_similarity(signals.distance_km);

        if self.is_degenerate(menu, price, distance) {
            tracing::debug!(
                competitor = signals.competitor_id,
                menu,
                price,
                distance,
                "excluded: degenerate component score"
            );
            return None;
        }

        let raw = self.raw_score(menu, price, distance);
        Some(CompetitorSimilarity {
            competitor_id: signals.competitor_id.to_string(),
            name: signals.name.to_string(),
            matched_items: signals.matched_items,
            menu_similarity: menu.round(),
            price_similarity: price.round(),
            distance_similarity: distance.round(),
            composite: raw.round(),
            raw_menu_similarity: menu,
            raw_price_similarity: price,
            raw_distance_similarity: distance,
            raw_composite: raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(matched: usize, ours: f64, theirs: f64, km: f64) -> CompetitorSignals<'static> {
        CompetitorSignals {
            competitor_id: "c",
            name: "Cafe",
            matched_items: matched,
            considered_items: 4,
            our_avg_price: Some(ours),
            their_avg_price: Some(theirs),
            distance_km: km,
        }
    }

    #[test]
    fn test_default_weights_composite() {
        let agg = CompetitorScoreAggregator::default();
        assert_eq!(agg.score(80.0, 60.0, 100.0), 80.0);
    }

    #[test]
    fn test_component_formulas() {
        assert_eq!(price_similarity(Some(4.0), Some(4.0)), 100.0);
        assert_eq!(price_similarity(Some(4.0), Some(5.0)), 50.0);
        assert_eq!(price_similarity(Some(4.0), Some(8.0)), 0.0);
        assert!(price_similarity(Some(0.0), Some(4.0)).is_nan());
        assert!(price_similarity(None, Some(4.0)).is_nan());
        assert_eq!(distance_similarity(0.0), 100.0);
        assert_eq!(distance_similarity(2.5), 50.0);
        assert_eq!(distance_similarity(12.0), 0.0);
        assert_eq!(menu_similarity(3, 4), 75.0);
        assert_eq!(menu_similarity(1, 0), 0.0);
    }

    #[test]
    fn test_no_matches_excluded() {
        let agg = CompetitorScoreAggregator::default();
        assert!(agg.evaluate(&signals(0, 4.0, 4.0, 0.5)).is_none());
    }

    #[test]
    fn test_zero_component_excluded() {
        let agg = CompetitorScoreAggregator::default();
        // Too far away: distance similarity is zero.
        assert!(agg.evaluate(&signals(2, 4.0, 4.0, 6.0)).is_none());
        // Prices too far apart.
        assert!(agg.evaluate(&signals(2, 4.0, 9.0, 1.0)).is_none());
    }

    #[test]
    fn test_menu_only_ignores_other_components() {
        let agg = CompetitorScoreAggregator::new(ScoreWeights::menu_only());
        let scored = agg.evaluate(&signals(3, 4.0, 9.0, 40.0)).unwrap();
        assert_eq!(scored.composite, 75.0);
        assert_eq!(scored.price_similarity, 0.0);
    }

    #[test]
    fn test_keeps_unrounded_values() {
        let agg = CompetitorScoreAggregator::default();
        let scored = agg.evaluate(&signals(1, 4.0, 4.1, 0.3)).unwrap();
        assert_eq!(scored.raw_menu_similarity, 25.0);
        assert!((scored.raw_price_similarity - 95.0).abs() < 1e-9);
        assert!((scored.raw_distance_similarity - 94.0).abs() < 1e-9);
        assert_eq!(scored.composite, scored.raw_composite.round());
        assert!(scored.raw_composite != scored.composite);
    }
}
