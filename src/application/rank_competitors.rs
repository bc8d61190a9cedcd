//! Rank competitors use case: matches every competitor's menu against ours
//! and returns the non-degenerate ones ordered by composite score.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::application::aggregate::{CompetitorScoreAggregator, CompetitorSignals};
use crate::application::cache::{CacheKey, SimilarityCache};
use crate::application::matching::{considered_entries, ItemMatcher};
use crate::domain::entities::competitor_catalog::CompetitorCatalog;
use crate::domain::entities::menu_entry::{average_price, MenuEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::CatalogSource;
use crate::domain::values::competitor_similarity::CompetitorSimilarity;

/// Score a single competitor. `None` when it is empty or degenerate.
pub fn score_competitor(
    ours: &[MenuEntry],
    our_avg_price: Option<f64>,
    competitor: &CompetitorCatalog,
    matcher: &ItemMatcher,
    aggregator: &CompetitorScoreAggregator,
) -> Option<CompetitorSimilarity> {
    if competitor.is_empty() {
        tracing::debug!(competitor = %competitor.competitor_id, "excluded: empty catalog");
        return None;
    }
    let considered = considered_entries(&competitor.entries);
    let matched_items = matcher.match_count(ours, &considered);
    aggregator.evaluate(&CompetitorSignals {
        competitor_id: &competitor.competitor_id,
        name: &competitor.name,
        matched_items,
        considered_items: considered.len(),
        our_avg_price,
        their_avg_price: average_price(&considered),
        distance_km: competitor.distance_km,
    })
}

/// Highest composite first; equal scores fall back to competitor id.
pub fn sort_ranking(ranked: &mut [CompetitorSimilarity]) {
    ranked.sort_by(|a, b| {
        b.raw_composite
            .partial_cmp(&a.raw_composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.competitor_id.cmp(&b.competitor_id))
    });
}

/// Rank competitors against our menu, dropping empty and degenerate ones.
pub fn rank_competitors(
    ours: &[MenuEntry],
    competitors: &[CompetitorCatalog],
    matcher: &ItemMatcher,
    aggregator: &CompetitorScoreAggregator,
) -> Vec<CompetitorSimilarity> {
    let our_avg_price = average_price(ours);
    let mut ranked: Vec<CompetitorSimilarity> = competitors
        .iter()
        .filter_map(|c| score_competitor(ours, our_avg_price, c, matcher, aggregator))
        .collect();
    sort_ranking(&mut ranked);
    ranked
}

/// Result of ranking all competitors of a business.
#[derive(Debug, Serialize)]
pub struct RankingReport {
    pub business_id: String,
    pub strategy: String,
    pub competitors_considered: usize,
    pub competitors_excluded: usize,
    pub ranked: Vec<CompetitorSimilarity>,
}

pub struct RankCompetitorsUseCase {
    catalog: Arc<dyn CatalogSource>,
    matcher: Arc<ItemMatcher>,
    aggregator: CompetitorScoreAggregator,
    max_parallel: usize,
}

impl RankCompetitorsUseCase {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        matcher: Arc<ItemMatcher>,
        aggregator: CompetitorScoreAggregator,
        max_parallel: usize,
    ) -> Self {
        Self {
            catalog,
            matcher,
            aggregator,
            max_parallel: max_parallel.max(1),
        }
    }

    /// Fetch our menu and every competitor's, one competitor at a time to
    /// keep the load on the store bounded.
    fn load(&self, business_id: &str) -> Result<(Vec<MenuEntry>, Vec<CompetitorCatalog>), DomainError> {
        if business_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("business id must not be empty".into()));
        }
        let ours = self.catalog.get_entries(business_id)?;
        let profiles = self.catalog.list_competitors(business_id)?;
        let mut competitors = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let entries = self.catalog.get_entries(&profile.competitor_id)?;
            competitors.push(CompetitorCatalog::from_profile(profile, entries));
        }
        Ok((ours, competitors))
    }

    fn report(&self, business_id: &str, considered: usize, ranked: Vec<CompetitorSimilarity>) -> RankingReport {
        tracing::info!(
            business_id,
            considered,
            ranked = ranked.len(),
            strategy = self.matcher.strategy_name(),
            "ranked competitors"
        );
        RankingReport {
            business_id: business_id.to_string(),
            strategy: self.matcher.strategy_name().to_string(),
            competitors_considered: considered,
            competitors_excluded: considered - ranked.len(),
            ranked,
        }
    }

    pub fn execute(&self, business_id: &str) -> Result<RankingReport, DomainError> {
        let (ours, competitors) = self.load(business_id)?;
        if ours.is_empty() {
            tracing::warn!(business_id, "no menu entries for business; nothing to compare");
        }
        let ranked = rank_competitors(&ours, &competitors, &self.matcher, &self.aggregator);
        Ok(self.report(business_id, competitors.len(), ranked))
    }

    /// Like [`execute`](Self::execute), reusing scores memoized in `cache`.
    pub fn execute_cached(&self, business_id: &str, cache: &SimilarityCache) -> Result<RankingReport, DomainError> {
        let (ours, competitors) = self.load(business_id)?;
        let catalog_version = self.catalog.catalog_version(business_id)?;
        let our_avg_price = average_price(&ours);

        let mut ranked = Vec::new();
        for competitor in &competitors {
            let key = CacheKey {
                catalog_version,
                competitor_id: competitor.competitor_id.clone(),
                competitor_version: self.catalog.catalog_version(&competitor.competitor_id)?,
            };
            let scored = match cache.get(&key) {
                Some(hit) => hit,
                None => {
                    let fresh = score_competitor(&ours, our_avg_price, competitor, &self.matcher, &self.aggregator);
                    cache.insert(key, fresh.clone());
                    fresh
                }
            };
            ranked.extend(scored);
        }
        sort_ranking(&mut ranked);
        Ok(self.report(business_id, competitors.len(), ranked))
    }

    /// Like [`execute`](Self::execute), scoring competitors concurrently.
    ///
    /// At most `max_parallel` competitors are scored at once. Dropping the
    /// returned future drops the task set: competitors not yet started are
    /// never scored, while blocking tasks already running cannot be aborted
    /// and finish in the background with their results discarded. Nothing is
    /// mutated either way.
    pub async fn execute_parallel(&self, business_id: &str) -> Result<RankingReport, DomainError> {
        let (ours, competitors) = self.load(business_id)?;
        let considered = competitors.len();
        let ranked = self.rank_parallel(Arc::new(ours), competitors).await?;
        Ok(self.report(business_id, considered, ranked))
    }

    pub async fn rank_parallel(
        &self,
        ours: Arc<Vec<MenuEntry>>,
        competitors: Vec<CompetitorCatalog>,
    ) -> Result<Vec<CompetitorSimilarity>, DomainError> {
        let our_avg_price = average_price(&ours);
        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let mut tasks = JoinSet::new();

        for competitor in competitors {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| DomainError::Task(format!("scoring pool closed: {e}")))?;
            let ours = Arc::clone(&ours);
            let matcher = Arc::clone(&self.matcher);
            let aggregator = self.aggregator.clone();
            tasks.spawn_blocking(move || {
                let _permit = permit;
                score_competitor(&ours, our_avg_price, &competitor, &matcher, &aggregator)
            });
        }

        let mut ranked = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(scored) => ranked.extend(scored),
                Err(e) => return Err(DomainError::Task(format!("competitor scoring failed: {e}"))),
            }
        }
        sort_ranking(&mut ranked);
        Ok(ranked)
    }
}
