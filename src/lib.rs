pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::aggregate::CompetitorScoreAggregator;
use crate::application::cache::SimilarityCache;
use crate::application::estimate_elasticity::{ElasticityReport, EstimateElasticityUseCase};
use crate::application::extract_menu::{ExtractMenuUseCase, ExtractionReport};
use crate::application::import::{ImportSummary, ImportUseCase};
use crate::application::matching::ItemMatcher;
use crate::application::rank_competitors::{RankCompetitorsUseCase, RankingReport};
use crate::config::EngineConfig;
use crate::domain::entities::competitor_catalog::CompetitorProfile;
use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use crate::domain::entities::price_change_event::PriceChangeEvent;
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::{CatalogSource, CatalogStore};
use crate::domain::ports::menu_extractor::MenuExtractor;
use crate::domain::ports::order_source::{OrderStore, PriceHistorySource, TransactionSource};
use crate::domain::values::match_result::MatchResult;
use crate::infrastructure::sqlite::catalog_repo::SqliteCatalogRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::order_repo::SqliteOrderRepo;
use rusqlite::Connection;
use std::sync::Arc;

pub struct PriceLens {
    config: EngineConfig,
    catalog: Arc<dyn CatalogSource>,
    catalog_store: Arc<dyn CatalogStore>,
    matcher: Arc<ItemMatcher>,
    cache: SimilarityCache,
    import_uc: ImportUseCase,
    rank_uc: RankCompetitorsUseCase,
    elasticity_uc: EstimateElasticityUseCase,
}

fn open_connection(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    run_migrations(&conn)?;
    Ok(conn)
}

impl PriceLens {
    /// Open the database at `db_path` with configuration from the environment.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        Self::with_config(db_path, EngineConfig::load()?)
    }

    pub fn with_config(db_path: &str, config: EngineConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let catalog_repo = Arc::new(SqliteCatalogRepo::new(open_connection(db_path)?));
        let order_repo = Arc::new(SqliteOrderRepo::new(open_connection(db_path)?));

        let catalog: Arc<dyn CatalogSource> = catalog_repo.clone();
        let catalog_store: Arc<dyn CatalogStore> = catalog_repo;
        let transactions: Arc<dyn TransactionSource> = order_repo.clone();
        let history: Arc<dyn PriceHistorySource> = order_repo.clone();
        let order_store: Arc<dyn OrderStore> = order_repo;

        let matcher = Arc::new(ItemMatcher::new(config.matching, config.match_mode));
        let aggregator = CompetitorScoreAggregator::new(config.weights);

        tracing::debug!(db_path, strategy = matcher.strategy_name(), "engine ready");

        Ok(Self {
            import_uc: ImportUseCase::new(catalog_store.clone(), order_store),
            rank_uc: RankCompetitorsUseCase::new(catalog.clone(), matcher.clone(), aggregator, config.max_parallel),
            elasticity_uc: EstimateElasticityUseCase::new(
                catalog.clone(),
                transactions,
                history,
                config.reconstruction,
                config.elasticity,
            ),
            cache: SimilarityCache::new(),
            config,
            catalog,
            catalog_store,
            matcher,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Delegating methods
    pub fn import_catalog(&self, owner_id: &str, entries: Vec<MenuEntry>) -> Result<ImportSummary, DomainError> {
        self.import_uc.import_catalog(owner_id, entries)
    }

    pub fn add_competitor(&self, business_id: &str, profile: &CompetitorProfile) -> Result<(), DomainError> {
        self.import_uc.add_competitor(business_id, profile)
    }

    pub fn import_orders(&self, product_id: &str, orders: &[OrderRecord]) -> Result<ImportSummary, DomainError> {
        self.import_uc.import_orders(product_id, orders)
    }

    pub fn import_history(&self, product_id: &str, history: &[PriceHistoryRecord]) -> Result<ImportSummary, DomainError> {
        self.import_uc.import_history(product_id, history)
    }

    pub fn menu(&self, owner_id: &str) -> Result<Vec<MenuEntry>, DomainError> {
        self.catalog.get_entries(owner_id)
    }

    /// Pair every item on `competitor_id`'s menu with its counterpart on ours.
    pub fn match_results(&self, business_id: &str, competitor_id: &str) -> Result<Vec<MatchResult>, DomainError> {
        let ours = self.catalog.get_entries(business_id)?;
        let theirs = self.catalog.get_entries(competitor_id)?;
        Ok(self.matcher.match_results(&ours, &theirs))
    }

    pub fn rank_competitors(&self, business_id: &str) -> Result<RankingReport, DomainError> {
        self.rank_uc.execute(business_id)
    }

    pub async fn rank_competitors_parallel(&self, business_id: &str) -> Result<RankingReport, DomainError> {
        self.rank_uc.execute_parallel(business_id).await
    }

    /// Ranking that reuses competitor scores until either menu changes.
    pub fn rank_competitors_cached(&self, business_id: &str) -> Result<RankingReport, DomainError> {
        self.rank_uc.execute_cached(business_id, &self.cache)
    }

    pub fn cached_scores(&self) -> usize {
        self.cache.len()
    }

    /// Price-change events for a product on `business_id`'s menu.
    pub fn price_events(&self, business_id: &str, product_id: &str) -> Result<Vec<PriceChangeEvent>, DomainError> {
        self.elasticity_uc.events(business_id, product_id)
    }

    pub fn estimate_elasticity(
        &self,
        business_id: &str,
        product_id: &str,
        proposed_price: Option<f64>,
    ) -> Result<ElasticityReport, DomainError> {
        self.elasticity_uc.execute(business_id, product_id, proposed_price)
    }

    pub async fn extract_menu(
        &self,
        extractor: Arc<dyn MenuExtractor>,
        business_id: &str,
        profile: CompetitorProfile,
        source_url: &str,
    ) -> Result<ExtractionReport, DomainError> {
        if business_id == profile.competitor_id {
            return Err(DomainError::InvalidInput("a business cannot be its own competitor".into()));
        }
        ExtractMenuUseCase::new(extractor, self.catalog_store.clone(), self.config.retry)
            .execute(business_id, profile, source_url)
            .await
    }
}
