mod common;

use common::{add_competitor, menu, setup, setup_with};
use pricelens::config::EngineConfig;
use pricelens::domain::error::DomainError;
use pricelens::domain::values::competitor_similarity::ScoreWeights;
use pricelens::PriceLens;

const OURS: [&str; 5] = ["Latte", "Cappuccino", "Mocha", "Espresso", "Americano"];

/// Four competitors around "cafe":
/// - comp-a: 4 of 5 items match, prices 20% above ours, next door
/// - comp-b: nothing in common
/// - comp-c: full overlap at our prices, 1 km away
/// - comp-d: full overlap, but 6 km away
fn seed(engine: &PriceLens) {
    engine.import_catalog("cafe", menu("ours", &OURS, 4.0)).unwrap();
    add_competitor(
        engine,
        "cafe",
        "comp-a",
        0.0,
        menu("a", &["Latte", "Cappuccino", "Mocha", "Espresso", "Pad Thai"], 4.8),
    );
    add_competitor(engine, "cafe", "comp-b", 0.5, menu("b", &["Pad Thai", "Green Curry"], 4.0));
    add_competitor(engine, "cafe", "comp-c", 1.0, menu("c", &["Latte", "Mocha"], 4.0));
    add_competitor(engine, "cafe", "comp-d", 6.0, menu("d", &["Latte"], 4.0));
}

#[test]
fn test_composite_blends_components() {
    let engine = setup();
    seed(&engine);

    let report = engine.rank_competitors("cafe").unwrap();
    let a = report.ranked.iter().find(|c| c.competitor_id == "comp-a").unwrap();
    assert_eq!(a.matched_items, 4);
    assert_eq!(a.menu_similarity, 80.0);
    assert_eq!(a.price_similarity, 60.0);
    assert_eq!(a.distance_similarity, 100.0);
    assert_eq!(a.composite, 80.0);
}

#[test]
fn test_ranking_order_and_exclusions() {
    let engine = setup();
    seed(&engine);

    let report = engine.rank_competitors("cafe").unwrap();
    let ids: Vec<&str> = report.ranked.iter().map(|c| c.competitor_id.as_str()).collect();
    assert_eq!(ids, vec!["comp-c", "comp-a"]);
    assert_eq!(report.ranked[0].composite, 96.0);
    assert_eq!(report.competitors_considered, 4);
    assert_eq!(report.competitors_excluded, 2);
    assert_eq!(report.strategy, "greedy");
}

#[test]
fn test_ranking_is_descending_and_bounded() {
    let engine = setup();
    seed(&engine);

    let ranked = engine.rank_competitors("cafe").unwrap().ranked;
    for pair in ranked.windows(2) {
        assert!(pair[0].raw_composite >= pair[1].raw_composite);
    }
    for c in &ranked {
        for score in [c.menu_similarity, c.price_similarity, c.distance_similarity, c.composite] {
            assert!((0.0..=100.0).contains(&score));
        }
        assert!(c.matched_items > 0);
    }
}

#[test]
fn test_zero_weight_component_not_excluding() {
    let engine = setup_with(EngineConfig {
        weights: ScoreWeights::menu_only(),
        ..EngineConfig::default()
    });
    seed(&engine);

    let ranked = engine.rank_competitors("cafe").unwrap().ranked;
    let ids: Vec<&str> = ranked.iter().map(|c| c.competitor_id.as_str()).collect();
    // comp-c and comp-d tie on menu overlap; id breaks the tie.
    assert_eq!(ids, vec!["comp-c", "comp-d", "comp-a"]);
    assert_eq!(ranked[1].distance_similarity, 0.0);
    assert_eq!(ranked[1].composite, 100.0);
}

#[test]
fn test_ranking_is_idempotent() {
    let engine = setup();
    seed(&engine);

    let first = engine.rank_competitors("cafe").unwrap().ranked;
    let second = engine.rank_competitors("cafe").unwrap().ranked;
    assert_eq!(first, second);
}

#[test]
fn test_no_menu_ranks_nobody() {
    let engine = setup();
    add_competitor(&engine, "empty-cafe", "comp-c", 1.0, menu("c", &["Latte"], 4.0));

    let report = engine.rank_competitors("empty-cafe").unwrap();
    assert!(report.ranked.is_empty());
    assert_eq!(report.competitors_excluded, 1);
}

#[test]
fn test_competitor_without_menu_excluded() {
    let engine = setup();
    engine.import_catalog("cafe", menu("ours", &OURS, 4.0)).unwrap();
    add_competitor(&engine, "cafe", "comp-new", 0.2, Vec::new());

    let report = engine.rank_competitors("cafe").unwrap();
    assert!(report.ranked.is_empty());
    assert_eq!(report.competitors_considered, 1);
}

#[test]
fn test_empty_business_id_rejected() {
    let engine = setup();
    let err = engine.rank_competitors("  ").unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[tokio::test]
async fn test_parallel_matches_sequential() {
    let engine = setup();
    seed(&engine);

    let sequential = engine.rank_competitors("cafe").unwrap();
    let parallel = engine.rank_competitors_parallel("cafe").await.unwrap();
    assert_eq!(parallel.ranked, sequential.ranked);
    assert_eq!(parallel.competitors_excluded, sequential.competitors_excluded);
}

#[tokio::test]
async fn test_parallel_with_single_worker() {
    let engine = setup_with(EngineConfig {
        max_parallel: 1,
        ..EngineConfig::default()
    });
    seed(&engine);

    let parallel = engine.rank_competitors_parallel("cafe").await.unwrap();
    let ids: Vec<&str> = parallel.ranked.iter().map(|c| c.competitor_id.as_str()).collect();
    assert_eq!(ids, vec!["comp-c", "comp-a"]);
}

#[test]
fn test_cache_reused_until_menu_changes() {
    let engine = setup();
    seed(&engine);

    let first = engine.rank_competitors_cached("cafe").unwrap();
    assert_eq!(engine.cached_scores(), 4);
    let again = engine.rank_competitors_cached("cafe").unwrap();
    assert_eq!(engine.cached_scores(), 4);
    assert_eq!(first.ranked, again.ranked);
    assert_eq!(first.ranked, engine.rank_competitors("cafe").unwrap().ranked);

    // comp-b adds a latte and becomes rankable.
    engine
        .import_catalog("comp-b", menu("b", &["Pad Thai", "Green Curry", "Latte"], 4.0))
        .unwrap();
    let refreshed = engine.rank_competitors_cached("cafe").unwrap();
    assert_eq!(engine.cached_scores(), 5);
    assert!(refreshed.ranked.iter().any(|c| c.competitor_id == "comp-b"));
}

#[tokio::test]
async fn test_dropped_parallel_ranking_changes_nothing() {
    let engine = setup();
    seed(&engine);
    let before = engine.rank_competitors("cafe").unwrap();

    // Abandon the ranking after its first poll.
    let _ = tokio::time::timeout(std::time::Duration::ZERO, engine.rank_competitors_parallel("cafe")).await;

    assert_eq!(engine.cached_scores(), 0);
    assert_eq!(engine.menu("cafe").unwrap().len(), OURS.len());
    let after = engine.rank_competitors_parallel("cafe").await.unwrap();
    assert_eq!(after.ranked, before.ranked);
}

#[test]
fn test_cache_scoped_to_engine_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricelens.db");
    let path = path.to_str().unwrap();

    let blended = PriceLens::with_config(path, EngineConfig::default()).unwrap();
    seed(&blended);
    let menu_only = PriceLens::with_config(
        path,
        EngineConfig {
            weights: ScoreWeights::menu_only(),
            ..EngineConfig::default()
        },
    )
    .unwrap();

    // Same catalog versions, different weights: each engine scores afresh.
    let a = blended.rank_competitors_cached("cafe").unwrap();
    let b = menu_only.rank_competitors_cached("cafe").unwrap();
    assert_eq!(blended.cached_scores(), 4);
    assert_eq!(menu_only.cached_scores(), 4);
    assert_eq!(a.ranked, blended.rank_competitors("cafe").unwrap().ranked);
    assert_eq!(b.ranked, menu_only.rank_competitors("cafe").unwrap().ranked);
    assert_ne!(a.ranked, b.ranked);
}
