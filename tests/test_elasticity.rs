mod common;

use common::{entry, order, setup, setup_with};
use pricelens::application::elasticity::{estimate, ElasticityConfig};
use pricelens::application::estimate_elasticity::estimate_elasticity;
use pricelens::application::price_events::{ReconstructionConfig, ReconstructionMode};
use pricelens::config::EngineConfig;
use pricelens::domain::error::DomainError;
use pricelens::domain::values::confidence::ConfidenceLevel;
use pricelens::domain::values::elasticity::FALLBACK_COEFFICIENT;
use pricelens::PriceLens;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn with_product(engine: &PriceLens, id: &str, price: f64) {
    engine.import_catalog("cafe", vec![entry(id, "House Blend", price)]).unwrap();
}

#[test]
fn test_single_change_measured_by_default() {
    let engine = setup();
    with_product(&engine, "p1", 11.0);
    engine
        .import_orders("p1", &[order(1, 10.0, 100.0), order(2, 11.0, 88.0)])
        .unwrap();

    let report = engine.estimate_elasticity("cafe", "p1", None).unwrap();
    let est = &report.estimate;
    assert!(approx(est.coefficient, -1.2));
    assert_eq!(est.sample_size, 1);
    assert_eq!(est.confidence, ConfidenceLevel::Low);
    assert!(!est.fallback);
    assert!(approx(est.observed_mean.unwrap(), -1.2));
    assert!(report.revenue_impact.is_none());
}

#[test]
fn test_default_engine_reports_observed_coefficient() {
    let engine = setup();
    with_product(&engine, "p1", 5.00);
    engine
        .import_orders(
            "p1",
            &[
                order(1, 4.00, 100.0),
                order(2, 4.00, 100.0),
                order(3, 5.00, 50.0),
                order(4, 5.00, 50.0),
            ],
        )
        .unwrap();

    let report = engine.estimate_elasticity("cafe", "p1", None).unwrap();
    assert_eq!(report.events.len(), 1);
    let est = &report.estimate;
    assert_eq!(est.sample_size, 1);
    assert!(!est.fallback);
    assert!(approx(est.coefficient, -2.0));
    assert_ne!(est.coefficient, FALLBACK_COEFFICIENT);
}

#[test]
fn test_fallback_below_configured_minimum() {
    let engine = setup_with(EngineConfig {
        elasticity: ElasticityConfig {
            min_events: 2,
            ..ElasticityConfig::default()
        },
        ..EngineConfig::default()
    });
    with_product(&engine, "p1", 11.0);
    engine
        .import_orders("p1", &[order(1, 10.0, 100.0), order(2, 11.0, 88.0)])
        .unwrap();

    let est = engine.estimate_elasticity("cafe", "p1", None).unwrap().estimate;
    assert_eq!(est.coefficient, FALLBACK_COEFFICIENT);
    assert_eq!(est.sample_size, 1);
    assert!(est.fallback);
    assert!(approx(est.observed_mean.unwrap(), -1.2));
}

#[test]
fn test_mean_of_series_events() {
    let config = EngineConfig {
        reconstruction: ReconstructionConfig {
            mode: ReconstructionMode::Series,
            ..ReconstructionConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = setup_with(config);
    with_product(&engine, "p1", 4.84);
    engine
        .import_orders("p1", &[order(1, 4.00, 10.0), order(5, 4.40, 9.0), order(9, 4.84, 8.0)])
        .unwrap();

    let est = engine.estimate_elasticity("cafe", "p1", None).unwrap().estimate;
    let expected = -(1.0 + 10.0 / 9.0) / 2.0;
    assert_eq!(est.sample_size, 2);
    assert!(!est.fallback);
    assert!((est.coefficient - expected).abs() < 1e-6);
    assert_eq!(est.confidence, ConfidenceLevel::Low);
}

#[test]
fn test_coefficient_never_positive() {
    let engine = setup();
    with_product(&engine, "p1", 4.40);
    // Price and demand both rose.
    engine
        .import_orders("p1", &[order(1, 4.00, 2.0), order(2, 4.40, 3.0)])
        .unwrap();

    let est = engine.estimate_elasticity("cafe", "p1", None).unwrap().estimate;
    assert!(!est.fallback);
    assert!(est.coefficient < 0.0);
    assert!((est.coefficient + 5.0).abs() < 1e-6);
}

#[test]
fn test_no_data_falls_back_without_mean() {
    let engine = setup();
    with_product(&engine, "p1", 4.50);

    let report = engine.estimate_elasticity("cafe", "p1", None).unwrap();
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.estimate.coefficient, FALLBACK_COEFFICIENT);
    assert_eq!(report.estimate.sample_size, 0);
    assert_eq!(report.estimate.observed_mean, None);
}

#[test]
fn test_revenue_projection() {
    let engine = setup();
    with_product(&engine, "p-latte", 4.50);
    engine
        .import_orders("p-latte", &[order(1, 4.00, 3.0), order(2, 4.50, 2.0)])
        .unwrap();

    // One change, 4.00 -> 4.50 with demand 3 -> 2: coefficient -8/3.
    let report = engine.estimate_elasticity("cafe", "p-latte", Some(4.95)).unwrap();
    assert!(approx(report.estimate.coefficient, -8.0 / 3.0));
    let impact = report.revenue_impact.unwrap();
    assert!(approx(impact.price_change_pct, 0.1));
    assert!(approx(impact.quantity_change_pct, -4.0 / 15.0));
    assert!(approx(impact.baseline_quantity, 2.0));
    assert!(approx(impact.projected_quantity, 22.0 / 15.0));
    assert!(approx(impact.baseline_revenue, 9.0));
    assert!(approx(impact.projected_revenue, 7.26));
    assert!(impact.revenue_change < 0.0);
}

#[test]
fn test_projected_demand_floored_at_zero() {
    let engine = setup();
    with_product(&engine, "p-latte", 4.50);
    engine
        .import_orders("p-latte", &[order(1, 4.00, 3.0), order(2, 4.50, 2.0)])
        .unwrap();

    let impact = engine
        .estimate_elasticity("cafe", "p-latte", Some(13.50))
        .unwrap()
        .revenue_impact
        .unwrap();
    assert_eq!(impact.quantity_change_pct, -1.0);
    assert_eq!(impact.projected_quantity, 0.0);
    assert_eq!(impact.projected_revenue, 0.0);
}

#[test]
fn test_no_sales_means_no_projection() {
    let engine = setup();
    with_product(&engine, "p1", 4.50);
    let report = engine.estimate_elasticity("cafe", "p1", Some(5.0)).unwrap();
    assert!(report.revenue_impact.is_none());
}

#[test]
fn test_negative_proposed_price_rejected() {
    let engine = setup();
    with_product(&engine, "p1", 4.50);
    engine.import_orders("p1", &[order(1, 4.50, 2.0)]).unwrap();
    let err = engine.estimate_elasticity("cafe", "p1", Some(-1.0)).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_unknown_product() {
    let engine = setup();
    let err = engine.estimate_elasticity("cafe", "ghost", None).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn test_product_resolved_on_own_menu() {
    let engine = setup();
    engine.import_catalog("cafe", vec![entry("latte", "Latte", 4.50)]).unwrap();
    engine.import_catalog("bakery", vec![entry("latte", "Bakery Latte", 6.00)]).unwrap();

    let ours = engine.estimate_elasticity("cafe", "latte", None).unwrap();
    assert_eq!(ours.business_id, "cafe");
    assert_eq!(ours.product_name, "Latte");
    assert_eq!(ours.current_price, 4.50);

    let theirs = engine.estimate_elasticity("bakery", "latte", None).unwrap();
    assert_eq!(theirs.product_name, "Bakery Latte");
    assert_eq!(theirs.current_price, 6.00);

    // Listed elsewhere, but not on this business's menu.
    let err = engine.estimate_elasticity("diner", "latte", None).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    let err = engine.estimate_elasticity(" ", "latte", None).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_pure_estimate_without_storage() {
    let orders = vec![order(1, 10.0, 100.0), order(2, 11.0, 88.0)];
    let est = estimate_elasticity(
        "p1",
        11.0,
        &orders,
        &[],
        &ReconstructionConfig::default(),
        &ElasticityConfig::default(),
    )
    .unwrap();
    assert!(approx(est.coefficient, -1.2));
    assert!(!est.fallback);

    let est = estimate_elasticity(
        "p1",
        11.0,
        &[],
        &[],
        &ReconstructionConfig::default(),
        &ElasticityConfig::default(),
    )
    .unwrap();
    assert_eq!(est.coefficient, FALLBACK_COEFFICIENT);

    let err = estimate_elasticity("p1", -2.0, &orders, &[], &ReconstructionConfig::default(), &ElasticityConfig::default())
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_confidence_rises_with_sample_size() {
    use pricelens::domain::entities::price_change_event::{EventSource, PriceChangeEvent};

    let events: Vec<PriceChangeEvent> = (0..10)
        .map(|i| PriceChangeEvent {
            product_id: "p1".into(),
            old_price: 4.0,
            new_price: 4.4,
            effective_date: Some(common::day(i + 1)),
            quantity_before: Some(10.0),
            quantity_after: Some(9.0),
            source: EventSource::Transactions,
        })
        .collect();
    let config = ElasticityConfig::default();
    assert_eq!(estimate("p1", &events[..4], &config).confidence, ConfidenceLevel::Low);
    assert_eq!(estimate("p1", &events[..5], &config).confidence, ConfidenceLevel::Medium);
    assert_eq!(estimate("p1", &events, &config).confidence, ConfidenceLevel::High);
}
