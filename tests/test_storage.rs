mod common;

use common::{add_competitor, menu, order};
use pricelens::config::EngineConfig;
use pricelens::domain::entities::order::PriceHistoryRecord;
use pricelens::PriceLens;

fn open(path: &str) -> PriceLens {
    PriceLens::with_config(path, EngineConfig::default()).unwrap()
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricelens.db");
    let path = path.to_str().unwrap();

    {
        let engine = open(path);
        engine.import_catalog("cafe", menu("ours", &["Latte", "Mocha"], 4.5)).unwrap();
        add_competitor(&engine, "cafe", "rival", 1.0, menu("r", &["Latte", "Mocha"], 4.5));
        engine
            .import_orders("ours-0", &[order(1, 4.00, 3.0), order(2, 4.50, 2.0)])
            .unwrap();
        engine
            .import_history("ours-0", &[PriceHistoryRecord::new(4.00, 4.50, common::day(2))])
            .unwrap();
    }

    let engine = open(path);
    let ours = engine.menu("cafe").unwrap();
    let names: Vec<&str> = ours.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Latte", "Mocha"]);

    let ranked = engine.rank_competitors("cafe").unwrap().ranked;
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].competitor_id, "rival");

    let events = engine.price_events("cafe", "ours-0").unwrap();
    assert_eq!(events[0].old_price, 4.00);
    assert_eq!(events[0].effective_date, Some(common::day(2)));
}

#[test]
fn test_reimport_replaces_menu() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricelens.db");
    let engine = open(path.to_str().unwrap());

    engine.import_catalog("cafe", menu("v1", &["Latte", "Mocha", "Chai Tea"], 4.0)).unwrap();
    engine.import_catalog("cafe", menu("v2", &["Flat White"], 4.0)).unwrap();

    let ours = engine.menu("cafe").unwrap();
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].id, "v2-0");
}

#[test]
fn test_duplicate_ids_skipped_on_import() {
    let engine = common::setup();
    let entries = vec![
        common::entry("dup", "Latte", 4.0),
        common::entry("dup", "Mocha", 4.5),
        common::entry("solo", "Chai Tea", 3.5),
    ];

    let summary = engine.import_catalog("cafe", entries).unwrap();
    assert_eq!(summary.received, 3);
    assert_eq!(summary.stored, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(engine.menu("cafe").unwrap()[0].name, "Latte");
}

#[test]
fn test_business_cannot_compete_with_itself() {
    let engine = common::setup();
    let profile = pricelens::domain::entities::competitor_catalog::CompetitorProfile::new("cafe", "Us", 0.0).unwrap();
    assert!(engine.add_competitor("cafe", &profile).is_err());
}
