use clap::Parser;
use pricelens::cli::commands::{Cli, Commands};
use pricelens::domain::entities::competitor_catalog::CompetitorProfile;
use pricelens::domain::entities::menu_entry::MenuEntry;
use pricelens::domain::entities::order::{OrderRecord, PriceHistoryRecord};
use pricelens::infrastructure::extraction::http::HttpMenuExtractor;
use pricelens::PriceLens;
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let db_path = std::env::var("PRICELENS_DB").unwrap_or_else(|_| "./pricelens.db".into());

    let engine = match PriceLens::new(&db_path) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error initializing PriceLens: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(engine, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(engine: PriceLens, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::ImportCatalog { owner_id, file } => {
            let entries: Vec<MenuEntry> = parse_lenient(&read_input(&file)?)?;
            let summary = engine.import_catalog(&owner_id, entries)?;
            print_json(&summary)?;
        }
        Commands::AddCompetitor {
            business_id,
            competitor_id,
            name,
            distance_km,
        } => {
            let profile = CompetitorProfile::new(competitor_id, name, distance_km)?;
            engine.add_competitor(&business_id, &profile)?;
            print_json(&profile)?;
        }
        Commands::ImportOrders { product_id, file } => {
            let orders: Vec<OrderRecord> = serde_json::from_str(&read_input(&file)?)?;
            let summary = engine.import_orders(&product_id, &orders)?;
            print_json(&summary)?;
        }
        Commands::ImportHistory { product_id, file } => {
            let history: Vec<PriceHistoryRecord> = serde_json::from_str(&read_input(&file)?)?;
            let summary = engine.import_history(&product_id, &history)?;
            print_json(&summary)?;
        }
        Commands::Match {
            business_id,
            competitor_id,
            matched_only,
        } => {
            let mut results = engine.match_results(&business_id, &competitor_id)?;
            if matched_only {
                results.retain(|r| r.is_match);
            }
            print_json(&results)?;
        }
        Commands::Rank {
            business_id,
            parallel,
            limit,
        } => {
            let mut report = if parallel {
                engine.rank_competitors_parallel(&business_id).await?
            } else {
                engine.rank_competitors(&business_id)?
            };
            if let Some(limit) = limit {
                report.ranked.truncate(limit);
            }
            print_json(&report)?;
        }
        Commands::Events {
            business_id,
            product_id,
        } => {
            let events = engine.price_events(&business_id, &product_id)?;
            print_json(&events)?;
        }
        Commands::Elasticity {
            business_id,
            product_id,
            proposed_price,
        } => {
            let report = engine.estimate_elasticity(&business_id, &product_id, proposed_price)?;
            print_json(&report)?;
        }
        Commands::Extract {
            business_id,
            competitor_id,
            name,
            url,
            distance_km,
        } => {
            let base_url = std::env::var("PRICELENS_EXTRACTOR_URL")
                .map_err(|_| "PRICELENS_EXTRACTOR_URL must be set to use extract")?;
            let api_key = std::env::var("PRICELENS_EXTRACTOR_API_KEY").ok();
            let extractor = Arc::new(HttpMenuExtractor::new(base_url, api_key, Duration::from_secs(30)));
            let profile = CompetitorProfile::new(competitor_id, name, distance_km)?;
            let report = engine.extract_menu(extractor, &business_id, profile, &url).await?;
            print_json(&report)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read a whole file, or stdin when `path` is `-`.
fn read_input(path: &str) -> Result<String, std::io::Error> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Parse a JSON array, dropping elements that fail validation.
fn parse_lenient<T: serde::de::DeserializeOwned>(raw: &str) -> Result<Vec<T>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value(v) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect())
}
