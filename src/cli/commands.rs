use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pricelens", about = "Competitor similarity ranking and price elasticity estimation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace a business's or competitor's menu
    ImportCatalog {
        /// Owner of the menu (business or competitor id)
        owner_id: String,
        /// JSON array of entries with id, name, category, price, currency (`-` reads stdin)
        file: String,
    },
    /// Register a competitor for a business
    AddCompetitor {
        business_id: String,
        competitor_id: String,
        /// Display name
        name: String,
        /// Distance from the business in kilometres
        #[arg(long, default_value = "0")]
        distance_km: f64,
    },
    /// Append sales records for a product
    ImportOrders {
        product_id: String,
        /// JSON array of orders with date (YYYY-MM-DD), unit_price, quantity (`-` reads stdin)
        file: String,
    },
    /// Append price-change log records for a product
    ImportHistory {
        product_id: String,
        /// JSON array of records with old_price, new_price, changed_at (`-` reads stdin)
        file: String,
    },
    /// Show item-level matches between our menu and a competitor's
    Match {
        business_id: String,
        competitor_id: String,
        /// Only print pairs that count as matches
        #[arg(long)]
        matched_only: bool,
    },
    /// Rank a business's competitors by composite similarity
    Rank {
        business_id: String,
        /// Score competitors concurrently
        #[arg(long)]
        parallel: bool,
        /// Only print the top N competitors
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Reconstruct price-change events for a product
    Events {
        /// Business whose menu lists the product
        business_id: String,
        product_id: String,
    },
    /// Estimate price elasticity for a product
    Elasticity {
        /// Business whose menu lists the product
        business_id: String,
        product_id: String,
        /// Project revenue impact of moving to this price
        #[arg(long)]
        proposed_price: Option<f64>,
    },
    /// Extract a competitor's menu through the extraction service
    Extract {
        business_id: String,
        competitor_id: String,
        /// Display name
        name: String,
        /// Menu page or document URL
        url: String,
        /// Distance from the business in kilometres
        #[arg(long, default_value = "0")]
        distance_km: f64,
    },
}
