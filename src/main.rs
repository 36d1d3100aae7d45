use unit_sniper::analyzer::{Analyzer, PriceAnalyzer};
use unit_sniper::config::{load_config, AppConfig};
use unit_sniper::model::Listing;
use unit_sniper::normalizer::match_catalog;
use unit_sniper::source::{self, build_client, ListingSource};
use unit_sniper::utils::to_kebab_case;

use futures::future::join_all;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("unit_sniper=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let rules = match config.rule_table() {
        Ok(rules) => rules,
        Err(e) => {
            error!("Rule table error: {}", e);
            return;
        }
    };
    info!(
        "Loaded {} category rules and {} pack rules",
        rules.categories().len(),
        rules.packs().len()
    );
    let analyzer = PriceAnalyzer::new(rules);

    let client = match build_client() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let sources: Vec<Box<dyn ListingSource>> = config
        .sources
        .iter()
        .filter_map(|cfg| match source::from_config(cfg, &client) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("Skipping source {:?}: {}", cfg, e);
                None
            }
        })
        .collect();
    info!("Sources to process: {}", sources.len());

    // Process all sources concurrently
    let tasks: Vec<_> = sources
        .iter()
        .map(|s| process_source(s.as_ref(), &analyzer, &config))
        .collect();
    join_all(tasks).await;

    info!("Done.");
}

/// Fetches one source, normalizes its listings and reports catalog deals.
async fn process_source(source: &dyn ListingSource, analyzer: &PriceAnalyzer, config: &AppConfig) {
    let label = source.label();
    info!("Processing source: {}", label);

    let listings = match source.fetch().await {
        Ok(l) => l,
        Err(e) => {
            warn!("Source error for {}: {}", label, e);
            return;
        }
    };
    info!("Fetched {} listings from {}", listings.len(), label);

    let mut unmatched = Vec::new();
    let mut comparisons = Vec::new();
    for listing in &listings {
        match analyzer.normalize(listing) {
            Some(result) => info!("{} — {:.2} ({})", listing.title, listing.price, result.formatted),
            None => {
                unmatched.push(listing.clone());
                continue;
            }
        }

        if let Some(item) = match_catalog(listing, &config.catalog) {
            if let Some(comparison) = analyzer.compare(listing, item) {
                comparisons.push(comparison);
            }
        }
    }

    if !unmatched.is_empty() {
        info!("{} listings had no unit price", unmatched.len());
        save_unmatched(&unmatched, &label);
    }

    for stats in analyzer.summarize(&listings) {
        info!(
            "Per {}: avg = {:.2}, min = {:.2} over {} listings",
            stats.unit, stats.avg_unit_price, stats.min_unit_price, stats.count
        );
    }

    let deals = analyzer.find_deals(&comparisons, config.deviation_threshold);
    info!("Found {} deals in {}", deals.len(), label);
    for deal in deals {
        info!(
            "Deal: {} at {:.2}/{} vs {} at {:.2}/{} ({:.2}% cheaper) {}",
            deal.listing.title,
            deal.listing_unit_price,
            deal.unit,
            deal.catalog_item,
            deal.catalog_unit_price,
            deal.unit,
            deal.savings_pct,
            deal.listing.link
        );
    }

    info!("Finished processing source: {}", label);
}

/// Writes listings without a unit price to disk so new rules can be written for them.
fn save_unmatched(listings: &[Listing], label: &str) {
    let folder = Path::new("logs/unmatched");
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create debug folder: {}", e);
        return;
    }
    let safe: String = to_kebab_case(label)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let filename = folder.join(format!("unmatched-{}.json", safe));
    let json = match serde_json::to_string_pretty(listings) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize unmatched listings: {}", e);
            return;
        }
    };
    if let Err(e) = fs::write(&filename, json) {
        warn!("Failed to write unmatched listings: {}", e);
    } else {
        info!("Saved unmatched listings: {}", filename.display());
    }
}
