use crate::model::{CatalogItem, Listing};
use crate::unit_price::{round2, NormalizationResult, RuleTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A listing set against the catalog item it competes with, per unit.
#[derive(Debug, Clone, Serialize)]
pub struct PriceComparison {
    pub listing: Listing,
    pub catalog_item: String,
    pub unit: String,
    pub listing_unit_price: f64,
    pub catalog_unit_price: f64,
    /// Positive when the listing is cheaper per unit
    pub savings_pct: f64,
}

/// Per-unit statistics over normalized listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPriceStats {
    pub unit: String,
    pub avg_unit_price: f64,
    pub min_unit_price: f64,
    pub count: usize,
}

/// Interface for comparing listings against the catalog.
pub trait Analyzer {
    fn compare(&self, listing: &Listing, item: &CatalogItem) -> Option<PriceComparison>;
    fn find_deals(&self, comparisons: &[PriceComparison], threshold: f64) -> Vec<PriceComparison>;
    fn summarize(&self, listings: &[Listing]) -> Vec<UnitPriceStats>;
}

pub struct PriceAnalyzer {
    rules: Arc<RuleTable>,
}

impl PriceAnalyzer {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn normalize(&self, listing: &Listing) -> Option<NormalizationResult> {
        self.rules.normalize(&listing.title, listing.price)
    }
}

impl Analyzer for PriceAnalyzer {
    /// Comparable only when both sides normalize to the same unit.
    fn compare(&self, listing: &Listing, item: &CatalogItem) -> Option<PriceComparison> {
        let ours = self.rules.normalize(&item.name, item.price)?;
        let theirs = self.normalize(listing)?;
        if ours.unit != theirs.unit {
            debug!(
                "Unit mismatch for `{}`: {} vs {}",
                listing.title, theirs.unit, ours.unit
            );
            return None;
        }

        let savings_pct = if ours.unit_price > 0.0 {
            round2((ours.unit_price - theirs.unit_price) / ours.unit_price * 100.0)
        } else {
            0.0
        };

        Some(PriceComparison {
            listing: listing.clone(),
            catalog_item: item.name.clone(),
            unit: ours.unit,
            listing_unit_price: theirs.unit_price,
            catalog_unit_price: ours.unit_price,
            savings_pct,
        })
    }

    /// Comparisons where the listing beats the catalog per unit by more than
    /// `threshold` (a fraction), cheapest first.
    fn find_deals(&self, comparisons: &[PriceComparison], threshold: f64) -> Vec<PriceComparison> {
        let mut deals: Vec<PriceComparison> = comparisons
            .iter()
            .filter(|c| c.listing_unit_price < c.catalog_unit_price * (1.0 - threshold))
            .cloned()
            .collect();
        deals.sort_by(|a, b| a.listing_unit_price.total_cmp(&b.listing_unit_price));
        deals
    }

    fn summarize(&self, listings: &[Listing]) -> Vec<UnitPriceStats> {
        let mut by_unit: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for listing in listings {
            if let Some(result) = self.normalize(listing) {
                by_unit.entry(result.unit).or_default().push(result.unit_price);
            }
        }

        by_unit
            .into_iter()
            .map(|(unit, prices)| {
                let count = prices.len();
                let avg = prices.iter().sum::<f64>() / count as f64;
                let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
                UnitPriceStats {
                    unit,
                    avg_unit_price: round2(avg),
                    min_unit_price: min,
                    count,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> PriceAnalyzer {
        PriceAnalyzer::new(Arc::new(RuleTable::builtin().clone()))
    }

    fn catalog_coffee() -> CatalogItem {
        CatalogItem {
            name: "Folgers Classic Roast Ground Coffee, 25 oz".into(),
            price: 12.50,
            match_keywords: vec!["folgers".into()],
        }
    }

    #[test]
    fn test_compare_same_unit() {
        let listing = Listing::new("Folgers Classic Roast Coffee, 2 lb", 12.80, "shop");
        let c = analyzer().compare(&listing, &catalog_coffee()).unwrap();
        assert_eq!(c.unit, "oz");
        assert_eq!(c.catalog_unit_price, 0.5);
        assert_eq!(c.listing_unit_price, 0.4);
        assert_eq!(c.savings_pct, 20.0);
    }

    #[test]
    fn test_compare_unit_mismatch() {
        let listing = Listing::new("Folgers Coffee K-Cup Pods, 48 Count", 25.0, "shop");
        assert!(analyzer().compare(&listing, &catalog_coffee()).is_none());
    }

    #[test]
    fn test_find_deals_threshold_and_order() {
        let a = analyzer();
        let item = catalog_coffee();
        let comparisons: Vec<_> = [
            Listing::new("Folgers Coffee, 25 oz", 12.00, "a"),
            Listing::new("Folgers Coffee, 2 lb", 12.80, "b"),
            Listing::new("Folgers Coffee, 25 oz", 8.75, "c"),
        ]
        .iter()
        .filter_map(|l| a.compare(l, &item))
        .collect();
        assert_eq!(comparisons.len(), 3);

        let deals = a.find_deals(&comparisons, 0.1);
        let sources: Vec<_> = deals.iter().map(|d| d.listing.source.as_str()).collect();
        assert_eq!(sources, vec!["c", "b"]);
    }

    #[test]
    fn test_summarize_groups_by_unit() {
        let listings = vec![
            Listing::new("Folgers Coffee, 25 oz", 10.0, "a"),
            Listing::new("Maxwell House Coffee, 30 oz", 9.0, "b"),
            Listing::new("Lysol Wipes, 4-Pack (80 wipes each)", 19.99, "c"),
            Listing::new("Bluetooth Speaker", 30.0, "d"),
        ];
        let stats = analyzer().summarize(&listings);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].unit, "oz");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_unit_price, 0.35);
        assert_eq!(stats[0].min_unit_price, 0.3);
        assert_eq!(stats[1].unit, "wipe");
    }
}
