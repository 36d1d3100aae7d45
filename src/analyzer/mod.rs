// Analyzer module: per-unit comparison of listings against the catalog.

pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, PriceAnalyzer, PriceComparison, UnitPriceStats};
