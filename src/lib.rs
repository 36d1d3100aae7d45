//! Unit Sniper
//!
//! Normalizes competitor and marketplace listing prices to a per-unit basis
//! and compares them against a subscription catalog.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod source;
pub mod unit_price;
pub mod utils;

pub use unit_price::{normalize, NormalizationResult, RuleTable};
