// Unit-price engine: category classifier, pack multiplier detector and
// unit-price calculator over an ordered, immutable rule table.

pub mod calculator;
pub mod classifier;
pub mod pack;
pub mod rules;

pub use calculator::{normalize, round2, NormalizationResult};
pub use classifier::{classify, Classification};
pub use pack::{pack_multiplier, PACK_RANGE};
pub use rules::{CategoryRule, Conversion, PackMultiplierRule, RuleTable, RuleTableSpec};
