use super::classifier::classify;
use super::pack::pack_multiplier;
use super::rules::RuleTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A listing price expressed per canonical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub unit_price: f64,
    pub unit: String,
    pub count: f64,
    pub formatted: String,
}

/// Rounds to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl RuleTable {
    /// Normalizes `total_price` for `name` against this table.
    ///
    /// Returns `None` whenever no unit price can be given: non-positive or
    /// non-finite price, no category, no usable quantity.
    pub fn normalize(&self, name: &str, total_price: f64) -> Option<NormalizationResult> {
        if !total_price.is_finite() || total_price <= 0.0 {
            return None;
        }

        let classification = classify(self, name)?;
        let multiplier = pack_multiplier(self, name, classification.unit(), &classification.span);
        let count = classification.quantity * f64::from(multiplier);
        if !count.is_finite() || count <= 0.0 {
            return None;
        }

        let unit_price = round2(total_price / count);
        let unit = classification.unit().to_string();
        debug!(
            rule = %classification.rule.name,
            multiplier,
            count,
            unit_price,
            "normalized `{}`",
            name
        );

        Some(NormalizationResult {
            formatted: format!("${unit_price:.2}/{unit}"),
            unit_price,
            unit,
            count,
        })
    }
}

/// Normalizes against the built-in rule table.
pub fn normalize(name: &str, total_price: f64) -> Option<NormalizationResult> {
    RuleTable::builtin().normalize(name, total_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(0.3904), 0.39);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(14.44), 14.44);
    }

    #[test]
    fn test_rounding_example() {
        let r = normalize("Folgers Classic Roast Ground Coffee, 25 oz", 9.76).unwrap();
        assert_eq!(r.unit_price, 0.39);
        assert_eq!(r.unit, "oz");
        assert_eq!(r.count, 25.0);
        assert_eq!(r.formatted, "$0.39/oz");
    }

    #[test]
    fn test_bad_prices() {
        let name = "Folgers Classic Roast Ground Coffee, 25 oz";
        assert!(normalize(name, 0.0).is_none());
        assert!(normalize(name, -3.0).is_none());
        assert!(normalize(name, f64::NAN).is_none());
        assert!(normalize(name, f64::INFINITY).is_none());
    }

    #[test]
    fn test_pack_applied_to_quantity() {
        let r = normalize("Lysol Wipes, 4-Pack (80 wipes each)", 19.99).unwrap();
        assert_eq!(r.unit, "wipe");
        assert_eq!(r.count, 320.0);
        assert_eq!(r.unit_price, 0.06);
    }

    #[test]
    fn test_pounds_converted() {
        let r = normalize("Purina Cat Chow Complete Dry Cat Food, 15 lb. Bag", 19.20).unwrap();
        assert_eq!(r.unit, "oz");
        assert_eq!(r.count, 240.0);
        assert_eq!(r.unit_price, 0.08);
    }
}
