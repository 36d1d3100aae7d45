//! Rule records for the unit-price engine.
//!
//! Category and pack rules are described in JSON (`rules.json` ships the
//! built-in table) and compiled once into a [`RuleTable`]. Order in the JSON
//! is the evaluation order.

use crate::model::RuleError;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Ounces per pound
pub const OZ_PER_LB: f64 = 16.0;
/// Ounces per kilogram
pub const OZ_PER_KG: f64 = 35.274;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Fluid ounces per liter
pub const FL_OZ_PER_L: f64 = 33.814;

/// Quantity conversion applied to a rule's captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    /// Capture 1 as-is
    #[default]
    None,
    PoundsToOunces,
    KilogramsToOunces,
    GramsToOunces,
    /// Capture 1 scaled by the weight token in capture 2
    WeightToOunces,
    /// Capture 1 scaled by the volume token in capture 2
    VolumeToFluidOunces,
}

impl Conversion {
    /// Turn the captures of a quantity match into a quantity in the rule's unit.
    pub fn apply(self, caps: &Captures<'_>) -> Option<f64> {
        let value = parse_number(caps.get(1)?.as_str())?;
        let token = caps
            .get(2)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default();

        let quantity = match self {
            Conversion::None => value,
            Conversion::PoundsToOunces => value * OZ_PER_LB,
            Conversion::KilogramsToOunces => value * OZ_PER_KG,
            Conversion::GramsToOunces => value / G_PER_OZ,
            Conversion::WeightToOunces => value * ounces_per_weight_unit(&token),
            Conversion::VolumeToFluidOunces => value * fluid_ounces_per_volume_unit(&token),
        };
        Some(quantity)
    }
}

/// Factor from a weight token to ounces. Unknown tokens scale by 1.
fn ounces_per_weight_unit(token: &str) -> f64 {
    match token.trim() {
        "lb" | "lbs" | "pound" | "pounds" => OZ_PER_LB,
        "kg" | "kgs" | "kilogram" | "kilograms" => OZ_PER_KG,
        "g" | "gram" | "grams" => 1.0 / G_PER_OZ,
        _ => 1.0,
    }
}

/// Factor from a volume token to fluid ounces. Unknown tokens scale by 1.
fn fluid_ounces_per_volume_unit(token: &str) -> f64 {
    let compact: String = token.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    match compact.as_str() {
        "ml" | "milliliter" | "milliliters" => 1.0 / ML_PER_FL_OZ,
        "l" | "liter" | "liters" | "litre" | "litres" => FL_OZ_PER_L,
        _ => 1.0,
    }
}

/// Parses a numeric capture, tolerating thousands separators.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}

/// Serializable description of a category rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub match_pattern: String,
    pub unit: String,
    pub quantity_pattern: String,
    #[serde(default)]
    pub conversion: Conversion,
}

/// Serializable description of a pack rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackSpec {
    pub container: String,
    pub pattern: String,
}

/// The on-disk shape of a rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableSpec {
    pub categories: Vec<CategorySpec>,
    #[serde(default)]
    pub packs: Vec<PackSpec>,
}

/// A compiled category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    /// Tested against the lower-cased product name
    pub match_pattern: Regex,
    pub unit: String,
    /// Case-insensitive, run against the original name
    pub quantity_pattern: Regex,
    pub conversion: Conversion,
}

impl CategoryRule {
    pub fn compile(spec: &CategorySpec) -> Result<Self, RuleError> {
        let invalid = |source| RuleError::InvalidPattern {
            rule: spec.name.clone(),
            source,
        };
        Ok(Self {
            name: spec.name.clone(),
            match_pattern: Regex::new(&spec.match_pattern).map_err(invalid)?,
            unit: spec.unit.clone(),
            quantity_pattern: RegexBuilder::new(&spec.quantity_pattern)
                .case_insensitive(true)
                .build()
                .map_err(invalid)?,
            conversion: spec.conversion,
        })
    }
}

/// A compiled pack rule: a container word and the pattern counting it.
#[derive(Debug, Clone)]
pub struct PackMultiplierRule {
    pub container: String,
    pub pattern: Regex,
}

impl PackMultiplierRule {
    pub fn compile(spec: &PackSpec) -> Result<Self, RuleError> {
        let pattern = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                rule: format!("pack:{}", spec.container),
                source,
            })?;
        Ok(Self {
            container: spec.container.to_lowercase(),
            pattern,
        })
    }

    /// The generic "pack" container is never shadowed by the category unit.
    pub fn is_generic(&self) -> bool {
        self.container == "pack"
    }
}

/// Ordered, immutable set of category and pack rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    categories: Vec<CategoryRule>,
    packs: Vec<PackMultiplierRule>,
}

static BUILTIN_JSON: &str = include_str!("rules.json");

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::from_json(BUILTIN_JSON).expect("rules.json should hold a valid rule table")
});

impl RuleTable {
    /// The rule table shipped with the crate, compiled on first use.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    pub fn from_spec(spec: &RuleTableSpec) -> Result<Self, RuleError> {
        let categories = spec
            .categories
            .iter()
            .map(CategoryRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let packs = spec
            .packs
            .iter()
            .map(PackMultiplierRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { categories, packs })
    }

    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let spec: RuleTableSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    pub fn packs(&self) -> &[PackMultiplierRule] {
        &self.packs
    }
}
