//! Category classifier: picks the first rule that both matches the name and
//! yields a usable quantity.

use super::rules::{CategoryRule, RuleTable};
use std::ops::Range;
use tracing::trace;

/// The winning rule and what it extracted.
#[derive(Debug, Clone)]
pub struct Classification<'t> {
    pub rule: &'t CategoryRule,
    pub quantity: f64,
    /// Byte range of the quantity match in the original name
    pub span: Range<usize>,
}

impl Classification<'_> {
    pub fn unit(&self) -> &str {
        &self.rule.unit
    }
}

/// Walks the rules once, in order.
///
/// A rule whose category matches but whose quantity cannot be read (or reads
/// as zero, negative or non-finite) does not end the search; the next rule is
/// tried.
pub fn classify<'t>(table: &'t RuleTable, name: &str) -> Option<Classification<'t>> {
    let lower = name.to_lowercase();

    for rule in table.categories() {
        if !rule.match_pattern.is_match(&lower) {
            continue;
        }

        let Some(caps) = rule.quantity_pattern.captures(name) else {
            trace!(rule = %rule.name, "category matched but no quantity found");
            continue;
        };
        let Some(quantity) = rule.conversion.apply(&caps) else {
            continue;
        };
        if !quantity.is_finite() || quantity <= 0.0 {
            trace!(rule = %rule.name, quantity, "rejected quantity");
            continue;
        }

        let whole = caps.get(0).map_or(0..0, |m| m.range());
        trace!(rule = %rule.name, quantity, "category selected");
        return Some(Classification {
            rule,
            quantity,
            span: whole,
        });
    }

    None
}
